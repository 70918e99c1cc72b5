//! Snake Puzzle - eat every apple, then slither into the portal
//!
//! Core modules:
//! - `sim`: Deterministic level simulation (step function, portal animation, engine)
//! - `catalog`: Level definitions and validation
//! - `input`: Key binding and swipe translation into directions
//! - `audio`: Sound cues for simulation events
//! - `settings`: Player preferences
//! - `persistence`: Best-effort storage for progress and preferences
//! - `platform`: Browser bindings (wasm32)

pub mod audio;
pub mod catalog;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use catalog::{Catalog, CatalogError, Level, LevelError};
pub use persistence::Progress;
pub use settings::Settings;
pub use sim::{Direction, Engine, EngineError, GameEvent, GameStatus};

/// Game configuration constants
pub mod consts {
    /// Moves of invincibility granted by the power-up
    pub const INVINCIBILITY_DURATION: u32 = 5;
    /// Tail segments removed by the shrink power-up
    pub const SHRINK_AMOUNT: usize = 2;
    /// Shrink never leaves the snake shorter than this
    pub const SHRINK_MIN_LENGTH: usize = 3;

    /// Interval between portal swallow ticks (milliseconds)
    pub const PORTAL_TICK_MS: u32 = 100;

    /// Minimum swipe travel (pixels) to register a direction
    pub const MIN_SWIPE_DISTANCE: f32 = 30.0;
}

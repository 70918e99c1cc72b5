//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete grid steps only, driven by direction input
//! - Portal animation advanced by explicit `tick` calls, no timers
//! - No rendering, audio or storage dependencies

pub mod engine;
pub mod grid;
pub mod observer;
pub mod state;
pub mod step;

pub use engine::{Engine, EngineError};
pub use grid::{Coord, Direction, GridSize};
pub use observer::{EventObserver, dispatch};
pub use state::{
    DeathCause, GameEvent, GameState, GameStatus, PowerUp, PowerUpKind, ToggleSpikes,
};
pub use step::{portal_tick, step};

//! Player preferences
//!
//! Persisted separately from level progress. Control bindings and the music
//! flag live under their own storage keys so either can be rewritten alone.

use serde::{Deserialize, Serialize};

use crate::input::Controls;
use crate::persistence::{Storage, load_json, save_json};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Key bindings for the four directions
    pub controls: Controls,
    /// Background music on/off
    pub music_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            controls: Controls::default(),
            music_enabled: true,
        }
    }
}

impl Settings {
    /// Storage key for the control bindings
    pub const CONTROLS_KEY: &'static str = "snake-puzzle-controls";
    /// Storage key for the music flag
    pub const MUSIC_KEY: &'static str = "snake-puzzle-music-enabled";

    /// Load settings, falling back to defaults for anything missing or broken
    pub fn load(storage: &dyn Storage) -> Self {
        let mut settings = Self::default();

        match load_json::<Controls>(storage, Self::CONTROLS_KEY) {
            Some(controls) if controls.is_complete() => {
                log::info!("Loaded custom controls");
                settings.controls = controls;
            }
            Some(_) => log::warn!("Stored controls are incomplete, using defaults"),
            None => {}
        }

        if let Some(enabled) = load_json::<bool>(storage, Self::MUSIC_KEY) {
            settings.music_enabled = enabled;
        }

        settings
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        self.save_controls(storage);
        self.save_music(storage);
    }

    pub fn save_controls(&self, storage: &mut dyn Storage) {
        if save_json(storage, Self::CONTROLS_KEY, &self.controls) {
            log::info!("Controls saved");
        }
    }

    pub fn save_music(&self, storage: &mut dyn Storage) {
        if save_json(storage, Self::MUSIC_KEY, &self.music_enabled) {
            log::info!("Music setting saved");
        }
    }

    /// Flip music on/off and persist the new value
    pub fn toggle_music(&mut self, storage: &mut dyn Storage) -> bool {
        self.music_enabled = !self.music_enabled;
        self.save_music(storage);
        self.music_enabled
    }

    /// Restore default bindings and persist them
    pub fn reset_controls(&mut self, storage: &mut dyn Storage) {
        self.controls = Controls::default();
        self.save_controls(storage);
    }
}

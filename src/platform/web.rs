//! Browser facade
//!
//! Exposes the engine to JavaScript. Rendering, audio playback and the
//! animation timer stay on the JS side: it calls `tick()` every
//! `PORTAL_TICK_MS` while the snake is entering the portal and plays the
//! cues returned by `drain_sounds()`.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::audio::{SoundEffect, SoundQueue};
use crate::catalog::Catalog;
use crate::input::swipe_direction;
use crate::persistence::{LocalStorage, Progress, ProgressSaver};
use crate::settings::Settings;
use crate::sim::{Direction, Engine, GameEvent, dispatch};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Snake Puzzle starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    engine: Engine,
    settings: Settings,
    saver: ProgressSaver<LocalStorage>,
    sounds: SoundQueue,
}

#[wasm_bindgen]
impl WebGame {
    /// Start at `start_level`, or at the highest unlocked level when omitted
    #[wasm_bindgen(constructor)]
    pub fn new(start_level: Option<usize>) -> Result<WebGame, JsValue> {
        let catalog = Catalog::builtin().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let storage = LocalStorage;
        let progress = Progress::load(&storage, catalog.len());
        let settings = Settings::load(&storage);
        let start = start_level.unwrap_or(progress.highest_unlocked_level);

        let engine = Engine::new(catalog, progress, start)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            engine,
            settings,
            saver: ProgressSaver::new(storage, progress),
            sounds: SoundQueue::new(),
        })
    }

    /// Leaving the welcome screen
    pub fn start_game(&mut self) {
        log::info!("Starting at level {}", self.engine.level_id());
        self.sounds.push(SoundEffect::GameStart);
    }

    /// Feed a key press; returns true if it mapped to a direction
    pub fn key_down(&mut self, key: &str) -> bool {
        match self.settings.controls.direction_for_key(key) {
            Some(direction) => {
                let events = self.engine.step(direction);
                self.apply(events);
                true
            }
            None => false,
        }
    }

    /// Feed a finished touch swipe
    pub fn swipe(&mut self, start_x: f32, start_y: f32, end_x: f32, end_y: f32) -> bool {
        match swipe_direction(Vec2::new(start_x, start_y), Vec2::new(end_x, end_y)) {
            Some(direction) => {
                let events = self.engine.step(direction);
                self.apply(events);
                true
            }
            None => false,
        }
    }

    /// Step toward "UP" / "DOWN" / "LEFT" / "RIGHT" (on-screen buttons)
    pub fn step(&mut self, direction: &str) -> usize {
        match Direction::from_str(direction) {
            Some(direction) => {
                let events = self.engine.step(direction);
                self.apply(events)
            }
            None => 0,
        }
    }

    /// Advance the portal animation by one frame
    pub fn tick(&mut self) {
        let events = self.engine.tick();
        self.apply(events);
    }

    pub fn reset(&mut self) {
        self.sounds.push(SoundEffect::Click);
        self.engine.reset_level();
    }

    pub fn next_level(&mut self) -> bool {
        self.sounds.push(SoundEffect::Click);
        self.engine.advance_to_next_level()
    }

    pub fn load_level(&mut self, index: usize) -> Result<(), JsValue> {
        self.engine
            .load_level(index)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Runtime state as JSON for the renderer
    pub fn snapshot(&self) -> String {
        serde_json::to_string(self.engine.state()).unwrap_or_default()
    }

    /// Cue names queued since the last call, as a JSON array
    pub fn drain_sounds(&mut self) -> String {
        let names: Vec<&str> = self.sounds.drain().iter().map(|s| s.as_str()).collect();
        serde_json::to_string(&names).unwrap_or_default()
    }

    pub fn status(&self) -> String {
        format!("{:?}", self.engine.status())
    }

    pub fn level_count(&self) -> usize {
        self.engine.catalog().len()
    }

    pub fn level_index(&self) -> usize {
        self.engine.level_index()
    }

    pub fn is_last_level(&self) -> bool {
        self.engine.is_last_level()
    }

    pub fn highest_unlocked_level(&self) -> usize {
        self.saver.progress().highest_unlocked_level
    }

    pub fn is_unlocked(&self, index: usize) -> bool {
        self.saver.progress().is_unlocked(index)
    }

    /// Rebind a direction and persist the bindings
    pub fn set_binding(&mut self, direction: &str, key: &str) -> bool {
        match Direction::from_str(direction) {
            Some(direction) => {
                self.settings.controls.set_binding(direction, key);
                self.settings.save_controls(self.saver.storage_mut());
                true
            }
            None => false,
        }
    }

    pub fn music_enabled(&self) -> bool {
        self.settings.music_enabled
    }

    pub fn toggle_music(&mut self) -> bool {
        self.settings.toggle_music(self.saver.storage_mut())
    }
}

impl WebGame {
    /// Fan events out to progress saving and sound cues
    fn apply(&mut self, events: Vec<GameEvent>) -> usize {
        dispatch(&events, &mut [&mut self.saver, &mut self.sounds]);
        events.len()
    }
}

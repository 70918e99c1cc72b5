//! Best-effort persistence for player progress and preferences
//!
//! Values are JSON strings behind a small key/value `Storage` trait:
//! - `MemoryStorage` for tests and headless runs
//! - `FileStorage` (native) writes one `<key>.json` per value
//! - `LocalStorage` (wasm32) uses the browser's LocalStorage
//!
//! Failures are logged and swallowed. Nothing here may change how the
//! simulation behaves.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{EventObserver, GameEvent};

/// Storage key for the highest unlocked level
pub const PROGRESS_KEY: &str = "snake-puzzle-level";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key/value store
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read and decode a JSON value, `None` if missing or malformed
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
    let raw = storage.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed '{}' in storage: {}", key, e);
            None
        }
    }
}

/// Encode and write a JSON value, logging (not returning) failures
pub fn save_json<T: Serialize>(storage: &mut dyn Storage, key: &str, value: &T) -> bool {
    let result = serde_json::to_string(value)
        .map_err(StorageError::from)
        .and_then(|json| storage.set(key, &json));
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Failed to save '{}': {}", key, e);
            false
        }
    }
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON file per key inside a directory (native only)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStorage {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> std::path::PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(key), value)?;
        Ok(())
    }
}

/// Browser LocalStorage (wasm32 only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StorageError::Unavailable)
    }
}

/// Level progression, stored as a bare index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress {
    /// Highest catalog index the player may select
    pub highest_unlocked_level: usize,
}

impl Progress {
    pub fn new(highest_unlocked_level: usize) -> Self {
        Self {
            highest_unlocked_level,
        }
    }

    /// Level select shows every index up to the highest unlocked one
    pub fn is_unlocked(&self, index: usize) -> bool {
        index <= self.highest_unlocked_level
    }

    /// Raise the unlock mark; returns true if it moved
    pub fn unlock(&mut self, index: usize) -> bool {
        if index > self.highest_unlocked_level {
            self.highest_unlocked_level = index;
            true
        } else {
            false
        }
    }

    /// Drop a mark that points outside a catalog of `level_count` levels
    pub fn clamped(self, level_count: usize) -> Self {
        if self.highest_unlocked_level < level_count {
            self
        } else {
            log::warn!(
                "Stored level {} outside catalog of {}, starting from the first level",
                self.highest_unlocked_level,
                level_count
            );
            Self::default()
        }
    }

    /// Load from storage, falling back to level 0
    pub fn load(storage: &dyn Storage, level_count: usize) -> Self {
        match load_json::<Progress>(storage, PROGRESS_KEY) {
            Some(progress) => {
                log::info!(
                    "Loaded progress: level {} unlocked",
                    progress.highest_unlocked_level + 1
                );
                progress.clamped(level_count)
            }
            None => Self::default(),
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        if save_json(storage, PROGRESS_KEY, self) {
            log::info!("Progress saved (level {})", self.highest_unlocked_level + 1);
        }
    }
}

/// Persists progress whenever the engine reports a new unlock
pub struct ProgressSaver<S: Storage> {
    storage: S,
    progress: Progress,
}

impl<S: Storage> ProgressSaver<S> {
    pub fn new(storage: S, progress: Progress) -> Self {
        Self { storage, progress }
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

impl<S: Storage> EventObserver for ProgressSaver<S> {
    fn on_event(&mut self, event: &GameEvent) {
        if let GameEvent::LevelUnlocked { index } = *event {
            if self.progress.unlock(index) {
                self.progress.save(&mut self.storage);
            }
        }
    }
}

//! Level engine
//!
//! Owns the catalog, the current level index, the runtime state of the
//! attempt and the player's progress. Progress is injected at construction
//! and reported back through `GameEvent::LevelUnlocked`; the engine never
//! touches storage itself.

use thiserror::Error;

use super::grid::{Coord, Direction, GridSize};
use super::state::{GameEvent, GameState, GameStatus, PowerUp};
use super::step::{portal_tick, step};
use crate::catalog::{Catalog, Level};
use crate::persistence::Progress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("level index {index} is outside the catalog (0..{len})")]
    InvalidLevelIndex { index: usize, len: usize },
}

/// Single-level simulation driven by direction input and animation ticks
#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Catalog,
    level_index: usize,
    state: GameState,
    progress: Progress,
}

impl Engine {
    /// Start playing `start_level` with previously saved `progress`
    pub fn new(
        catalog: Catalog,
        progress: Progress,
        start_level: usize,
    ) -> Result<Self, EngineError> {
        let level = catalog
            .get(start_level)
            .ok_or(EngineError::InvalidLevelIndex {
                index: start_level,
                len: catalog.len(),
            })?;
        let state = GameState::from_level(level);
        let progress = progress.clamped(catalog.len());
        log::info!("Level {} loaded", state.level_id);

        Ok(Self {
            catalog,
            level_index: start_level,
            state,
            progress,
        })
    }

    /// Replace the current attempt with a fresh one at `index`
    ///
    /// Any in-flight portal animation is discarded.
    pub fn load_level(&mut self, index: usize) -> Result<(), EngineError> {
        let level = self
            .catalog
            .get(index)
            .ok_or(EngineError::InvalidLevelIndex {
                index,
                len: self.catalog.len(),
            })?;
        self.state = GameState::from_level(level);
        self.level_index = index;
        log::info!("Level {} loaded", self.state.level_id);
        Ok(())
    }

    /// Apply one direction intent
    pub fn step(&mut self, direction: Direction) -> Vec<GameEvent> {
        let mut events = step(&mut self.state, direction);

        if events.contains(&GameEvent::EnteredPortal) {
            log::info!("Level {}: entered portal", self.state.level_id);
            let next = self.level_index + 1;
            if next < self.catalog.len() && self.progress.unlock(next) {
                events.push(GameEvent::LevelUnlocked { index: next });
            }
        }

        events
    }

    /// One frame of the portal swallow animation; call every `PORTAL_TICK_MS`
    /// while `status()` is `EnteringPortal`
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let events = portal_tick(&mut self.state);
        if self.state.status == GameStatus::LevelComplete && !events.is_empty() {
            log::info!("Level {} complete", self.state.level_id);
        }
        events
    }

    /// Restart the current level from scratch
    pub fn reset_level(&mut self) {
        if let Err(e) = self.load_level(self.level_index) {
            log::warn!("Reset failed: {}", e);
        }
    }

    /// Move on to the following level; false (no-op) on the last one
    pub fn advance_to_next_level(&mut self) -> bool {
        let next = self.level_index + 1;
        if next >= self.catalog.len() {
            return false;
        }
        self.load_level(next).is_ok()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn level(&self) -> Option<&Level> {
        self.catalog.get(self.level_index)
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level_id(&self) -> u32 {
        self.state.level_id
    }

    pub fn is_last_level(&self) -> bool {
        self.catalog.is_last(self.level_index)
    }

    /// Full runtime state (for renderers and snapshots)
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn grid_size(&self) -> GridSize {
        self.state.grid
    }

    pub fn snake(&self) -> impl Iterator<Item = Coord> + '_ {
        self.state.snake.iter().copied()
    }

    pub fn snake_len(&self) -> usize {
        self.state.snake.len()
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn apples(&self) -> &[Coord] {
        &self.state.apples
    }

    pub fn portal(&self) -> Coord {
        self.state.portal
    }

    pub fn portal_active(&self) -> bool {
        self.state.portal_active()
    }

    pub fn walls(&self) -> &[Coord] {
        &self.state.walls
    }

    pub fn doors(&self) -> &[Coord] {
        &self.state.doors
    }

    pub fn keys(&self) -> &[Coord] {
        &self.state.keys
    }

    pub fn power_ups(&self) -> &[PowerUp] {
        &self.state.power_ups
    }

    /// Every spike cell, raised or not
    pub fn spike_positions(&self) -> &[Coord] {
        self.state
            .spikes
            .as_ref()
            .map(|s| s.positions.as_slice())
            .unwrap_or(&[])
    }

    /// Spike cells that are lethal right now
    pub fn active_spikes(&self) -> &[Coord] {
        self.state.active_spikes()
    }

    pub fn spikes_active(&self) -> bool {
        self.state.spikes_active()
    }

    pub fn move_count(&self) -> u64 {
        self.state.move_count
    }

    pub fn invincibility_turns(&self) -> u32 {
        self.state.invincibility_turns
    }

    pub fn is_invincible(&self) -> bool {
        self.state.is_invincible()
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn highest_unlocked_level(&self) -> usize {
        self.progress.highest_unlocked_level
    }
}

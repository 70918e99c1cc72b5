//! Game state and core simulation types
//!
//! One `GameState` exists per attempt at a level. It is built fresh from a
//! `Level` and replaced wholesale on reset, never patched.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::grid::{Coord, Direction, GridSize};
use crate::catalog::Level;

/// Current phase of an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Accepting direction input
    Playing,
    /// Snake crashed
    GameOver,
    /// Snake is being swallowed by the portal (driven by `tick`)
    EnteringPortal,
    /// Snake fully swallowed
    LevelComplete,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PowerUpKind {
    /// Pass through anything lethal for a few moves
    Invincibility,
    /// Drop two tail segments
    Shrink,
}

/// A power-up lying on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Coord,
}

/// Spike cells sharing one on/off schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleSpikes {
    pub positions: Vec<Coord>,
    pub interval: u32,
    pub offset: u32,
}

impl ToggleSpikes {
    /// Spikes are up when `(move_count + offset) % interval == 0`
    pub fn is_active(&self, move_count: u64) -> bool {
        if self.interval == 0 {
            return false;
        }
        (move_count + self.offset as u64) % self.interval as u64 == 0
    }

    /// True if `cell` holds a spike that is up at `move_count`
    pub fn is_lethal(&self, cell: Coord, move_count: u64) -> bool {
        self.is_active(move_count) && self.positions.contains(&cell)
    }
}

/// What killed the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    OutOfBounds,
    Wall,
    Door,
    Spike,
    SelfCollision,
}

/// Semantic events emitted by a step or tick, in the order they happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    AteApple { pos: Coord },
    CollectedKey { pos: Coord },
    CollectedPowerUp { kind: PowerUpKind },
    Died { cause: DeathCause },
    EnteredPortal,
    /// A new highest level became available (catalog index)
    LevelUnlocked { index: usize },
    LevelCompleted,
}

/// Runtime state of one level attempt (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Catalog id of the level being played
    pub level_id: u32,
    pub grid: GridSize,
    /// Head first
    pub snake: VecDeque<Coord>,
    pub direction: Direction,
    pub apples: Vec<Coord>,
    pub portal: Coord,
    pub walls: Vec<Coord>,
    pub doors: Vec<Coord>,
    pub keys: Vec<Coord>,
    pub power_ups: Vec<PowerUp>,
    pub spikes: Option<ToggleSpikes>,
    /// Committed steps so far (drives the spike schedule)
    pub move_count: u64,
    /// Remaining invincible steps
    pub invincibility_turns: u32,
    pub status: GameStatus,
}

impl GameState {
    /// Fresh state for the start of `level`
    pub fn from_level(level: &Level) -> Self {
        let cells = |positions: &[crate::catalog::Position]| -> Vec<Coord> {
            positions.iter().map(|&p| p.into()).collect()
        };

        Self {
            level_id: level.level_id,
            grid: level.grid_size,
            snake: level.initial_body(),
            direction: level.initial_snake_position.direction,
            apples: cells(&level.apple_positions),
            portal: level.portal_position.into(),
            walls: cells(&level.wall_positions),
            doors: cells(&level.door_positions),
            keys: cells(&level.key_positions),
            power_ups: level
                .power_ups
                .iter()
                .map(|p| PowerUp {
                    kind: p.kind,
                    pos: p.position.into(),
                })
                .collect(),
            spikes: level.toggle_spikes.as_ref().map(|s| ToggleSpikes {
                positions: cells(&s.positions),
                interval: s.interval,
                offset: s.offset,
            }),
            move_count: 0,
            invincibility_turns: 0,
            status: GameStatus::Playing,
        }
    }

    pub fn head(&self) -> Option<Coord> {
        self.snake.front().copied()
    }

    /// The portal opens once every apple is eaten
    pub fn portal_active(&self) -> bool {
        self.apples.is_empty()
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_turns > 0
    }

    /// Whether the spike schedule is in its lethal phase right now
    pub fn spikes_active(&self) -> bool {
        self.spikes
            .as_ref()
            .is_some_and(|s| s.is_active(self.move_count))
    }

    /// Spike cells that would kill the snake on the next step
    pub fn active_spikes(&self) -> &[Coord] {
        match &self.spikes {
            Some(spikes) if spikes.is_active(self.move_count) => &spikes.positions,
            _ => &[],
        }
    }
}

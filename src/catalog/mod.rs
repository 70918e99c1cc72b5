//! Level catalog
//!
//! Static, ordered level definitions. The built-in catalog is embedded from
//! `assets/levels.json` and validated once when parsed; the simulation only
//! ever reads from it.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{Coord, Direction, GridSize, PowerUpKind};

const BUILTIN_LEVELS: &str = include_str!("../../assets/levels.json");

/// A board cell as written in level data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<Position> for Coord {
    fn from(p: Position) -> Self {
        Coord::new(p.x, p.y)
    }
}

impl From<Coord> for Position {
    fn from(c: Coord) -> Self {
        Self { x: c.x, y: c.y }
    }
}

/// Where the snake starts and how long it is
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnakeStart {
    pub start: Position,
    pub direction: Direction,
    pub length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpSpawn {
    #[serde(rename = "type")]
    pub kind: PowerUpKind,
    pub position: Position,
}

/// Periodic spikes: lethal when `(moves + offset) % interval == 0`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleSpikesSpec {
    pub positions: Vec<Position>,
    pub interval: u32,
    #[serde(default)]
    pub offset: u32,
}

/// One level definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub level_id: u32,
    pub grid_size: GridSize,
    pub initial_snake_position: SnakeStart,
    #[serde(default)]
    pub apple_positions: Vec<Position>,
    pub portal_position: Position,
    #[serde(default)]
    pub wall_positions: Vec<Position>,
    #[serde(default)]
    pub door_positions: Vec<Position>,
    #[serde(default)]
    pub key_positions: Vec<Position>,
    #[serde(default)]
    pub power_ups: Vec<PowerUpSpawn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toggle_spikes: Option<ToggleSpikesSpec>,
}

/// A level record that cannot be played
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level {level_id}: grid {width}x{height} must have positive dimensions")]
    EmptyGrid {
        level_id: u32,
        width: i32,
        height: i32,
    },
    #[error("level {level_id}: snake start ({x}, {y}) is outside the grid")]
    StartOutOfBounds { level_id: u32, x: i32, y: i32 },
    #[error("level {level_id}: portal ({x}, {y}) is outside the grid")]
    PortalOutOfBounds { level_id: u32, x: i32, y: i32 },
    #[error("level {level_id}: snake length must be at least 1")]
    ZeroLength { level_id: u32 },
    #[error("level {level_id}: spike interval must be positive")]
    ZeroSpikeInterval { level_id: u32 },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse level data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level at index {index} is invalid: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: LevelError,
    },
    #[error("level catalog is empty")]
    Empty,
}

impl Level {
    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), LevelError> {
        let level_id = self.level_id;
        let grid = self.grid_size;
        if !grid.is_valid() {
            return Err(LevelError::EmptyGrid {
                level_id,
                width: grid.width,
                height: grid.height,
            });
        }

        let snake = &self.initial_snake_position;
        if snake.length == 0 {
            return Err(LevelError::ZeroLength { level_id });
        }
        if !grid.contains(snake.start.into()) {
            return Err(LevelError::StartOutOfBounds {
                level_id,
                x: snake.start.x,
                y: snake.start.y,
            });
        }

        let portal = self.portal_position;
        if !grid.contains(portal.into()) {
            return Err(LevelError::PortalOutOfBounds {
                level_id,
                x: portal.x,
                y: portal.y,
            });
        }

        if let Some(spikes) = &self.toggle_spikes {
            if spikes.interval == 0 {
                return Err(LevelError::ZeroSpikeInterval { level_id });
            }
        }

        Ok(())
    }

    /// Starting body, head first. Segments trail behind the start cell,
    /// opposite to the initial facing, and may run off the board.
    pub fn initial_body(&self) -> VecDeque<Coord> {
        let SnakeStart {
            start,
            direction,
            length,
        } = self.initial_snake_position;
        let behind = direction.opposite().delta();
        let start = Coord::from(start);
        (0..length as i32).map(|i| start + behind * i).collect()
    }
}

/// Ordered, validated level list
#[derive(Debug, Clone)]
pub struct Catalog {
    levels: Vec<Level>,
}

impl Catalog {
    /// Validate and wrap a list of levels
    pub fn new(levels: Vec<Level>) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, level) in levels.iter().enumerate() {
            level.validate().map_err(|source| {
                log::warn!("Rejecting level catalog: {}", source);
                CatalogError::Invalid { index, source }
            })?;
        }
        Ok(Self { levels })
    }

    /// Parse a JSON array of level records
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let levels: Vec<Level> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    /// The levels shipped with the game
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_LEVELS)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// True if `index` is the final level
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 == self.levels.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_json(extra: &str) -> String {
        format!(
            r#"{{
                "level_id": 7,
                "grid_size": {{ "width": 10, "height": 10 }},
                "initial_snake_position": {{ "start": {{ "x": 5, "y": 8 }}, "direction": "UP", "length": 3 }},
                "apple_positions": [{{ "x": 5, "y": 4 }}],
                "portal_position": {{ "x": 5, "y": 1 }}{}
            }}"#,
            extra
        )
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 30);
        for (i, level) in catalog.levels().iter().enumerate() {
            assert_eq!(level.level_id as usize, i + 1);
        }
        assert!(catalog.is_last(29));
        assert!(!catalog.is_last(0));
    }

    #[test]
    fn test_optional_fields_default() {
        let level: Level = serde_json::from_str(&level_json("")).unwrap();
        assert!(level.wall_positions.is_empty());
        assert!(level.door_positions.is_empty());
        assert!(level.key_positions.is_empty());
        assert!(level.power_ups.is_empty());
        assert!(level.toggle_spikes.is_none());
        assert!(level.validate().is_ok());
    }

    #[test]
    fn test_spike_offset_defaults_to_zero() {
        let level: Level = serde_json::from_str(&level_json(
            r#", "toggle_spikes": { "positions": [{ "x": 1, "y": 1 }], "interval": 3 }"#,
        ))
        .unwrap();
        let spikes = level.toggle_spikes.unwrap();
        assert_eq!(spikes.interval, 3);
        assert_eq!(spikes.offset, 0);
    }

    #[test]
    fn test_power_up_type_field() {
        let level: Level = serde_json::from_str(&level_json(
            r#", "power_ups": [{ "type": "SHRINK", "position": { "x": 2, "y": 2 } }]"#,
        ))
        .unwrap();
        assert_eq!(level.power_ups[0].kind, PowerUpKind::Shrink);
        assert_eq!(level.power_ups[0].position, Position::new(2, 2));
    }

    #[test]
    fn test_initial_body_trails_behind_start() {
        let mut level: Level = serde_json::from_str(&level_json("")).unwrap();
        let body: Vec<_> = level.initial_body().into_iter().collect();
        assert_eq!(
            body,
            vec![Coord::new(5, 8), Coord::new(5, 9), Coord::new(5, 10)]
        );

        level.initial_snake_position.direction = Direction::Right;
        level.initial_snake_position.start = Position::new(2, 1);
        let body: Vec<_> = level.initial_body().into_iter().collect();
        assert_eq!(
            body,
            vec![Coord::new(2, 1), Coord::new(1, 1), Coord::new(0, 1)]
        );
    }

    #[test]
    fn test_validation_rejects_bad_levels() {
        let mut level: Level = serde_json::from_str(&level_json("")).unwrap();
        level.grid_size = GridSize::new(0, 10);
        assert!(matches!(level.validate(), Err(LevelError::EmptyGrid { .. })));

        let mut level: Level = serde_json::from_str(&level_json("")).unwrap();
        level.initial_snake_position.start = Position::new(5, 10);
        assert_eq!(
            level.validate(),
            Err(LevelError::StartOutOfBounds {
                level_id: 7,
                x: 5,
                y: 10
            })
        );

        let mut level: Level = serde_json::from_str(&level_json("")).unwrap();
        level.portal_position = Position::new(-1, 0);
        assert!(matches!(
            level.validate(),
            Err(LevelError::PortalOutOfBounds { .. })
        ));

        let mut level: Level = serde_json::from_str(&level_json("")).unwrap();
        level.initial_snake_position.length = 0;
        assert_eq!(level.validate(), Err(LevelError::ZeroLength { level_id: 7 }));

        let level: Level = serde_json::from_str(&level_json(
            r#", "toggle_spikes": { "positions": [], "interval": 0 }"#,
        ))
        .unwrap();
        assert_eq!(
            level.validate(),
            Err(LevelError::ZeroSpikeInterval { level_id: 7 })
        );
    }

    #[test]
    fn test_catalog_reports_failing_index() {
        let good: Level = serde_json::from_str(&level_json("")).unwrap();
        let mut bad = good.clone();
        bad.portal_position = Position::new(10, 10);
        let err = Catalog::new(vec![good, bad]).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { index: 1, .. }));

        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
        assert!(matches!(
            Catalog::from_json("not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}

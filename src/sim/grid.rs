//! Grid primitives: coordinates, bounds and facing
//!
//! x grows to the right, y grows downward. Coordinates are plain `IVec2`
//! so a head can be projected outside the board and tested against bounds.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A cell on the board (0-indexed)
pub type Coord = IVec2;

/// Board dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: i32,
    pub height: i32,
}

impl GridSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Both dimensions are positive
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// True if the cell lies on the board
    #[inline]
    pub fn contains(&self, cell: Coord) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }
}

/// Snake facing / movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// One-cell offset for this direction (UP is negative y)
    #[inline]
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "UP" | "U" => Some(Direction::Up),
            "DOWN" | "D" => Some(Direction::Down),
            "LEFT" | "L" => Some(Direction::Left),
            "RIGHT" | "R" => Some(Direction::Right),
            _ => None,
        }
    }
}

//! Turning raw key presses and swipes into direction intents

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_SWIPE_DISTANCE;
use crate::sim::Direction;

/// Key binding per direction (key names as reported by the browser)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct Controls {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            up: "ArrowUp".to_string(),
            down: "ArrowDown".to_string(),
            left: "ArrowLeft".to_string(),
            right: "ArrowRight".to_string(),
        }
    }
}

impl Controls {
    pub fn binding(&self, direction: Direction) -> &str {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    pub fn set_binding(&mut self, direction: Direction, key: impl Into<String>) {
        let key = key.into();
        match direction {
            Direction::Up => self.up = key,
            Direction::Down => self.down = key,
            Direction::Left => self.left = key,
            Direction::Right => self.right = key,
        }
    }

    /// Every direction has a non-empty key
    pub fn is_complete(&self) -> bool {
        Direction::ALL
            .iter()
            .all(|&d| !self.binding(d).is_empty())
    }

    /// Resolve a key press: custom bindings first, then WASD
    pub fn direction_for_key(&self, key: &str) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.binding(d) == key)
            .or(match key {
                "w" => Some(Direction::Up),
                "s" => Some(Direction::Down),
                "a" => Some(Direction::Left),
                "d" => Some(Direction::Right),
                _ => None,
            })
    }
}

/// Direction of a touch swipe from `start` to `end` (screen coordinates)
///
/// The dominant axis wins and must travel more than `MIN_SWIPE_DISTANCE`.
pub fn swipe_direction(start: Vec2, end: Vec2) -> Option<Direction> {
    let travel = start - end;
    if travel.x.abs() > travel.y.abs() {
        if travel.x.abs() <= MIN_SWIPE_DISTANCE {
            return None;
        }
        Some(if travel.x > 0.0 {
            Direction::Left
        } else {
            Direction::Right
        })
    } else {
        if travel.y.abs() <= MIN_SWIPE_DISTANCE {
            return None;
        }
        Some(if travel.y > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_arrow_keys() {
        let controls = Controls::default();
        assert_eq!(controls.direction_for_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(controls.direction_for_key("ArrowRight"), Some(Direction::Right));
        assert_eq!(controls.direction_for_key("a"), Some(Direction::Left));
        assert_eq!(controls.direction_for_key("Enter"), None);
    }

    #[test]
    fn test_custom_binding_wins() {
        let mut controls = Controls::default();
        controls.set_binding(Direction::Up, "i");
        controls.set_binding(Direction::Down, "w");
        assert_eq!(controls.direction_for_key("i"), Some(Direction::Up));
        // Custom binding shadows the WASD fallback
        assert_eq!(controls.direction_for_key("w"), Some(Direction::Down));
        assert_eq!(controls.direction_for_key("ArrowUp"), None);
        assert!(controls.is_complete());

        controls.set_binding(Direction::Left, "");
        assert!(!controls.is_complete());
    }

    #[test]
    fn test_controls_serialize_by_direction_name() {
        let json = serde_json::to_string(&Controls::default()).unwrap();
        assert!(json.contains("\"UP\":\"ArrowUp\""));
        let parsed: Controls = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Controls::default());
    }

    #[test]
    fn test_swipes() {
        let origin = Vec2::new(100.0, 100.0);
        assert_eq!(
            swipe_direction(origin, Vec2::new(40.0, 110.0)),
            Some(Direction::Left)
        );
        assert_eq!(
            swipe_direction(origin, Vec2::new(160.0, 90.0)),
            Some(Direction::Right)
        );
        assert_eq!(
            swipe_direction(origin, Vec2::new(105.0, 20.0)),
            Some(Direction::Up)
        );
        assert_eq!(
            swipe_direction(origin, Vec2::new(95.0, 180.0)),
            Some(Direction::Down)
        );
        // Too short to count
        assert_eq!(swipe_direction(origin, Vec2::new(120.0, 100.0)), None);
        assert_eq!(swipe_direction(origin, origin), None);
    }
}

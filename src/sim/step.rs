//! Discrete simulation step
//!
//! Processing order for one move:
//!   1. Reversal filtering
//!   2. Head projection
//!   3. Fatal collisions (bounds -> wall -> door -> spike -> self), skipped while invincible
//!   4. Apple (grow) or tail pop
//!   5. Key (opens every door)
//!   6. Power-up
//!   7. Portal (ends the step, body unchanged)
//!   8. Commit body, direction and counters
//!
//! The snake is built on a copy and only published by a plain move, so a
//! crash or a portal entry leaves the body exactly as it was.

use super::grid::{Coord, Direction};
use super::state::{DeathCause, GameEvent, GameState, GameStatus, PowerUpKind};
use crate::consts::{INVINCIBILITY_DURATION, SHRINK_AMOUNT, SHRINK_MIN_LENGTH};

/// Advance the attempt by one move toward `requested`
///
/// No-op (empty event list) unless the attempt is `Playing`.
pub fn step(state: &mut GameState, requested: Direction) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.status != GameStatus::Playing {
        return events;
    }
    let Some(head) = state.head() else {
        return events;
    };

    // Can't fold back into the neck
    let direction = if requested.is_opposite(state.direction) {
        state.direction
    } else {
        requested
    };
    let new_head = head + direction.delta();
    let invincible = state.is_invincible();
    let grows = state.apples.contains(&new_head);

    if !invincible {
        if let Some(cause) = fatal_collision(state, new_head, grows) {
            log::debug!(
                "Level {}: died ({:?}) at ({}, {}) after {} moves",
                state.level_id,
                cause,
                new_head.x,
                new_head.y,
                state.move_count
            );
            state.status = GameStatus::GameOver;
            events.push(GameEvent::Died { cause });
            return events;
        }
    }

    let mut snake = state.snake.clone();
    snake.push_front(new_head);

    if let Some(i) = state.apples.iter().position(|&a| a == new_head) {
        state.apples.remove(i);
        events.push(GameEvent::AteApple { pos: new_head });
    } else {
        snake.pop_back();
    }

    if let Some(i) = state.keys.iter().position(|&k| k == new_head) {
        state.keys.remove(i);
        // One key opens every door
        state.doors.clear();
        events.push(GameEvent::CollectedKey { pos: new_head });
    }

    if let Some(i) = state.power_ups.iter().position(|p| p.pos == new_head) {
        let power_up = state.power_ups.remove(i);
        match power_up.kind {
            PowerUpKind::Invincibility => {
                state.invincibility_turns = INVINCIBILITY_DURATION;
            }
            PowerUpKind::Shrink => {
                if snake.len() >= SHRINK_MIN_LENGTH + SHRINK_AMOUNT {
                    snake.truncate(snake.len() - SHRINK_AMOUNT);
                }
            }
        }
        log::debug!("Level {}: picked up {:?}", state.level_id, power_up.kind);
        events.push(GameEvent::CollectedPowerUp {
            kind: power_up.kind,
        });
    }

    if state.portal_active() && new_head == state.portal {
        state.status = GameStatus::EnteringPortal;
        events.push(GameEvent::EnteredPortal);
        return events;
    }

    state.snake = snake;
    state.direction = direction;
    state.move_count += 1;
    if invincible {
        state.invincibility_turns = state.invincibility_turns.saturating_sub(1);
    }

    events
}

/// First lethal obstacle at `new_head`, checked against the pre-step body
///
/// The old tail is vacated this step unless the snake grows, so chasing the
/// tail is legal.
fn fatal_collision(state: &GameState, new_head: Coord, grows: bool) -> Option<DeathCause> {
    if !state.grid.contains(new_head) {
        return Some(DeathCause::OutOfBounds);
    }
    if state.walls.contains(&new_head) {
        return Some(DeathCause::Wall);
    }
    if state.doors.contains(&new_head) {
        return Some(DeathCause::Door);
    }
    if state
        .spikes
        .as_ref()
        .is_some_and(|s| s.is_lethal(new_head, state.move_count))
    {
        return Some(DeathCause::Spike);
    }

    let body_len = if grows {
        state.snake.len()
    } else {
        state.snake.len().saturating_sub(1)
    };
    if state.snake.iter().take(body_len).any(|&seg| seg == new_head) {
        return Some(DeathCause::SelfCollision);
    }

    None
}

/// Advance the portal swallow animation by one tick
///
/// Removes the head segment; once the body is gone the level is complete.
/// No-op unless the attempt is `EnteringPortal`.
pub fn portal_tick(state: &mut GameState) -> Vec<GameEvent> {
    if state.status != GameStatus::EnteringPortal {
        return Vec::new();
    }

    state.snake.pop_front();
    if state.snake.is_empty() {
        state.status = GameStatus::LevelComplete;
        return vec![GameEvent::LevelCompleted];
    }
    Vec::new()
}

//! Plays built-in levels end to end through the public engine API

use snake_puzzle::audio::{SoundEffect, SoundQueue};
use snake_puzzle::persistence::{MemoryStorage, PROGRESS_KEY, Progress, ProgressSaver, Storage};
use snake_puzzle::sim::{
    Coord, DeathCause, Direction, Engine, GameEvent, GameStatus, PowerUpKind, dispatch,
};
use snake_puzzle::Catalog;

fn engine_at(level_number: usize) -> Engine {
    Engine::new(
        Catalog::builtin().expect("built-in catalog"),
        Progress::default(),
        level_number - 1,
    )
    .expect("level exists")
}

fn play(engine: &mut Engine, moves: &str) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for ch in moves.chars() {
        let direction = Direction::from_str(&ch.to_string()).expect("valid move");
        events.extend(engine.step(direction));
    }
    events
}

fn finish_portal(engine: &mut Engine) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let mut ticks = 0;
    while engine.status() == GameStatus::EnteringPortal {
        events.extend(engine.tick());
        ticks += 1;
        assert!(ticks < 1000, "portal animation never finished");
    }
    events
}

#[test]
fn level_1_complete_run() {
    let mut engine = engine_at(1);
    let events = play(&mut engine, "UUUUUUU");
    assert_eq!(
        events,
        vec![
            GameEvent::AteApple {
                pos: Coord::new(5, 4)
            },
            GameEvent::EnteredPortal,
            GameEvent::LevelUnlocked { index: 1 },
        ]
    );

    // The winning move is not committed: the head stops short of the portal at (5,1)
    assert_eq!(
        engine.snake().collect::<Vec<_>>(),
        vec![
            Coord::new(5, 2),
            Coord::new(5, 3),
            Coord::new(5, 4),
            Coord::new(5, 5)
        ]
    );
    assert_eq!(engine.move_count(), 6);

    let length_at_portal = engine.snake_len();
    let mut ticks = 0;
    let mut completed = Vec::new();
    while engine.status() == GameStatus::EnteringPortal {
        completed.extend(engine.tick());
        ticks += 1;
    }
    assert_eq!(ticks, length_at_portal);
    assert_eq!(completed, vec![GameEvent::LevelCompleted]);
    assert_eq!(engine.status(), GameStatus::LevelComplete);

    assert!(engine.advance_to_next_level());
    assert_eq!(engine.level_id(), 2);
    assert_eq!(engine.status(), GameStatus::Playing);
}

#[test]
fn level_6_door_blocks_until_key() {
    let mut engine = engine_at(6);
    // Straight at the door at (5,3); the closed portal at (5,1) is walkable
    let events = play(&mut engine, "RRRRDD");
    assert_eq!(
        events,
        vec![GameEvent::Died {
            cause: DeathCause::Door
        }]
    );
    assert_eq!(engine.status(), GameStatus::GameOver);

    engine.reset_level();
    assert_eq!(engine.doors().len(), 2);

    let events = play(&mut engine, "RRRRRRR");
    assert_eq!(
        events,
        vec![GameEvent::CollectedKey {
            pos: Coord::new(8, 1)
        }]
    );
    assert!(engine.keys().is_empty());
    assert!(engine.doors().is_empty());

    // Apple at (8,8), then back up through the opened doorway to the portal
    let events = play(&mut engine, "DDDDDDDLLLUUUUUUU");
    assert!(events.contains(&GameEvent::AteApple {
        pos: Coord::new(8, 8)
    }));
    assert!(events.contains(&GameEvent::EnteredPortal));
    assert_eq!(
        finish_portal(&mut engine),
        vec![GameEvent::LevelCompleted]
    );
}

#[test]
fn level_11_spike_timing() {
    // Reaching the spike at (5,5) on move 3 finds it retracted
    let mut engine = engine_at(11);
    let events = play(&mut engine, "UUUUUURRRDDD");
    assert_eq!(
        events,
        vec![
            GameEvent::AteApple {
                pos: Coord::new(5, 2)
            },
            GameEvent::EnteredPortal,
            GameEvent::LevelUnlocked { index: 11 },
        ]
    );

    // Detour so the head arrives when (moves % 3 == 0)
    let mut engine = engine_at(11);
    let events = play(&mut engine, "RRUULL");
    assert!(events.is_empty());
    assert_eq!(engine.move_count(), 6);
    assert!(engine.spikes_active());
    assert_eq!(engine.active_spikes(), &[Coord::new(5, 5)]);

    let before: Vec<_> = engine.snake().collect();
    let events = engine.step(Direction::Up);
    assert_eq!(
        events,
        vec![GameEvent::Died {
            cause: DeathCause::Spike
        }]
    );
    assert_eq!(engine.snake().collect::<Vec<_>>(), before);
}

#[test]
fn level_16_invincibility_wears_off() {
    let mut engine = engine_at(16);
    let events = play(&mut engine, "RDDDDRRR");
    assert_eq!(
        events,
        vec![GameEvent::CollectedPowerUp {
            kind: PowerUpKind::Invincibility
        }]
    );
    assert_eq!(engine.invincibility_turns(), 5);

    // Last invincible move lands on the wall at (3,2)
    play(&mut engine, "UULUL");
    assert_eq!(engine.status(), GameStatus::Playing);
    assert_eq!(engine.snake().next(), Some(Coord::new(3, 2)));
    assert_eq!(engine.invincibility_turns(), 0);
    assert!(!engine.is_invincible());

    // The wall at (3,1) is lethal again
    let events = engine.step(Direction::Up);
    assert_eq!(
        events,
        vec![GameEvent::Died {
            cause: DeathCause::Wall
        }]
    );
}

#[test]
fn level_16_complete_run() {
    let mut engine = engine_at(16);
    let events = play(&mut engine, "RDDDDRRRRRRUUUURDDDDDDDL");
    assert!(events.contains(&GameEvent::EnteredPortal));
    assert_eq!(engine.status(), GameStatus::EnteringPortal);
}

#[test]
fn level_17_shrink_then_finish() {
    let mut engine = engine_at(17);
    assert_eq!(engine.snake_len(), 8);
    let events = play(&mut engine, "UUU");
    assert_eq!(
        events,
        vec![GameEvent::CollectedPowerUp {
            kind: PowerUpKind::Shrink
        }]
    );
    assert_eq!(engine.snake_len(), 6);

    play(&mut engine, "LLLUL");
    assert_eq!(engine.snake_len(), 7);
    assert!(engine.portal_active());

    let events = play(&mut engine, "DDDDDDDRRRRRRR");
    assert_eq!(events.last(), Some(&GameEvent::LevelUnlocked { index: 17 }));
    assert_eq!(
        finish_portal(&mut engine),
        vec![GameEvent::LevelCompleted]
    );
}

#[test]
fn observers_receive_progress_and_sounds() {
    let mut engine = engine_at(1);
    let mut saver = ProgressSaver::new(MemoryStorage::new(), engine.progress());
    let mut sounds = SoundQueue::new();

    let events = play(&mut engine, "UUUUUUU");
    dispatch(&events, &mut [&mut saver, &mut sounds]);
    let events = finish_portal(&mut engine);
    dispatch(&events, &mut [&mut saver, &mut sounds]);

    assert_eq!(saver.progress().highest_unlocked_level, 1);
    assert_eq!(saver.storage().get(PROGRESS_KEY).as_deref(), Some("1"));
    assert_eq!(
        sounds.drain(),
        vec![SoundEffect::Eat, SoundEffect::LevelComplete]
    );
}

#[test]
fn saved_progress_feeds_next_session() {
    let mut storage = MemoryStorage::new();
    Progress::new(7).save(&mut storage);

    let catalog = Catalog::builtin().unwrap();
    let progress = Progress::load(&storage, catalog.len());
    let engine = Engine::new(catalog, progress, progress.highest_unlocked_level).unwrap();
    assert_eq!(engine.level_id(), 8);
    assert_eq!(engine.highest_unlocked_level(), 7);
}

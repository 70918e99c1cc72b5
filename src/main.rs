//! Snake Puzzle entry point
//!
//! Native: headless runner that replays a move string against a level.
//! Web: the browser host lives in `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
use anyhow::{Context, bail};
#[cfg(not(target_arch = "wasm32"))]
use snake_puzzle::audio::{SoundEffect, SoundQueue};
#[cfg(not(target_arch = "wasm32"))]
use snake_puzzle::persistence::{FileStorage, Progress, ProgressSaver};
#[cfg(not(target_arch = "wasm32"))]
use snake_puzzle::sim::{Direction, Engine, GameStatus, dispatch};
#[cfg(not(target_arch = "wasm32"))]
use snake_puzzle::Catalog;

#[cfg(not(target_arch = "wasm32"))]
const USAGE: &str = "usage: snake-puzzle <level-number> <moves>\n\
                     moves is a string over U, D, L, R (e.g. UULLD)";

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Snake Puzzle (native) starting...");

    let mut args = std::env::args().skip(1);
    let (Some(level_arg), Some(moves)) = (args.next(), args.next()) else {
        bail!(USAGE);
    };
    let level_number: usize = level_arg
        .parse()
        .with_context(|| format!("invalid level number '{}'", level_arg))?;
    if level_number == 0 {
        bail!("level numbers start at 1");
    }

    let catalog = Catalog::builtin().context("built-in level catalog is broken")?;
    let storage = FileStorage::new(".snake-puzzle");
    let progress = Progress::load(&storage, catalog.len());
    let mut engine = Engine::new(catalog, progress, level_number - 1)?;
    let mut saver = ProgressSaver::new(storage, progress);
    let mut sounds = SoundQueue::new();
    sounds.push(SoundEffect::GameStart);

    for (i, ch) in moves.chars().enumerate() {
        let Some(direction) = Direction::from_str(&ch.to_string()) else {
            bail!("unknown move '{}' at position {}", ch, i + 1);
        };
        let events = engine.step(direction);
        for event in &events {
            println!("move {:>3} {:<5} {:?}", i + 1, direction.as_str(), event);
        }
        dispatch(&events, &mut [&mut saver, &mut sounds]);
        if engine.status() != GameStatus::Playing {
            break;
        }
    }

    while engine.status() == GameStatus::EnteringPortal {
        let events = engine.tick();
        for event in &events {
            println!("portal      {:?}", event);
        }
        dispatch(&events, &mut [&mut saver, &mut sounds]);
    }

    let cues: Vec<&str> = sounds.drain().iter().map(|s| s.as_str()).collect();
    println!(
        "level {} -> {:?} after {} moves (sounds: {})",
        engine.level_id(),
        engine.status(),
        engine.move_count(),
        cues.join(", ")
    );
    println!(
        "highest unlocked level: {}",
        saver.progress().highest_unlocked_level + 1
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is platform::web::start
}

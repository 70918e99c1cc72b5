//! Sound cues for simulation events
//!
//! Playback belongs to the platform layer; this module only decides which
//! cue a given event should trigger and queues it for the player.

use crate::sim::{EventObserver, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Apple eaten
    Eat,
    /// Snake crashed
    GameOver,
    /// Key picked up (doors open)
    CollectKey,
    /// Power-up picked up
    PowerUp,
    /// Snake fully swallowed by the portal
    LevelComplete,
    /// Menu button press
    Click,
    /// Leaving the welcome screen
    GameStart,
}

impl SoundEffect {
    /// Asset name used by the web front end
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Eat => "eat",
            SoundEffect::GameOver => "gameOver",
            SoundEffect::CollectKey => "collectKey",
            SoundEffect::PowerUp => "powerUp",
            SoundEffect::LevelComplete => "levelComplete",
            SoundEffect::Click => "click",
            SoundEffect::GameStart => "gameStart",
        }
    }

    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::AteApple { .. } => Some(SoundEffect::Eat),
            GameEvent::CollectedKey { .. } => Some(SoundEffect::CollectKey),
            GameEvent::CollectedPowerUp { .. } => Some(SoundEffect::PowerUp),
            GameEvent::Died { .. } => Some(SoundEffect::GameOver),
            GameEvent::LevelCompleted => Some(SoundEffect::LevelComplete),
            GameEvent::EnteredPortal | GameEvent::LevelUnlocked { .. } => None,
        }
    }
}

/// Collects cues as events arrive; the platform drains and plays them
#[derive(Debug, Default)]
pub struct SoundQueue {
    pending: Vec<SoundEffect>,
    muted: bool,
}

impl SoundQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.pending.clear();
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Queue a cue that isn't tied to a simulation event (menus)
    pub fn push(&mut self, effect: SoundEffect) {
        if !self.muted {
            self.pending.push(effect);
        }
    }

    /// Take everything queued since the last drain
    pub fn drain(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.pending)
    }
}

impl EventObserver for SoundQueue {
    fn on_event(&mut self, event: &GameEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.push(effect);
        }
    }
}

//! Event fan-out to presentation collaborators (audio, persistence, UI)

use super::state::GameEvent;

/// Reacts to simulation events after a step or tick has been committed
pub trait EventObserver {
    fn on_event(&mut self, event: &GameEvent);
}

/// Hand every event, in order, to every observer
pub fn dispatch(events: &[GameEvent], observers: &mut [&mut dyn EventObserver]) {
    for event in events {
        for observer in observers.iter_mut() {
            observer.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<GameEvent>);

    impl EventObserver for Recorder {
        fn on_event(&mut self, event: &GameEvent) {
            self.0.push(*event);
        }
    }

    #[test]
    fn test_dispatch_reaches_all_observers_in_order() {
        let mut a = Recorder::default();
        let mut b = Recorder::default();
        let events = [GameEvent::EnteredPortal, GameEvent::LevelCompleted];
        dispatch(&events, &mut [&mut a, &mut b]);
        assert_eq!(a.0, events);
        assert_eq!(b.0, events);
    }
}

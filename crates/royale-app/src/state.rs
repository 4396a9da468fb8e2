//! Application state shared between the driver and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use royale_core::commands::PlayerCommand;
use royale_core::state::MatchSnapshot;

/// Commands sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the battle engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Unread events kept for a driver that stops polling; oldest are dropped first.
pub const MAX_UNREAD_EVENTS: usize = 4096;

/// Latest snapshot published by the game loop.
pub type SharedSnapshot = Arc<Mutex<Option<MatchSnapshot>>>;

/// Driver-side handles to a running game loop.
///
/// `mpsc::Sender` is not `Sync`, so it sits behind a `Mutex` like the
/// snapshot does.
pub struct AppState {
    /// `None` until the loop is spawned.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    pub latest_snapshot: SharedSnapshot,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a player command. Returns false if the loop is gone.
    pub fn send(&self, command: PlayerCommand) -> bool {
        let Ok(lock) = self.command_tx.lock() else {
            return false;
        };
        match lock.as_ref() {
            Some(tx) => tx.send(GameLoopCommand::PlayerCommand(command)).is_ok(),
            None => false,
        }
    }

    /// Latest snapshot, carrying every event published since the previous poll.
    pub fn poll(&self) -> Option<MatchSnapshot> {
        take_snapshot(&self.latest_snapshot)
    }
}

/// Replace the shared snapshot, keeping events the driver has not read yet.
pub fn publish_snapshot(shared: &SharedSnapshot, mut snapshot: MatchSnapshot) {
    let Ok(mut lock) = shared.lock() else {
        return;
    };
    if let Some(previous) = lock.take() {
        let mut events = previous.events;
        events.append(&mut snapshot.events);
        if events.len() > MAX_UNREAD_EVENTS {
            events.drain(..events.len() - MAX_UNREAD_EVENTS);
        }
        snapshot.events = events;
    }
    *lock = Some(snapshot);
}

/// Clone the shared snapshot and mark its events as read.
pub fn take_snapshot(shared: &SharedSnapshot) -> Option<MatchSnapshot> {
    let mut lock = shared.lock().ok()?;
    let current = lock.as_mut()?;
    let snapshot = current.clone();
    current.events.clear();
    Some(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use royale_core::enums::Team;
    use royale_core::events::BattleEvent;
    use royale_core::types::EntityId;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.poll().is_none());
        assert!(!state.send(PlayerCommand::Pause), "no loop to send to");
    }

    #[test]
    fn test_send_reaches_channel() {
        let state = AppState::new();
        let (tx, rx) = mpsc::channel();
        *state.command_tx.lock().unwrap() = Some(tx);

        assert!(state.send(PlayerCommand::Resume));
        assert!(matches!(
            rx.try_recv(),
            Ok(GameLoopCommand::PlayerCommand(PlayerCommand::Resume))
        ));
    }

    fn event(id: u32) -> BattleEvent {
        BattleEvent::UnitDestroyed {
            id: EntityId(id),
            team: Team::Enemy,
        }
    }

    fn snapshot_with(events: Vec<BattleEvent>) -> MatchSnapshot {
        MatchSnapshot {
            events,
            ..Default::default()
        }
    }

    #[test]
    fn test_unread_events_survive_republish() {
        let state = AppState::new();
        publish_snapshot(&state.latest_snapshot, snapshot_with(vec![event(1)]));
        publish_snapshot(&state.latest_snapshot, snapshot_with(vec![]));
        publish_snapshot(&state.latest_snapshot, snapshot_with(vec![event(2)]));

        let polled = state.poll().unwrap();
        assert_eq!(polled.events, vec![event(1), event(2)]);

        // Read once: the next poll only sees new events.
        assert!(state.poll().unwrap().events.is_empty());
        publish_snapshot(&state.latest_snapshot, snapshot_with(vec![event(3)]));
        assert_eq!(state.poll().unwrap().events, vec![event(3)]);
    }

    #[test]
    fn test_unread_events_bounded() {
        let state = AppState::new();
        for id in 0..(MAX_UNREAD_EVENTS as u32 + 10) {
            publish_snapshot(&state.latest_snapshot, snapshot_with(vec![event(id)]));
        }
        let events = state.poll().unwrap().events;
        assert_eq!(events.len(), MAX_UNREAD_EVENTS);
        assert_eq!(events[0], event(10));
    }
}

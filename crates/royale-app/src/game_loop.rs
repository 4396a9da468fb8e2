//! Game loop thread: drives the battle engine from the wall clock and
//! publishes snapshots.
//!
//! The engine is created inside this thread so it never crosses threads.
//! Commands arrive via `mpsc` channel; each frame's snapshot replaces the
//! shared one for the driver to poll.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use royale_core::commands::PlayerCommand;
use royale_core::config::MatchConfig;
use royale_core::enums::MatchStatus;
use royale_core::state::MatchSnapshot;
use royale_sim::clock::FrameClock;
use royale_sim::BattleEngine;

use crate::state::{publish_snapshot, GameLoopCommand, SharedSnapshot};

/// Target frame period (60 Hz display refresh).
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle yielding the last snapshot once
/// the loop shuts down.
pub fn spawn_game_loop(
    config: MatchConfig,
    latest_snapshot: SharedSnapshot,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<MatchSnapshot>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("royale-game-loop".into())
        .spawn(move || run_game_loop(config, cmd_rx, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: MatchConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &SharedSnapshot,
) -> MatchSnapshot {
    let mut engine = BattleEngine::new(config);
    let mut clock = FrameClock::default();
    let mut next_frame_time = Instant::now();
    let mut last = engine.snapshot();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    handle_command(&mut engine, &mut clock, cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(tick = last.time.tick, "game loop stopped");
                    return last;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance by the wall-clock delta (zero while paused)
        let delta = clock.delta(Instant::now(), engine.status() == MatchStatus::Playing);
        let snapshot = engine.advance(delta);

        // 3. Publish for the driver, keeping unread events
        publish_snapshot(latest_snapshot, snapshot.clone());
        last = snapshot;

        // 4. Sleep until next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind, the frame clock clamps the delta anyway
            next_frame_time = now;
        }
    }
}

/// Apply one player command. A restarted match starts its frame clock afresh.
fn handle_command(engine: &mut BattleEngine, clock: &mut FrameClock, cmd: PlayerCommand) {
    let restart = matches!(cmd, PlayerCommand::Restart);
    if let Some(result) = engine.apply(cmd) {
        if !result.accepted {
            debug!(reason = ?result.reason, "command rejected");
        }
    }
    if restart {
        clock.reset();
    }
}

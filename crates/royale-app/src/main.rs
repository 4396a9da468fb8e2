//! Royale headless runner.
//!
//! Plays one match in the terminal, either as fast as possible with fixed
//! frames or in real time on the game loop thread with commands from stdin.

use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};

use royale_app::autopilot::Autopilot;
use royale_app::game_loop::spawn_game_loop;
use royale_app::hud;
use royale_app::input::parse_command;
use royale_app::state::{AppState, GameLoopCommand};
use royale_core::config::{ConfigError, MatchConfig};
use royale_core::enums::{Difficulty, MatchStatus, OpponentMode};
use royale_core::state::MatchSnapshot;
use royale_sim::BattleEngine;

/// Fixed frame length for the as-fast-as-possible mode.
const HEADLESS_FRAME_SECS: f64 = 1.0 / 60.0;

/// How often the real-time driver polls the shared snapshot.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Royale battle runner
#[derive(Parser, Debug)]
#[command(name = "royale")]
#[command(about = "Run a Royale match headless and print a text HUD")]
struct Args {
    /// Match config file (TOML). Defaults apply when omitted.
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// RNG seed for the opponent and the autopilot
    #[arg(long)]
    seed: Option<u64>,

    /// Opponent difficulty: easy, normal, hard, expert or legendary
    #[arg(long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// Match length in seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Leave the enemy side idle
    #[arg(long)]
    passive: bool,

    /// Let the scripted player play the player's side
    #[arg(long)]
    autoplay: bool,

    /// Run against the wall clock and read commands from stdin
    #[arg(long)]
    realtime: bool,

    /// Seconds of match time between HUD prints (0 disables)
    #[arg(long, default_value_t = 10.0)]
    hud_every: f64,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn parse_difficulty(value: &str) -> Result<Difficulty, String> {
    match value.to_ascii_lowercase().as_str() {
        "easy" => Ok(Difficulty::Easy),
        "normal" => Ok(Difficulty::Normal),
        "hard" => Ok(Difficulty::Hard),
        "expert" => Ok(Difficulty::Expert),
        "legendary" => Ok(Difficulty::Legendary),
        other => Err(format!("unknown difficulty `{other}`")),
    }
}

/// Load the config file (if any) and apply command-line overrides.
fn build_config(args: &Args) -> Result<MatchConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => MatchConfig::load(path)?,
        None => MatchConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(duration) = args.duration {
        config.match_duration_secs = duration;
    }
    if args.passive {
        config.opponent = OpponentMode::Passive;
    }
    config.validate()?;
    Ok(config)
}

fn autopilot_for(args: &Args, config: &MatchConfig) -> Option<Autopilot> {
    args.autoplay.then(|| {
        Autopilot::new(
            config.seed.wrapping_add(1),
            config.difficulty,
            config.ai_decision_interval_secs,
        )
    })
}

fn log_events(snapshot: &MatchSnapshot) {
    for line in snapshot.events.iter().filter_map(hud::describe_event) {
        info!("{line}");
    }
}

/// Tracks when the HUD was last printed, in match seconds.
struct HudSchedule {
    every: f64,
    next_at: f64,
}

impl HudSchedule {
    fn new(every: f64) -> Self {
        Self { every, next_at: 0.0 }
    }

    fn maybe_print(&mut self, snapshot: &MatchSnapshot) {
        if self.every <= 0.0 || snapshot.time.elapsed_secs < self.next_at {
            return;
        }
        println!("{}\n", hud::render(snapshot));
        self.next_at = snapshot.time.elapsed_secs + self.every;
    }
}

/// Run the match on this thread with fixed frames, no sleeping.
fn run_headless(config: MatchConfig, args: &Args) -> MatchSnapshot {
    let mut autopilot = autopilot_for(args, &config);
    let mut engine = BattleEngine::new(config);
    let mut hud = HudSchedule::new(args.hud_every);
    let mut snapshot = engine.snapshot();

    while !snapshot.status.is_terminal() {
        if let Some(command) = autopilot
            .as_mut()
            .and_then(|pilot| pilot.update(&snapshot, HEADLESS_FRAME_SECS))
        {
            engine.apply(command);
        }
        snapshot = engine.advance(HEADLESS_FRAME_SECS);
        log_events(&snapshot);
        hud.maybe_print(&snapshot);
    }
    snapshot
}

/// Forward stdin lines to the game loop until it goes away.
fn spawn_stdin_reader(tx: mpsc::Sender<GameLoopCommand>) {
    let spawned = std::thread::Builder::new()
        .name("royale-stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Ok(command) => {
                        if tx.send(GameLoopCommand::PlayerCommand(command)).is_err() {
                            break;
                        }
                    }
                    Err(err) => eprintln!("{err}"),
                }
            }
        });
    if let Err(err) = spawned {
        warn!(%err, "stdin commands unavailable");
    }
}

/// Run the match on the game loop thread against the wall clock.
fn run_realtime(config: MatchConfig, args: &Args) -> std::io::Result<MatchSnapshot> {
    let mut autopilot = autopilot_for(args, &config);
    let state = AppState::new();
    let (tx, handle) = spawn_game_loop(config, state.latest_snapshot.clone())?;
    spawn_stdin_reader(tx.clone());
    if let Ok(mut lock) = state.command_tx.lock() {
        *lock = Some(tx.clone());
    }
    println!("commands: deploy <card> <x> <y> | preview <card> <x> <y> | pause | resume | restart | exit");

    let mut hud = HudSchedule::new(args.hud_every);
    let poll_secs = POLL_INTERVAL.as_secs_f64();
    loop {
        std::thread::sleep(POLL_INTERVAL);
        let Some(snapshot) = state.poll() else {
            continue;
        };
        log_events(&snapshot);
        hud.maybe_print(&snapshot);
        if snapshot.status.is_terminal() {
            break;
        }
        if let Some(command) = autopilot
            .as_mut()
            .and_then(|pilot| pilot.update(&snapshot, poll_secs))
        {
            state.send(command);
        }
    }

    let _ = tx.send(GameLoopCommand::Shutdown);
    handle
        .join()
        .map_err(|_| std::io::Error::other("game loop thread panicked"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("royale=info")),
        )
        .init();

    let args = Args::parse();
    let config = match build_config(&args) {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "could not load match config");
            return ExitCode::FAILURE;
        }
    };

    let result = if args.realtime {
        run_realtime(config, &args)
    } else {
        Ok(run_headless(config, &args))
    };
    let snapshot = match result {
        Ok(snapshot) => snapshot,
        Err(err) => {
            error!(%err, "match aborted");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", hud::render(&snapshot));
    println!("{}", hud::summary(&snapshot));
    if args.json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(err) => error!(%err, "could not serialize snapshot"),
        }
    }

    if snapshot.status == MatchStatus::Error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_difficulty() {
        assert_eq!(parse_difficulty("Hard"), Ok(Difficulty::Hard));
        assert_eq!(parse_difficulty("legendary"), Ok(Difficulty::Legendary));
        assert!(parse_difficulty("nightmare").is_err());
    }

    #[test]
    fn test_overrides_applied() {
        let args = Args::parse_from([
            "royale",
            "--seed",
            "9",
            "--difficulty",
            "easy",
            "--duration",
            "30",
            "--passive",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.match_duration_secs, 30.0);
        assert_eq!(config.opponent, OpponentMode::Passive);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = Args::parse_from(["royale", "--duration", "0"]);
        assert!(matches!(build_config(&args), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_headless_run_finishes() {
        let args = Args::parse_from(["royale", "--duration", "20", "--autoplay", "--hud-every", "0"]);
        let config = build_config(&args).unwrap();
        let snapshot = run_headless(config, &args);
        assert!(snapshot.status.is_terminal());
        assert_ne!(snapshot.status, MatchStatus::Error);
    }
}

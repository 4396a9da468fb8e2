//! Battle engine: the core of the game.
//!
//! `BattleEngine` owns the hecs ECS world and both sides' state, gates
//! deployments, runs all systems in a fixed order, and produces
//! `MatchSnapshot`s. Completely headless, enabling deterministic testing.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{error, info, warn};

use royale_core::cards::CardId;
use royale_core::commands::PlayerCommand;
use royale_core::config::MatchConfig;
use royale_core::constants::{MAX_STEP_SECS, TIMER_EPSILON};
use royale_core::enums::*;
use royale_core::events::BattleEvent;
use royale_core::state::{DeployResult, MatchSnapshot};
use royale_core::types::{Position, SimTime};

use crate::deploy;
use crate::error::SimError;
use crate::side::{SideState, Sides};
use crate::systems;
use crate::systems::combat::AttackerKind;
use crate::world_setup;

/// The battle engine. Owns the ECS world and all match state.
pub struct BattleEngine {
    config: MatchConfig,
    world: World,
    time: SimTime,
    status: MatchStatus,
    timer_remaining_secs: f64,
    rng: ChaCha8Rng,
    next_entity_id: u32,
    sides: Sides,
    ai_window_timer: f64,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<BattleEvent>,
    error: Option<String>,
}

impl BattleEngine {
    /// Start a new match: towers placed, coins and hands dealt, timer full.
    pub fn new(config: MatchConfig) -> Self {
        let mut world = World::new();
        let mut next_entity_id = 0;
        world_setup::setup_match(&mut world, config.tower_layout, &mut next_entity_id);

        info!(
            mode = ?config.mode,
            difficulty = ?config.difficulty,
            layout = ?config.tower_layout,
            seed = config.seed,
            "match started"
        );

        Self {
            time: SimTime::default(),
            status: MatchStatus::Playing,
            timer_remaining_secs: config.match_duration_secs,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_entity_id,
            sides: Sides::new(&config),
            ai_window_timer: config.ai_decision_interval_secs,
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            error: None,
            world,
            config,
        }
    }

    /// Advance the match by `delta_secs` and return the resulting snapshot.
    ///
    /// The delta is capped at the time left on the match clock, then split
    /// into equal sub-steps no longer than `MAX_STEP_SECS`.
    /// Nothing advances while paused or after the match has ended.
    pub fn advance(&mut self, delta_secs: f64) -> MatchSnapshot {
        let dt = if delta_secs.is_finite() && delta_secs >= 0.0 {
            delta_secs
        } else {
            warn!(delta_secs, "ignoring invalid frame delta");
            0.0
        };

        let dt = dt.min(self.timer_remaining_secs);
        if self.status == MatchStatus::Playing && dt > 0.0 {
            let steps = (dt / MAX_STEP_SECS).ceil().max(1.0) as u64;
            let step = dt / steps as f64;
            for _ in 0..steps {
                if let Err(err) = self.step(step) {
                    self.fail(err);
                    break;
                }
                if self.status != MatchStatus::Playing {
                    break;
                }
            }
        }

        self.snapshot()
    }

    /// Play a card for the player. Applied immediately, between ticks.
    pub fn deploy(&mut self, card: CardId, x: f64, y: f64) -> DeployResult {
        if self.status != MatchStatus::Playing {
            return DeployResult::rejected(DeployRejection::MatchNotActive);
        }
        deploy::execute(
            &mut self.world,
            &mut self.sides.player,
            &mut self.next_entity_id,
            card,
            Position::new(x, y),
            &mut self.events,
        )
    }

    /// Check whether a deployment would be accepted, without playing it.
    /// Works while paused so placement previews stay live.
    pub fn preview_deploy(&self, card: CardId, x: f64, y: f64) -> DeployResult {
        if !matches!(self.status, MatchStatus::Playing | MatchStatus::Paused) {
            return DeployResult::rejected(DeployRejection::MatchNotActive);
        }
        match deploy::validate(&self.sides.player, card, &Position::new(x, y)) {
            Ok(_) => DeployResult {
                accepted: true,
                reason: None,
                unit: None,
            },
            Err(reason) => DeployResult::rejected(reason),
        }
    }

    pub fn pause(&mut self) {
        if self.status == MatchStatus::Playing {
            self.status = MatchStatus::Paused;
            info!("match paused");
        }
    }

    pub fn resume(&mut self) {
        if self.status == MatchStatus::Paused {
            self.status = MatchStatus::Playing;
            info!("match resumed");
        }
    }

    /// Throw the current match away and start a fresh one with the same config.
    pub fn restart(&mut self) {
        info!("match restarted");
        *self = Self::new(self.config.clone());
    }

    /// Leave the match. All entity and resource state is discarded.
    pub fn exit(&mut self) {
        self.world.clear();
        self.sides.player.discard();
        self.sides.enemy.discard();
        self.events.clear();
        self.timer_remaining_secs = 0.0;
        self.status = MatchStatus::Exited;
        info!("match exited");
    }

    /// Apply a command from the presentation layer. Deploy commands return their result.
    pub fn apply(&mut self, command: PlayerCommand) -> Option<DeployResult> {
        match command {
            PlayerCommand::Deploy { card, x, y } => Some(self.deploy(card, x, y)),
            PlayerCommand::PreviewDeploy { card, x, y } => Some(self.preview_deploy(card, x, y)),
            PlayerCommand::Pause => {
                self.pause();
                None
            }
            PlayerCommand::Resume => {
                self.resume();
                None
            }
            PlayerCommand::Restart => {
                self.restart();
                None
            }
            PlayerCommand::Exit => {
                self.exit();
                None
            }
        }
    }

    /// Build the read model, draining events emitted since the last snapshot.
    pub fn snapshot(&mut self) -> MatchSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.status,
            &self.config,
            self.timer_remaining_secs,
            &self.sides,
            events,
            self.error.clone(),
        )
    }

    /// Get the current match status.
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn timer_remaining_secs(&self) -> f64 {
        self.timer_remaining_secs
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn side(&self, team: Team) -> &SideState {
        self.sides.get(team)
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Run one sub-step. Order is fixed so identical inputs replay identically.
    fn step(&mut self, dt: f64) -> Result<(), SimError> {
        // 1. Resource regeneration (coins, scheduled hand draws)
        self.sides.player.regenerate(dt);
        self.sides.enemy.regenerate(dt);
        // 2. Opponent deployments
        if self.config.opponent == OpponentMode::Ai {
            systems::opponent::run(
                &mut self.world,
                &mut self.sides.enemy,
                &mut self.rng,
                self.config.difficulty,
                &mut self.ai_window_timer,
                self.config.ai_decision_interval_secs,
                dt,
                &mut self.next_entity_id,
                &mut self.events,
            );
        }
        // 3. Units: targeting, movement, attacks
        systems::targeting::run_units(&mut self.world)?;
        systems::movement::run(&mut self.world, dt);
        systems::combat::run(
            &mut self.world,
            AttackerKind::Units,
            dt,
            &mut self.sides,
            &mut self.events,
        )?;
        // 4. Towers: targeting, attacks
        systems::targeting::run_towers(&mut self.world)?;
        systems::combat::run(
            &mut self.world,
            AttackerKind::Towers,
            dt,
            &mut self.sides,
            &mut self.events,
        )?;
        // 5. Death resolution and win check
        systems::cleanup::run(
            &mut self.world,
            &mut self.despawn_buffer,
            &mut self.sides,
            &mut self.events,
        )?;
        self.resolve_towers();
        // 6. Consistency
        systems::invariants::check(&self.world, &self.sides)?;
        // 7. Match timer
        self.time.advance(dt);
        if self.status == MatchStatus::Playing {
            self.timer_remaining_secs -= dt;
            if self.timer_remaining_secs <= TIMER_EPSILON {
                self.timer_remaining_secs = 0.0;
                self.resolve_timeout();
            }
        }
        Ok(())
    }

    fn resolve_towers(&mut self) {
        match (self.sides.player.is_defeated(), self.sides.enemy.is_defeated()) {
            (false, false) => {}
            (false, true) => self.finish(MatchStatus::Victory),
            (true, false) => self.finish(MatchStatus::Defeat),
            (true, true) => self.finish(MatchStatus::Draw),
        }
    }

    fn resolve_timeout(&mut self) {
        let status = match self.config.timeout_resolution {
            TimeoutResolution::Draw => MatchStatus::Draw,
            TimeoutResolution::TowerHealth => {
                let player = self.sides.player.health_pct();
                let enemy = self.sides.enemy.health_pct();
                if player > enemy {
                    MatchStatus::Victory
                } else if enemy > player {
                    MatchStatus::Defeat
                } else {
                    MatchStatus::Draw
                }
            }
        };
        self.finish(status);
    }

    fn finish(&mut self, status: MatchStatus) {
        self.status = status;
        self.events.push(BattleEvent::MatchEnded { status });
        info!(
            ?status,
            elapsed_secs = self.time.elapsed_secs,
            player_health_pct = self.sides.player.health_pct(),
            enemy_health_pct = self.sides.enemy.health_pct(),
            "match ended"
        );
    }

    fn fail(&mut self, err: SimError) {
        error!(%err, tick = self.time.tick, "tick aborted, match halted");
        self.error = Some(err.to_string());
        self.finish(MatchStatus::Error);
    }

    /// Spawn a unit anywhere, bypassing the deployment gate.
    #[cfg(test)]
    pub fn spawn_test_unit(
        &mut self,
        team: Team,
        position: Position,
        blueprint: &royale_core::cards::UnitBlueprint,
    ) -> royale_core::types::EntityId {
        world_setup::spawn_unit(
            &mut self.world,
            &mut self.next_entity_id,
            team,
            position,
            blueprint,
        )
    }

    /// Look up the hecs entity behind an id.
    #[cfg(test)]
    pub fn entity(&self, id: royale_core::types::EntityId) -> Option<hecs::Entity> {
        self.world
            .query::<&royale_core::types::EntityId>()
            .iter()
            .find(|(_, eid)| **eid == id)
            .map(|(entity, _)| entity)
    }

    /// Overwrite an entity's current health (may break invariants on purpose).
    #[cfg(test)]
    pub fn set_health(&mut self, id: royale_core::types::EntityId, hp: i32) {
        let entity = self.entity(id).expect("entity exists");
        let mut health = self
            .world
            .get::<&mut royale_core::components::Health>(entity)
            .expect("entity has health");
        health.current = hp;
    }
}

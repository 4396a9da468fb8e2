//! Scripted player: plays the player's side with the opponent planner.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use royale_core::commands::PlayerCommand;
use royale_core::enums::{Difficulty, MatchStatus, Team};
use royale_core::state::MatchSnapshot;
use royale_core::types::Position;
use royale_opponent_ai::planner::{decide, HandCard, OpponentContext};

/// Issues at most one deploy command per decision window, based only on
/// what the snapshot shows.
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: ChaCha8Rng,
    difficulty: Difficulty,
    window_secs: f64,
    window_timer: f64,
}

impl Autopilot {
    pub fn new(seed: u64, difficulty: Difficulty, window_secs: f64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            difficulty,
            window_secs,
            window_timer: window_secs,
        }
    }

    /// Advance the decision window by `dt` and maybe pick a card to play.
    pub fn update(&mut self, snapshot: &MatchSnapshot, dt: f64) -> Option<PlayerCommand> {
        if snapshot.status != MatchStatus::Playing {
            return None;
        }
        self.window_timer -= dt;
        if self.window_timer > 0.0 {
            return None;
        }
        self.window_timer = self.window_secs;

        let hand: Vec<HandCard> = snapshot
            .hand
            .iter()
            .map(|card| HandCard {
                id: card.id,
                cost: card.cost,
            })
            .collect();
        let intruders: Vec<Position> = snapshot
            .units
            .iter()
            .filter(|unit| unit.team == Team::Enemy)
            .map(|unit| unit.position)
            .collect();
        let ctx = OpponentContext {
            team: Team::Player,
            difficulty: self.difficulty,
            coins: snapshot.coins.amount,
            hand: &hand,
            intruders: &intruders,
        };

        decide(&ctx, &mut self.rng).map(|action| PlayerCommand::Deploy {
            card: action.card,
            x: action.position.x,
            y: action.position.y,
        })
    }
}

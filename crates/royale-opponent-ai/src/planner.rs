//! Card and placement selection for the opponent.
//!
//! All randomness comes from the caller's RNG, drawn in a fixed order
//! (act roll, card roll, placement rolls) so seeded replays match.

use glam::DVec2;
use rand::Rng;

use royale_core::cards::CardId;
use royale_core::constants::*;
use royale_core::enums::{Difficulty, Team};
use royale_core::types::Position;

use crate::profiles::get_profile;

/// A card currently in the opponent's hand.
#[derive(Debug, Clone, Copy)]
pub struct HandCard {
    pub id: CardId,
    pub cost: u32,
}

/// Input to one opponent decision.
pub struct OpponentContext<'a> {
    pub team: Team,
    pub difficulty: Difficulty,
    pub coins: f64,
    pub hand: &'a [HandCard],
    /// Positions of opposing units, in spawn order.
    pub intruders: &'a [Position],
}

/// A card the opponent wants to play and where.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpponentAction {
    pub card: CardId,
    pub position: Position,
}

/// Decide whether to play a card this window.
pub fn decide<R: Rng>(ctx: &OpponentContext, rng: &mut R) -> Option<OpponentAction> {
    let profile = get_profile(ctx.difficulty);

    let roll: f64 = rng.gen();
    if roll >= profile.act_chance {
        return None;
    }

    let threat = most_urgent_intruder(ctx);

    let affordable: Vec<&HandCard> = ctx
        .hand
        .iter()
        .filter(|card| card.cost as f64 <= ctx.coins + COIN_EPSILON)
        .collect();
    if affordable.is_empty() {
        return None;
    }
    let card = affordable[rng.gen_range(0..affordable.len())];

    let position = match threat {
        Some(intruder) => defensive_position(ctx.team, intruder),
        None => offensive_position(ctx.team, rng),
    };

    Some(OpponentAction {
        card: card.id,
        position,
    })
}

/// The opposing unit deepest into our deployment band, if any.
fn most_urgent_intruder(ctx: &OpponentContext) -> Option<Position> {
    ctx.intruders
        .iter()
        .filter(|pos| ctx.team.depth_of(pos.y) <= DEPLOY_ZONE_DEPTH)
        .fold(None, |best: Option<Position>, pos| match best {
            Some(b) if ctx.team.depth_of(b.y) <= ctx.team.depth_of(pos.y) => Some(b),
            _ => Some(*pos),
        })
}

/// Drop a unit between the intruder and our baseline.
fn defensive_position(team: Team, intruder: Position) -> Position {
    let depth = (team.depth_of(intruder.y) - 1.5).clamp(0.5, DEPLOY_ZONE_DEPTH);
    let clamped = DVec2::new(intruder.x, team.y_at_depth(depth))
        .clamp(DVec2::ZERO, DVec2::new(ARENA_WIDTH, ARENA_HEIGHT));
    Position::from_vec(clamped)
}

/// Pick a lane and stage the unit at the back of our half.
fn offensive_position<R: Rng>(team: Team, rng: &mut R) -> Position {
    let lane = LANE_X[rng.gen_range(0..LANE_X.len())];
    let depth: f64 = rng.gen_range(DEPLOY_ZONE_DEPTH * 0.5..=DEPLOY_ZONE_DEPTH);
    Position::new(lane, team.y_at_depth(depth))
}

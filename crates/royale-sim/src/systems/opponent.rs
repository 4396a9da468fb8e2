//! Opponent system: feeds the enemy side's situation to the AI planner
//! once per decision window and plays its choice through the deployment gate.

use hecs::World;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use royale_core::components::Unit;
use royale_core::enums::{Difficulty, Team};
use royale_core::events::BattleEvent;
use royale_core::types::{EntityId, Position};

use royale_opponent_ai::planner::{decide, HandCard, OpponentContext};

use crate::deploy;
use crate::side::SideState;

/// Run the opponent for one sub-step.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    side: &mut SideState,
    rng: &mut ChaCha8Rng,
    difficulty: Difficulty,
    window_timer: &mut f64,
    window_secs: f64,
    dt: f64,
    next_id: &mut u32,
    events: &mut Vec<BattleEvent>,
) {
    *window_timer -= dt;
    if *window_timer > 0.0 {
        return;
    }
    *window_timer += window_secs;

    let hand: Vec<HandCard> = side
        .hand
        .cards()
        .iter()
        .map(|card| HandCard {
            id: card.id,
            cost: card.cost,
        })
        .collect();
    let intruders = opposing_units(world, side.team);

    let ctx = OpponentContext {
        team: side.team,
        difficulty,
        coins: side.coins.current(),
        hand: &hand,
        intruders: &intruders,
    };

    if let Some(action) = decide(&ctx, rng) {
        let result = deploy::execute(world, side, next_id, action.card, action.position, events);
        if !result.accepted {
            debug!(reason = ?result.reason, "opponent deployment refused");
        }
    }
}

/// Positions of the other side's units, in spawn order.
fn opposing_units(world: &World, team: Team) -> Vec<Position> {
    let mut units: Vec<(EntityId, Position)> = world
        .query::<(&EntityId, &Team, &Position, &Unit)>()
        .iter()
        .filter(|(_, (_, unit_team, _, _))| **unit_team != team)
        .map(|(_, (id, _, pos, _))| (*id, *pos))
        .collect();
    units.sort_by_key(|(id, _)| *id);
    units.into_iter().map(|(_, pos)| pos).collect()
}

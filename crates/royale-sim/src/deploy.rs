//! Deployment gate: validates and executes card plays.
//!
//! Checks run in a fixed order (card in hand, zone, funds) and nothing is
//! mutated unless every check passes. Cost is taken before the unit exists.

use hecs::World;
use tracing::debug;

use royale_core::cards::{Card, CardId};
use royale_core::constants::{ARENA_WIDTH, DEPLOY_ZONE_DEPTH};
use royale_core::enums::{DeployRejection, Team};
use royale_core::events::BattleEvent;
use royale_core::state::DeployResult;
use royale_core::types::Position;

use crate::side::SideState;
use crate::world_setup::spawn_unit;

/// Whether `position` lies in the band nearest `team`'s own baseline.
pub fn in_deploy_zone(team: Team, position: &Position) -> bool {
    position.is_finite()
        && (0.0..=ARENA_WIDTH).contains(&position.x)
        && (0.0..=DEPLOY_ZONE_DEPTH).contains(&team.depth_of(position.y))
}

/// Run every check without mutating anything.
pub fn validate<'a>(
    side: &'a SideState,
    card: CardId,
    position: &Position,
) -> Result<&'a Card, DeployRejection> {
    let card = side.hand.find(card).ok_or(DeployRejection::CardNotInHand)?;
    if !in_deploy_zone(side.team, position) {
        return Err(DeployRejection::OutOfZone);
    }
    if !side.coins.can_afford(card.cost) {
        return Err(DeployRejection::InsufficientFunds);
    }
    Ok(card)
}

/// Validate, then spend, play the card, and spawn its unit.
pub fn execute(
    world: &mut World,
    side: &mut SideState,
    next_id: &mut u32,
    card: CardId,
    position: Position,
    events: &mut Vec<BattleEvent>,
) -> DeployResult {
    let (cost, blueprint) = match validate(side, card, &position) {
        Ok(card) => (card.cost, card.blueprint()),
        Err(reason) => {
            debug!(team = ?side.team, card = card.0, ?reason, "deployment rejected");
            return DeployResult::rejected(reason);
        }
    };
    if !side.coins.try_spend(cost) {
        return DeployResult::rejected(DeployRejection::InsufficientFunds);
    }
    side.hand.play(card);

    let id = spawn_unit(world, next_id, side.team, position, &blueprint);
    debug!(team = ?side.team, unit = %id, card = card.0, x = position.x, y = position.y, "unit deployed");
    events.push(BattleEvent::UnitDeployed {
        id,
        card,
        team: side.team,
        position,
    });
    DeployResult::accepted(id)
}

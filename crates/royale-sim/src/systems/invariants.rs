//! End-of-step consistency checks. A failure here means a bug in the
//! engine, so the match stops instead of continuing on corrupt state.

use std::collections::HashMap;

use hecs::World;

use royale_core::components::{Health, Target};
use royale_core::enums::Team;
use royale_core::types::{EntityId, Position};

use crate::error::{Result, SimError};
use crate::side::{SideState, Sides};

pub fn check(world: &World, sides: &Sides) -> Result<()> {
    let mut teams: HashMap<EntityId, Team> = HashMap::new();

    for (_, (id, team, health, pos)) in world
        .query::<(&EntityId, &Team, &Health, &Position)>()
        .iter()
    {
        if health.current <= 0 || health.current > health.max {
            return Err(violation(format!(
                "{id} has health {}/{} after death resolution",
                health.current, health.max
            )));
        }
        if !pos.is_finite() {
            return Err(violation(format!("{id} has non-finite position {pos:?}")));
        }
        teams.insert(*id, *team);
    }

    for (_, (id, team, target)) in world.query::<(&EntityId, &Team, &Target)>().iter() {
        if let Some(target_id) = target.0 {
            if teams.get(&target_id) == Some(team) {
                return Err(violation(format!("{id} is targeting friendly {target_id}")));
            }
        }
    }

    check_side(&sides.player)?;
    check_side(&sides.enemy)
}

fn check_side(side: &SideState) -> Result<()> {
    let coins = side.coins.current();
    if !(0.0..=side.coins.max()).contains(&coins) {
        return Err(violation(format!("{:?} coins out of bounds: {coins}", side.team)));
    }
    if side.hand.cards().len() > side.hand.capacity() {
        return Err(violation(format!("{:?} hand over capacity", side.team)));
    }
    Ok(())
}

fn violation(message: String) -> SimError {
    SimError::Invariant(message)
}

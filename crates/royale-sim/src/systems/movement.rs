//! Straight-line movement toward the current target.
//!
//! Lanes are cosmetic: units walk directly at their target (or at the
//! opposing baseline when no enemy remains) and stop once within attack range.

use std::collections::HashMap;

use glam::DVec2;
use hecs::World;

use royale_core::components::{Attack, Health, Mobility, Target};
use royale_core::enums::{Team, UnitState};
use royale_core::types::{EntityId, Position};

use crate::systems::targeting::approach_point;

/// Move every unit in the `Moving` state by `speed * dt`.
/// Destinations are read from positions at the start of the pass.
pub fn run(world: &mut World, dt: f64) {
    let positions: HashMap<EntityId, Position> = world
        .query::<(&EntityId, &Position, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| health.current > 0)
        .map(|(_, (id, pos, _))| (*id, *pos))
        .collect();

    for (_entity, (team, pos, mobility, state, target, attack)) in world.query_mut::<(
        &Team,
        &mut Position,
        &Mobility,
        &UnitState,
        &Target,
        &Attack,
    )>() {
        if *state != UnitState::Moving {
            continue;
        }
        let (destination, stop_distance) = match target.0.and_then(|id| positions.get(&id)) {
            Some(target_pos) => (*target_pos, attack.range),
            None => (approach_point(*team), 0.0),
        };
        *pos = step_toward(*pos, destination, mobility.speed * dt, stop_distance);
    }
}

/// Advance from `from` toward `to` by at most `max_step`, stopping
/// `stop_distance` short of the destination.
pub fn step_toward(from: Position, to: Position, max_step: f64, stop_distance: f64) -> Position {
    let delta = to.to_vec() - from.to_vec();
    let distance = delta.length();
    let travel = (distance - stop_distance).clamp(0.0, max_step.max(0.0));
    if travel <= 0.0 {
        return from;
    }
    let direction: DVec2 = delta / distance;
    Position::from_vec(from.to_vec() + direction * travel)
}

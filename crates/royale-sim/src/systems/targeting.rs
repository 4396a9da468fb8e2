//! Spatial query and target acquisition.
//!
//! Targets are stored as `EntityId`s and looked up again every pass, so a
//! removed entity can never be reached through a stale reference.
//!
//! Tie-break: among equidistant candidates the lowest `EntityId` (earliest
//! spawned) wins. Candidates are kept sorted by id, so the result does not
//! depend on ECS storage order.

use std::collections::HashMap;

use hecs::World;
use tracing::debug;

use royale_core::components::*;
use royale_core::constants::LANE_CENTER_X;
use royale_core::enums::{Team, UnitState};
use royale_core::types::{EntityId, Position};

use crate::error::Result;

/// Slack applied to range checks so a unit that stopped exactly at its
/// attack range counts as in range despite rounding.
pub const RANGE_EPSILON: f64 = 1e-9;

/// A living entity that can be targeted, captured once per pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub id: EntityId,
    pub team: Team,
    pub position: Position,
    pub is_tower: bool,
}

pub fn in_range(from: &Position, to: &Position, range: f64) -> bool {
    from.distance_to(to) <= range + RANGE_EPSILON
}

/// Nearest candidate on the opposing team, optionally bounded by `max_range`.
pub fn nearest_enemy<'a>(
    team: Team,
    position: &Position,
    candidates: impl IntoIterator<Item = &'a Candidate>,
    max_range: Option<f64>,
) -> Option<&'a Candidate> {
    let mut best: Option<(&Candidate, f64)> = None;
    for candidate in candidates {
        if candidate.team == team {
            continue;
        }
        if let Some(range) = max_range {
            if !in_range(position, &candidate.position, range) {
                continue;
            }
        }
        let dist_sq = position.distance_squared_to(&candidate.position);
        let closer = match best {
            None => true,
            Some((current, best_sq)) => {
                dist_sq < best_sq || (dist_sq == best_sq && candidate.id < current.id)
            }
        };
        if closer {
            best = Some((candidate, dist_sq));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Point a unit walks to when no enemy is left: centre lane, opposing baseline.
pub fn approach_point(team: Team) -> Position {
    Position::new(LANE_CENTER_X, team.opponent().baseline_y())
}

/// All living units and towers, sorted by id.
pub fn collect_candidates(world: &World) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = world
        .query::<(&EntityId, &Team, &Position, &Health, Option<&Tower>)>()
        .iter()
        .filter(|(_, (_, _, _, health, _))| health.current > 0)
        .map(|(_, (id, team, position, _, tower))| Candidate {
            id: *id,
            team: *team,
            position: *position,
            is_tower: tower.is_some(),
        })
        .collect();
    candidates.sort_by_key(|c| c.id);
    candidates
}

/// Re-validate or re-acquire the target of every unit and derive its state.
pub fn run_units(world: &mut World) -> Result<()> {
    let candidates = collect_candidates(world);
    let by_id: HashMap<EntityId, &Candidate> = candidates.iter().map(|c| (c.id, c)).collect();

    let mut units: Vec<(EntityId, hecs::Entity)> = world
        .query::<(&EntityId, &Unit)>()
        .iter()
        .map(|(entity, (id, _))| (*id, entity))
        .collect();
    units.sort_by_key(|(id, _)| *id);

    for (id, entity) in units {
        let team = *world.get::<&Team>(entity)?;
        let position = *world.get::<&Position>(entity)?;
        let range = world.get::<&Attack>(entity)?.range;
        let current = world.get::<&Target>(entity)?.0;

        let still_valid = current
            .and_then(|target_id| by_id.get(&target_id).copied())
            .filter(|c| c.team != team);

        let target = match still_valid {
            Some(candidate) => Some(candidate),
            None => {
                if let Some(lost) = current {
                    debug!(unit = %id, target = %lost, "target gone, re-acquiring");
                }
                nearest_enemy(team, &position, &candidates, None)
            }
        };

        let state = match target {
            Some(c) if in_range(&position, &c.position, range) => UnitState::Attacking,
            Some(_) => UnitState::Moving,
            None if position.distance_to(&approach_point(team)) <= RANGE_EPSILON => {
                UnitState::Idle
            }
            None => UnitState::Moving,
        };

        *world.get::<&mut Target>(entity)? = Target(target.map(|c| c.id));
        *world.get::<&mut UnitState>(entity)? = state;
    }
    Ok(())
}

/// Keep or pick a target for every tower. Towers only shoot units inside
/// their own range and never chase.
pub fn run_towers(world: &mut World) -> Result<()> {
    let units: Vec<Candidate> = collect_candidates(world)
        .into_iter()
        .filter(|c| !c.is_tower)
        .collect();

    let mut towers: Vec<(EntityId, hecs::Entity)> = world
        .query::<(&EntityId, &Tower)>()
        .iter()
        .map(|(entity, (id, _))| (*id, entity))
        .collect();
    towers.sort_by_key(|(id, _)| *id);

    for (_, entity) in towers {
        let team = *world.get::<&Team>(entity)?;
        let position = *world.get::<&Position>(entity)?;
        let range = world.get::<&Attack>(entity)?.range;
        let current = world.get::<&Target>(entity)?.0;

        let kept = current.and_then(|target_id| {
            units.iter().find(|c| {
                c.id == target_id && c.team != team && in_range(&position, &c.position, range)
            })
        });
        let target = kept.or_else(|| nearest_enemy(team, &position, &units, Some(range)));

        *world.get::<&mut Target>(entity)? = Target(target.map(|c| c.id));
    }
    Ok(())
}

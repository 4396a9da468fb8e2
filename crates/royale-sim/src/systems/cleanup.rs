//! Death resolution: removes entities whose health reached zero and
//! updates the owning side's tower accounting.

use hecs::{Entity, World};
use tracing::{debug, info};

use royale_core::components::{Health, Target, Tower};
use royale_core::enums::Team;
use royale_core::events::BattleEvent;
use royale_core::types::EntityId;

use crate::error::Result;
use crate::side::Sides;

/// Despawn one dead entity immediately and record the loss.
pub fn destroy(
    world: &mut World,
    entity: Entity,
    sides: &mut Sides,
    events: &mut Vec<BattleEvent>,
) -> Result<()> {
    let id = *world.get::<&EntityId>(entity)?;
    let team = *world.get::<&Team>(entity)?;
    let tower_kind = world.get::<&Tower>(entity).ok().map(|tower| tower.kind);
    world.despawn(entity)?;

    match tower_kind {
        Some(kind) => {
            let side = sides.get_mut(team);
            side.record_tower_loss(kind);
            info!(tower = %id, ?team, ?kind, health_pct = side.health_pct(), "tower destroyed");
            events.push(BattleEvent::TowerDestroyed {
                id,
                team,
                kind,
                team_health_pct: side.health_pct(),
            });
        }
        None => {
            debug!(unit = %id, ?team, "unit destroyed");
            events.push(BattleEvent::UnitDestroyed { id, team });
        }
    }
    Ok(())
}

/// Sweep any entity left at zero health. Combat removes kills as they
/// happen, so this only catches entities that reached zero some other way.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    sides: &mut Sides,
    events: &mut Vec<BattleEvent>,
) -> Result<()> {
    despawn_buffer.clear();
    despawn_buffer.extend(
        world
            .query::<&Health>()
            .iter()
            .filter(|(_, health)| health.current <= 0)
            .map(|(entity, _)| entity),
    );
    let mut dead = std::mem::take(despawn_buffer);
    // Resolve in id order so tower accounting is reproducible.
    dead.sort_by_key(|entity| world.get::<&EntityId>(*entity).map(|id| *id).ok());
    for entity in dead.drain(..) {
        destroy(world, entity, sides, events)?;
    }
    *despawn_buffer = dead;

    release_stale_targets(world);
    Ok(())
}

/// Clear targets that point at entities removed this step, so the read
/// model never carries a dangling id. Targeting re-acquires next step.
fn release_stale_targets(world: &mut World) {
    let alive: std::collections::HashSet<EntityId> =
        world.query::<&EntityId>().iter().map(|(_, id)| *id).collect();
    for (_entity, target) in world.query_mut::<&mut Target>() {
        if target.0.is_some_and(|id| !alive.contains(&id)) {
            target.0 = None;
        }
    }
}

//! Combat resolver: cooldowns, damage, and same-tick removal of kills.

use std::collections::HashMap;

use hecs::{Entity, World};
use tracing::debug;

use royale_core::components::*;
use royale_core::events::BattleEvent;
use royale_core::types::{EntityId, Position};

use crate::error::Result;
use crate::side::Sides;
use crate::systems::cleanup;
use crate::systems::targeting::in_range;

/// Which attackers a combat pass resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackerKind {
    Units,
    Towers,
}

/// Tick down cooldowns for one attacker group and resolve every ready attack,
/// in ascending id order.
pub fn run(
    world: &mut World,
    kind: AttackerKind,
    dt: f64,
    sides: &mut Sides,
    events: &mut Vec<BattleEvent>,
) -> Result<()> {
    let mut attackers: Vec<(EntityId, Entity)> = Vec::new();
    for (entity, (id, cooldown, tower)) in
        world.query_mut::<(&EntityId, &mut AttackCooldown, Option<&Tower>)>()
    {
        let is_tower = tower.is_some();
        if is_tower != (kind == AttackerKind::Towers) {
            continue;
        }
        cooldown.remaining_secs = (cooldown.remaining_secs - dt).max(0.0);
        attackers.push((*id, entity));
    }
    attackers.sort_by_key(|(id, _)| *id);

    let index: HashMap<EntityId, Entity> = world
        .query::<&EntityId>()
        .iter()
        .map(|(entity, id)| (*id, entity))
        .collect();

    for (attacker_id, attacker) in attackers {
        // Killed earlier in this pass.
        if !world.contains(attacker) {
            continue;
        }
        if world.get::<&AttackCooldown>(attacker)?.remaining_secs > 0.0 {
            continue;
        }
        let Some(target_id) = world.get::<&Target>(attacker)?.0 else {
            continue;
        };
        let attack = *world.get::<&Attack>(attacker)?;
        let from = *world.get::<&Position>(attacker)?;

        let target = match index.get(&target_id) {
            Some(entity) if world.contains(*entity) => *entity,
            _ => {
                debug!(attacker = %attacker_id, target = %target_id, "target already removed, attack dropped");
                continue;
            }
        };
        let to = *world.get::<&Position>(target)?;
        if !in_range(&from, &to, attack.range) {
            continue;
        }

        let Some(remaining_hp) = apply_damage(world, target, attack.damage)? else {
            debug!(attacker = %attacker_id, target = %target_id, "target already dead, attack dropped");
            continue;
        };
        world.get::<&mut AttackCooldown>(attacker)?.remaining_secs = 1.0 / attack.attack_speed;

        events.push(BattleEvent::ProjectileFired {
            attacker: attacker_id,
            target: target_id,
            from,
            to,
        });
        events.push(BattleEvent::Hit {
            target: target_id,
            damage: attack.damage,
            remaining_hp,
        });

        if remaining_hp == 0 {
            cleanup::destroy(world, target, sides, events)?;
        }
    }
    Ok(())
}

/// Subtract damage, clamping at zero. Returns `None` when the target was
/// already at zero health.
fn apply_damage(world: &mut World, target: Entity, damage: i32) -> Result<Option<i32>> {
    let mut health = world.get::<&mut Health>(target)?;
    if health.current <= 0 {
        return Ok(None);
    }
    health.current = health.current.saturating_sub(damage).clamp(0, health.max);
    Ok(Some(health.current))
}

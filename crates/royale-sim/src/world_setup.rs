//! Entity spawn factories for setting up the arena.
//!
//! Creates towers at match start and units on deployment, each with the
//! appropriate component bundle and a fresh `EntityId`.

use hecs::World;

use royale_core::cards::UnitBlueprint;
use royale_core::components::*;
use royale_core::constants::*;
use royale_core::enums::*;
use royale_core::types::{EntityId, Position};

/// Number of towers each side starts with for a layout.
pub fn tower_count(layout: TowerLayout) -> u32 {
    match layout {
        TowerLayout::Standard => 3,
        TowerLayout::KingOnly => 1,
    }
}

/// Build the mirrored tower line-up for both sides.
/// Kings are spawned first so they hold the lowest ids of their side.
pub fn setup_match(world: &mut World, layout: TowerLayout, next_id: &mut u32) {
    for team in [Team::Player, Team::Enemy] {
        let (x, depth) = KING_TOWER_OFFSET;
        spawn_tower(
            world,
            next_id,
            team,
            TowerKind::King,
            Position::new(x, team.y_at_depth(depth)),
        );
        if layout == TowerLayout::Standard {
            for (x, depth) in PRINCESS_TOWER_OFFSETS {
                spawn_tower(
                    world,
                    next_id,
                    team,
                    TowerKind::Princess,
                    Position::new(x, team.y_at_depth(depth)),
                );
            }
        }
    }
}

fn allocate_id(next_id: &mut u32) -> EntityId {
    let id = EntityId(*next_id);
    *next_id += 1;
    id
}

/// Spawn a tower with its kind's base stats.
pub fn spawn_tower(
    world: &mut World,
    next_id: &mut u32,
    team: Team,
    kind: TowerKind,
    position: Position,
) -> EntityId {
    let (hp, attack) = tower_params(kind);
    let id = allocate_id(next_id);
    world.spawn((
        id,
        team,
        position,
        Health {
            current: hp,
            max: hp,
        },
        attack,
        AttackCooldown::default(),
        Target::default(),
        Tower { kind },
    ));
    id
}

/// Spawn a unit with stats copied from a card blueprint.
/// The cooldown starts at zero, so a unit deployed in range attacks at once.
pub fn spawn_unit(
    world: &mut World,
    next_id: &mut u32,
    team: Team,
    position: Position,
    blueprint: &UnitBlueprint,
) -> EntityId {
    let id = allocate_id(next_id);
    world.spawn((
        id,
        team,
        position,
        Health {
            current: blueprint.hitpoints,
            max: blueprint.hitpoints,
        },
        Attack {
            damage: blueprint.damage,
            attack_speed: blueprint.attack_speed,
            range: blueprint.range,
        },
        AttackCooldown::default(),
        Target::default(),
        Mobility {
            speed: blueprint.speed,
        },
        UnitState::default(),
        Unit {
            card: blueprint.card,
        },
    ));
    id
}

/// Base stats for a tower kind: (hit points, attack).
fn tower_params(kind: TowerKind) -> (i32, Attack) {
    match kind {
        TowerKind::King => (
            KING_TOWER_HP,
            Attack {
                damage: KING_TOWER_DAMAGE,
                attack_speed: KING_TOWER_ATTACK_SPEED,
                range: KING_TOWER_RANGE,
            },
        ),
        TowerKind::Princess => (
            PRINCESS_TOWER_HP,
            Attack {
                damage: PRINCESS_TOWER_DAMAGE,
                attack_speed: PRINCESS_TOWER_ATTACK_SPEED,
                range: PRINCESS_TOWER_RANGE,
            },
        ),
    }
}

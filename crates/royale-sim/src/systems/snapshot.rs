//! Snapshot system: queries the ECS world and builds a complete MatchSnapshot.
//!
//! This system is read-only: it never modifies the world.

use hecs::World;

use royale_core::components::*;
use royale_core::config::MatchConfig;
use royale_core::enums::*;
use royale_core::events::BattleEvent;
use royale_core::state::*;
use royale_core::types::{EntityId, Position, SimTime};

use crate::side::{SideState, Sides};

/// Build a complete MatchSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    status: MatchStatus,
    config: &MatchConfig,
    timer_remaining_secs: f64,
    sides: &Sides,
    events: Vec<BattleEvent>,
    error: Option<String>,
) -> MatchSnapshot {
    MatchSnapshot {
        time: *time,
        status,
        mode: config.mode,
        difficulty: config.difficulty,
        timer_remaining_secs,
        units: build_units(world),
        towers: build_towers(world),
        coins: build_coins(&sides.player),
        hand: build_hand(&sides.player),
        next_card: sides.player.hand.next_card().map(|card| CardView {
            id: card.id,
            name: card.name.clone(),
            cost: card.cost,
            affordable: sides.player.coins.can_afford(card.cost),
        }),
        player_health_pct: sides.player.health_pct(),
        enemy_health_pct: sides.enemy.health_pct(),
        events,
        error,
    }
}

/// Build UnitView list from all unit entities.
fn build_units(world: &World) -> Vec<UnitView> {
    let mut units: Vec<UnitView> = world
        .query::<(&EntityId, &Team, &Position, &Health, &UnitState, &Target, &Unit)>()
        .iter()
        .map(|(_, (id, team, pos, health, state, target, unit))| UnitView {
            id: *id,
            team: *team,
            card: unit.card,
            position: *pos,
            hp: health.current,
            max_hp: health.max,
            state: *state,
            target: target.0,
        })
        .collect();

    units.sort_by_key(|u| u.id);
    units
}

/// Build TowerView list from all tower entities.
fn build_towers(world: &World) -> Vec<TowerView> {
    let mut towers: Vec<TowerView> = world
        .query::<(&EntityId, &Team, &Position, &Health, &Tower)>()
        .iter()
        .map(|(_, (id, team, pos, health, tower))| TowerView {
            id: *id,
            team: *team,
            kind: tower.kind,
            position: *pos,
            hp: health.current,
            max_hp: health.max,
        })
        .collect();

    towers.sort_by_key(|t| t.id);
    towers
}

fn build_coins(side: &SideState) -> CoinView {
    CoinView {
        amount: side.coins.current(),
        whole: side.coins.whole(),
        regen_progress: side.coins.regen_progress(),
        max: side.coins.max(),
    }
}

fn build_hand(side: &SideState) -> Vec<CardView> {
    side.hand
        .cards()
        .iter()
        .map(|card| CardView {
            id: card.id,
            name: card.name.clone(),
            cost: card.cost,
            affordable: side.coins.can_afford(card.cost),
        })
        .collect()
}

//! Tests for the battle engine: tick pipeline, deployment gate, combat, and match flow.

use proptest::prelude::*;

use royale_core::cards::{CardId, UnitBlueprint};
use royale_core::commands::PlayerCommand;
use royale_core::components::AttackCooldown;
use royale_core::config::{EconomyConfig, MatchConfig};
use royale_core::constants::*;
use royale_core::enums::*;
use royale_core::events::BattleEvent;
use royale_core::state::{MatchSnapshot, TowerView};
use royale_core::types::{EntityId, Position};

use crate::engine::BattleEngine;
use crate::systems::targeting::{nearest_enemy, Candidate};

const KNIGHT: CardId = CardId(1);

fn passive_config() -> MatchConfig {
    MatchConfig {
        opponent: OpponentMode::Passive,
        ..Default::default()
    }
}

fn blueprint(hitpoints: i32, damage: i32) -> UnitBlueprint {
    UnitBlueprint {
        card: KNIGHT,
        hitpoints,
        damage,
        attack_speed: 1.0,
        range: 1.2,
        speed: 1.0,
    }
}

fn find_tower(snapshot: &MatchSnapshot, team: Team, kind: TowerKind, x: f64) -> TowerView {
    snapshot
        .towers
        .iter()
        .find(|t| t.team == team && t.kind == kind && (t.position.x - x).abs() < 1e-9)
        .cloned()
        .expect("tower present")
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = MatchConfig {
        difficulty: Difficulty::Hard,
        seed: 12345,
        ..Default::default()
    };
    let mut engine_a = BattleEngine::new(config.clone());
    let mut engine_b = BattleEngine::new(config);

    for frame in 0..600 {
        if frame % 90 == 0 {
            let x = 3.5 + (frame / 90 % 3) as f64 * 5.5;
            for card in 1..=8 {
                engine_a.deploy(CardId(card), x, 10.0);
                engine_b.deploy(CardId(card), x, 10.0);
            }
        }
        let snap_a = engine_a.advance(1.0 / 60.0);
        let snap_b = engine_b.advance(1.0 / 60.0);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = BattleEngine::new(MatchConfig {
        difficulty: Difficulty::Legendary,
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = BattleEngine::new(MatchConfig {
        difficulty: Difficulty::Legendary,
        seed: 222,
        ..Default::default()
    });

    // Opponent placement rolls differ once the AI starts deploying.
    let mut diverged = false;
    for _ in 0..600 {
        let json_a = serde_json::to_string(&engine_a.advance(0.1)).unwrap();
        let json_b = serde_json::to_string(&engine_b.advance(0.1)).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should eventually diverge");
}

#[test]
fn test_zero_delta_is_idempotent() {
    let mut engine = BattleEngine::new(MatchConfig::default());
    engine.advance(2.0);
    let before = engine.advance(0.0);
    let after = engine.advance(0.0);

    assert_eq!(before.time, after.time);
    assert_eq!(before.timer_remaining_secs, after.timer_remaining_secs);
    assert_eq!(before.coins.amount, after.coins.amount);
    assert_eq!(
        serde_json::to_string(&before.units).unwrap(),
        serde_json::to_string(&after.units).unwrap()
    );
    assert!(after.events.is_empty());
}

#[test]
fn test_invalid_delta_ignored() {
    let mut engine = BattleEngine::new(passive_config());
    let snap = engine.advance(f64::NAN);
    assert_eq!(snap.time.tick, 0);
    let snap = engine.advance(-1.0);
    assert_eq!(snap.time.tick, 0);
    assert_eq!(snap.status, MatchStatus::Playing);
}

#[test]
fn test_large_delta_split_into_bounded_steps() {
    let mut engine = BattleEngine::new(passive_config());
    let snap = engine.advance(1.0);
    // ceil(1.0 / MAX_STEP_SECS) sub-steps, give or take float rounding.
    assert!(snap.time.tick >= 30 && snap.time.tick <= 31, "ticks = {}", snap.time.tick);
    assert!((snap.time.elapsed_secs - 1.0).abs() < 1e-9);
}

#[test]
fn test_huge_delta_capped_at_match_clock() {
    let mut engine = BattleEngine::new(MatchConfig {
        match_duration_secs: 10.0,
        ..passive_config()
    });
    let snap = engine.advance(1e300);

    assert_eq!(snap.status, MatchStatus::Draw);
    assert_eq!(snap.timer_remaining_secs, 0.0);
    assert!((snap.time.elapsed_secs - 10.0).abs() < 1e-9);
    // Still walked in bounded steps, not one jump.
    assert!(snap.time.tick >= 300 && snap.time.tick <= 301, "ticks = {}", snap.time.tick);
}

// ---- Match setup ----

#[test]
fn test_standard_layout() {
    let mut engine = BattleEngine::new(MatchConfig::default());
    let snap = engine.snapshot();

    assert_eq!(snap.status, MatchStatus::Playing);
    assert_eq!(snap.towers.len(), 6);
    assert!(snap.units.is_empty());
    assert_eq!(snap.timer_remaining_secs, MATCH_DURATION_SECS);
    assert_eq!(snap.coins.whole, 5);
    assert_eq!(snap.hand.len(), DEFAULT_HAND_SIZE);
    assert!(snap.next_card.is_some());
    assert_eq!(snap.player_health_pct, 100.0);
    assert_eq!(snap.enemy_health_pct, 100.0);

    let king = find_tower(&snap, Team::Enemy, TowerKind::King, 9.0);
    assert_eq!(king.position, Position::new(9.0, 29.5));
    assert_eq!(king.hp, KING_TOWER_HP);
    let princess = find_tower(&snap, Team::Player, TowerKind::Princess, 3.5);
    assert_eq!(princess.position, Position::new(3.5, 5.5));
}

#[test]
fn test_king_only_layout() {
    let mut engine = BattleEngine::new(MatchConfig {
        tower_layout: TowerLayout::KingOnly,
        ..passive_config()
    });
    let snap = engine.snapshot();
    assert_eq!(snap.towers.len(), 2);
    assert!(snap.towers.iter().all(|t| t.kind == TowerKind::King));
}

#[test]
fn test_empty_board_times_out_as_draw() {
    let mut engine = BattleEngine::new(passive_config());
    for _ in 0..179 {
        engine.advance(1.0);
    }
    assert_eq!(engine.status(), MatchStatus::Playing);

    let snap = engine.advance(1.0);
    assert_eq!(snap.status, MatchStatus::Draw);
    assert_eq!(snap.timer_remaining_secs, 0.0);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, BattleEvent::MatchEnded { status: MatchStatus::Draw })));

    // Terminal: nothing advances any more.
    let after = engine.advance(1.0);
    assert_eq!(after.time, snap.time);
}

// ---- Deployment gate ----

#[test]
fn test_deploy_spends_exact_cost() {
    let mut engine = BattleEngine::new(passive_config());
    let coins_before = engine.side(Team::Player).coins.current();

    let result = engine.deploy(KNIGHT, 9.0, 5.0);
    assert!(result.accepted);
    assert_eq!(result.reason, None);
    let unit = result.unit.expect("unit id");

    assert_eq!(engine.side(Team::Player).coins.current(), coins_before - 3.0);
    let snap = engine.snapshot();
    assert_eq!(snap.hand.len(), DEFAULT_HAND_SIZE - 1);
    assert!(snap.hand.iter().all(|c| c.id != KNIGHT));
    let view = snap.units.iter().find(|u| u.id == unit).expect("unit in snapshot");
    assert_eq!(view.team, Team::Player);
    assert_eq!(view.card, KNIGHT);
    assert_eq!(view.hp, view.max_hp);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, BattleEvent::UnitDeployed { id, .. } if *id == unit)));

    // The hand refills after the draw delay.
    let snap = engine.advance(HAND_REFILL_DELAY_SECS + 0.1);
    assert_eq!(snap.hand.len(), DEFAULT_HAND_SIZE);
}

#[test]
fn test_deploy_insufficient_funds() {
    let mut engine = BattleEngine::new(MatchConfig {
        economy: EconomyConfig {
            starting_coins: 2.0,
            ..Default::default()
        },
        ..passive_config()
    });
    let hand_before: Vec<CardId> = engine.side(Team::Player).hand.cards().iter().map(|c| c.id).collect();

    let result = engine.deploy(KNIGHT, 9.0, 5.0);
    assert!(!result.accepted);
    assert_eq!(result.reason, Some(DeployRejection::InsufficientFunds));
    assert_eq!(result.unit, None);

    let side = engine.side(Team::Player);
    assert_eq!(side.coins.current(), 2.0);
    let hand_after: Vec<CardId> = side.hand.cards().iter().map(|c| c.id).collect();
    assert_eq!(hand_before, hand_after);
    assert!(engine.snapshot().units.is_empty());
}

#[test]
fn test_deploy_out_of_zone() {
    let mut engine = BattleEngine::new(passive_config());

    for (x, y) in [(9.0, 20.0), (9.0, 14.5), (-0.5, 5.0), (18.5, 5.0), (9.0, f64::NAN)] {
        let result = engine.deploy(KNIGHT, x, y);
        assert_eq!(result.reason, Some(DeployRejection::OutOfZone), "({x}, {y})");
    }
    // Zone edges are inclusive.
    assert!(engine.deploy(KNIGHT, 0.0, DEPLOY_ZONE_DEPTH).accepted);
    assert_eq!(engine.side(Team::Player).coins.whole(), 2);
}

#[test]
fn test_deploy_card_not_in_hand() {
    let mut engine = BattleEngine::new(passive_config());
    // Standard hand holds cards 1-4.
    let result = engine.deploy(CardId(8), 9.0, 5.0);
    assert_eq!(result.reason, Some(DeployRejection::CardNotInHand));
    let result = engine.deploy(CardId(99), 9.0, 5.0);
    assert_eq!(result.reason, Some(DeployRejection::CardNotInHand));
}

#[test]
fn test_preview_does_not_mutate() {
    let mut engine = BattleEngine::new(passive_config());
    let preview = engine.preview_deploy(KNIGHT, 9.0, 5.0);
    assert!(preview.accepted);
    assert_eq!(preview.unit, None);
    assert_eq!(engine.side(Team::Player).coins.current(), STARTING_COINS);
    assert_eq!(
        engine.preview_deploy(KNIGHT, 9.0, 25.0).reason,
        Some(DeployRejection::OutOfZone)
    );
    assert!(engine.snapshot().units.is_empty());
}

#[test]
fn test_apply_commands() {
    let mut engine = BattleEngine::new(passive_config());
    let result = engine.apply(PlayerCommand::Deploy {
        card: KNIGHT,
        x: 9.0,
        y: 5.0,
    });
    assert!(result.is_some_and(|r| r.accepted));
    assert!(engine.apply(PlayerCommand::Pause).is_none());
    assert_eq!(engine.status(), MatchStatus::Paused);
    engine.apply(PlayerCommand::Resume);
    assert_eq!(engine.status(), MatchStatus::Playing);
}

// ---- Economy ----

#[test]
fn test_coin_regeneration_over_time() {
    let mut engine = BattleEngine::new(passive_config());
    for _ in 0..84 {
        engine.advance(0.1);
    }
    let snap = engine.snapshot();
    assert!((snap.coins.amount - 8.0).abs() < 1e-9, "coins = {}", snap.coins.amount);
    assert_eq!(snap.coins.whole, 8);
}

#[test]
fn test_coins_capped_at_max() {
    let mut engine = BattleEngine::new(passive_config());
    let snap = engine.advance(60.0);
    assert_eq!(snap.coins.amount, MAX_COINS);
    assert_eq!(snap.coins.whole, 10);
    assert!(snap.hand.iter().all(|c| c.affordable));
}

// ---- Movement and targeting ----

#[test]
fn test_unit_walks_toward_nearest_tower() {
    let mut engine = BattleEngine::new(passive_config());
    let id = engine.deploy(KNIGHT, 3.5, 10.0).unit.expect("deployed");

    let snap = engine.advance(1.0);
    let unit = snap.units.iter().find(|u| u.id == id).expect("alive");
    let princess = find_tower(&snap, Team::Enemy, TowerKind::Princess, 3.5);

    assert_eq!(unit.state, UnitState::Moving);
    assert_eq!(unit.target, Some(princess.id));
    assert!((unit.position.x - 3.5).abs() < 1e-9);
    assert!((unit.position.y - 11.0).abs() < 1e-9);
}

#[test]
fn test_unit_stops_at_attack_range() {
    let mut engine = BattleEngine::new(passive_config());
    let id = engine.spawn_test_unit(Team::Player, Position::new(3.5, 23.0), &blueprint(5000, 10));

    let snap = engine.advance(5.0);
    let unit = snap.units.iter().find(|u| u.id == id).expect("alive");
    let princess = find_tower(&snap, Team::Enemy, TowerKind::Princess, 3.5);
    assert_eq!(unit.state, UnitState::Attacking);
    assert!((unit.position.distance_to(&princess.position) - 1.2).abs() < 1e-6);
    assert!(princess.hp < princess.max_hp);
}

#[test]
fn test_nearest_enemy_tie_breaks_on_lowest_id() {
    let candidates = vec![
        Candidate {
            id: EntityId(9),
            team: Team::Enemy,
            position: Position::new(1.0, 0.0),
            is_tower: false,
        },
        Candidate {
            id: EntityId(4),
            team: Team::Enemy,
            position: Position::new(-1.0, 0.0),
            is_tower: false,
        },
        Candidate {
            id: EntityId(2),
            team: Team::Player,
            position: Position::new(0.0, 0.0),
            is_tower: false,
        },
    ];
    let origin = Position::new(0.0, 0.0);
    let best = nearest_enemy(Team::Player, &origin, &candidates, None).expect("target");
    assert_eq!(best.id, EntityId(4));

    assert!(nearest_enemy(Team::Player, &origin, &candidates, Some(0.5)).is_none());
    assert!(nearest_enemy(Team::Player, &origin, &candidates, Some(1.0)).is_some());
}

#[test]
fn test_tower_shoots_unit_in_range() {
    let mut engine = BattleEngine::new(passive_config());
    let id = engine.spawn_test_unit(Team::Enemy, Position::new(3.5, 9.0), &blueprint(300, 10));

    let snap = engine.advance(MAX_STEP_SECS);
    let unit = snap.units.iter().find(|u| u.id == id).expect("alive");
    assert_eq!(unit.hp, 300 - PRINCESS_TOWER_DAMAGE);
    let princess = find_tower(&snap, Team::Player, TowerKind::Princess, 3.5);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        BattleEvent::ProjectileFired { attacker, target, .. } if *attacker == princess.id && *target == id
    )));
}

#[test]
fn test_targets_never_friendly_or_dangling() {
    let mut engine = BattleEngine::new(MatchConfig {
        difficulty: Difficulty::Legendary,
        seed: 7,
        ..Default::default()
    });

    for frame in 0..1200 {
        if frame % 60 == 0 {
            let lane = LANE_X[frame / 60 % 3];
            for card in 1..=8 {
                if engine.deploy(CardId(card), lane, 12.0).accepted {
                    break;
                }
            }
        }
        let snap = engine.advance(1.0 / 30.0);
        for unit in &snap.units {
            let Some(target) = unit.target else { continue };
            let target_team = snap
                .units
                .iter()
                .map(|u| (u.id, u.team))
                .chain(snap.towers.iter().map(|t| (t.id, t.team)))
                .find(|(id, _)| *id == target)
                .map(|(_, team)| team);
            assert_eq!(
                target_team,
                Some(unit.team.opponent()),
                "unit {} targets {} which is friendly or gone",
                unit.id,
                target
            );
        }
        if snap.status.is_terminal() {
            break;
        }
    }
}

// ---- Combat ----

#[test]
fn test_lethal_hit_removes_tower_same_tick() {
    let mut engine = BattleEngine::new(passive_config());
    let princess = find_tower(&engine.snapshot(), Team::Enemy, TowerKind::Princess, 3.5);
    engine.set_health(princess.id, 40);
    engine.spawn_test_unit(Team::Player, Position::new(3.5, 25.5), &blueprint(300, 50));

    let snap = engine.advance(MAX_STEP_SECS);
    assert!(snap.towers.iter().all(|t| t.id != princess.id));
    assert!((snap.enemy_health_pct - (100.0 - 100.0 / 3.0)).abs() < 1e-9);
    assert_eq!(snap.player_health_pct, 100.0);
    assert_eq!(snap.status, MatchStatus::Playing);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        BattleEvent::Hit { target, damage: 50, remaining_hp: 0 } if *target == princess.id
    )));
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, BattleEvent::TowerDestroyed { id, .. } if *id == princess.id)));
}

#[test]
fn test_target_reacquired_after_kill() {
    let mut engine = BattleEngine::new(passive_config());
    let princess = find_tower(&engine.snapshot(), Team::Enemy, TowerKind::Princess, 3.5);
    engine.set_health(princess.id, 40);
    let id = engine.spawn_test_unit(Team::Player, Position::new(3.5, 25.5), &blueprint(5000, 50));

    let snap = engine.advance(MAX_STEP_SECS);
    assert_eq!(snap.units.iter().find(|u| u.id == id).and_then(|u| u.target), None);

    let snap = engine.advance(MAX_STEP_SECS);
    let king = find_tower(&snap, Team::Enemy, TowerKind::King, 9.0);
    let unit = snap.units.iter().find(|u| u.id == id).expect("alive");
    assert_eq!(unit.target, Some(king.id));
    assert_eq!(unit.state, UnitState::Moving);
}

#[test]
fn test_attack_cooldown_limits_rate() {
    let mut engine = BattleEngine::new(passive_config());
    let princess = find_tower(&engine.snapshot(), Team::Enemy, TowerKind::Princess, 3.5);
    engine.spawn_test_unit(Team::Player, Position::new(3.5, 25.5), &blueprint(5000, 10));

    // Attacks at t = 0, 1, 2 for one attack per second.
    let snap = engine.advance(2.5);
    let princess_now = find_tower(&snap, Team::Enemy, TowerKind::Princess, 3.5);
    assert_eq!(princess_now.hp, princess.max_hp - 30);
}

#[test]
fn test_stale_target_attack_dropped() {
    let mut engine = BattleEngine::new(passive_config());
    let first = engine.spawn_test_unit(Team::Player, Position::new(9.0, 15.0), &blueprint(300, 50));
    let second = engine.spawn_test_unit(Team::Player, Position::new(9.0, 17.0), &blueprint(300, 50));
    let victim = engine.spawn_test_unit(Team::Enemy, Position::new(9.0, 16.0), &blueprint(30, 10));

    let snap = engine.advance(MAX_STEP_SECS);
    assert!(snap.units.iter().all(|u| u.id != victim));
    let hits = snap
        .events
        .iter()
        .filter(|e| matches!(e, BattleEvent::Hit { target, .. } if *target == victim))
        .count();
    assert_eq!(hits, 1);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, BattleEvent::ProjectileFired { attacker, .. } if *attacker == first)));

    // The dropped attack keeps the second attacker ready.
    let entity = engine.entity(second).expect("second alive");
    let cooldown = *engine.world().get::<&AttackCooldown>(entity).unwrap();
    assert_eq!(cooldown.remaining_secs, 0.0);
    assert_eq!(snap.status, MatchStatus::Playing);
}

// ---- Match outcome ----

#[test]
fn test_king_destroyed_is_victory() {
    let mut engine = BattleEngine::new(passive_config());
    let king = find_tower(&engine.snapshot(), Team::Enemy, TowerKind::King, 9.0);
    engine.set_health(king.id, 40);
    engine.spawn_test_unit(Team::Player, Position::new(9.0, 28.5), &blueprint(300, 50));

    let snap = engine.advance(MAX_STEP_SECS);
    assert_eq!(snap.status, MatchStatus::Victory);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, BattleEvent::MatchEnded { status: MatchStatus::Victory })));
}

#[test]
fn test_player_king_destroyed_is_defeat() {
    let mut engine = BattleEngine::new(MatchConfig {
        tower_layout: TowerLayout::KingOnly,
        ..passive_config()
    });
    let king = find_tower(&engine.snapshot(), Team::Player, TowerKind::King, 9.0);
    engine.set_health(king.id, 40);
    engine.spawn_test_unit(Team::Enemy, Position::new(9.0, 3.5), &blueprint(300, 50));

    let snap = engine.advance(MAX_STEP_SECS);
    assert_eq!(snap.status, MatchStatus::Defeat);
    assert_eq!(snap.player_health_pct, 0.0);
}

#[test]
fn test_both_kings_same_step_is_draw() {
    let mut engine = BattleEngine::new(MatchConfig {
        tower_layout: TowerLayout::KingOnly,
        ..passive_config()
    });
    let snap = engine.snapshot();
    let player_king = find_tower(&snap, Team::Player, TowerKind::King, 9.0);
    let enemy_king = find_tower(&snap, Team::Enemy, TowerKind::King, 9.0);
    engine.set_health(player_king.id, 40);
    engine.set_health(enemy_king.id, 40);
    engine.spawn_test_unit(Team::Player, Position::new(9.0, 28.5), &blueprint(300, 50));
    engine.spawn_test_unit(Team::Enemy, Position::new(9.0, 3.5), &blueprint(300, 50));

    assert_eq!(engine.advance(MAX_STEP_SECS).status, MatchStatus::Draw);
}

#[test]
fn test_timeout_by_tower_health() {
    let mut engine = BattleEngine::new(MatchConfig {
        match_duration_secs: 5.0,
        timeout_resolution: TimeoutResolution::TowerHealth,
        ..passive_config()
    });
    let princess = find_tower(&engine.snapshot(), Team::Enemy, TowerKind::Princess, 3.5);
    engine.set_health(princess.id, 1);
    engine.spawn_test_unit(Team::Player, Position::new(3.5, 25.5), &blueprint(300, 50));

    for _ in 0..5 {
        engine.advance(1.0);
    }
    let snap = engine.snapshot();
    assert_eq!(snap.status, MatchStatus::Victory);
    assert_eq!(snap.timer_remaining_secs, 0.0);
}

#[test]
fn test_timeout_equal_health_is_draw() {
    let mut engine = BattleEngine::new(MatchConfig {
        match_duration_secs: 3.0,
        timeout_resolution: TimeoutResolution::TowerHealth,
        ..passive_config()
    });
    assert_eq!(engine.advance(3.0).status, MatchStatus::Draw);
}

// ---- Lifecycle ----

#[test]
fn test_pause_and_resume() {
    let mut engine = BattleEngine::new(passive_config());
    engine.advance(1.0);
    engine.pause();
    let paused = engine.advance(5.0);
    assert_eq!(paused.status, MatchStatus::Paused);
    assert!((paused.timer_remaining_secs - (MATCH_DURATION_SECS - 1.0)).abs() < 1e-9);

    let result = engine.deploy(KNIGHT, 9.0, 5.0);
    assert_eq!(result.reason, Some(DeployRejection::MatchNotActive));
    assert!(engine.preview_deploy(KNIGHT, 9.0, 5.0).accepted);

    engine.resume();
    let resumed = engine.advance(1.0);
    assert_eq!(resumed.status, MatchStatus::Playing);
    assert!((resumed.timer_remaining_secs - (MATCH_DURATION_SECS - 2.0)).abs() < 1e-9);
}

#[test]
fn test_restart_resets_match() {
    let mut engine = BattleEngine::new(MatchConfig::default());
    engine.deploy(KNIGHT, 9.0, 5.0);
    engine.advance(20.0);

    engine.restart();
    let snap = engine.snapshot();
    assert_eq!(snap.status, MatchStatus::Playing);
    assert_eq!(snap.time.tick, 0);
    assert_eq!(snap.timer_remaining_secs, MATCH_DURATION_SECS);
    assert_eq!(snap.coins.amount, STARTING_COINS);
    assert_eq!(snap.towers.len(), 6);
    assert!(snap.units.is_empty());
    assert!(snap.events.is_empty());
}

#[test]
fn test_exit_discards_state() {
    let mut engine = BattleEngine::new(passive_config());
    engine.deploy(KNIGHT, 9.0, 5.0);
    engine.exit();

    let snap = engine.advance(1.0);
    assert_eq!(snap.status, MatchStatus::Exited);
    assert!(snap.units.is_empty());
    assert!(snap.towers.is_empty());
    assert!(snap.hand.is_empty());
    assert_eq!(snap.coins.amount, 0.0);
    assert_eq!(
        engine.deploy(KNIGHT, 9.0, 5.0).reason,
        Some(DeployRejection::MatchNotActive)
    );
}

#[test]
fn test_fault_halts_match_until_restart() {
    let mut engine = BattleEngine::new(passive_config());
    let king = find_tower(&engine.snapshot(), Team::Player, TowerKind::King, 9.0);
    engine.set_health(king.id, KING_TOWER_HP + 1);

    let snap = engine.advance(1.0);
    assert_eq!(snap.status, MatchStatus::Error);
    assert!(snap.error.is_some());
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, BattleEvent::MatchEnded { status: MatchStatus::Error })));

    let after = engine.advance(1.0);
    assert_eq!(after.time, snap.time);
    assert_eq!(
        engine.deploy(KNIGHT, 9.0, 5.0).reason,
        Some(DeployRejection::MatchNotActive)
    );

    engine.restart();
    assert_eq!(engine.status(), MatchStatus::Playing);
    assert!(engine.snapshot().error.is_none());
}

// ---- Opponent ----

#[test]
fn test_ai_opponent_deploys_in_own_zone() {
    let mut engine = BattleEngine::new(MatchConfig {
        difficulty: Difficulty::Legendary,
        ..Default::default()
    });
    let mut enemy_deploys = Vec::new();
    for _ in 0..30 {
        let snap = engine.advance(1.0);
        for event in snap.events {
            if let BattleEvent::UnitDeployed { team: Team::Enemy, position, .. } = event {
                enemy_deploys.push(position);
            }
        }
    }
    assert!(!enemy_deploys.is_empty());
    for position in enemy_deploys {
        assert!(crate::deploy::in_deploy_zone(Team::Enemy, &position));
    }
}

#[test]
fn test_passive_opponent_never_deploys() {
    let mut engine = BattleEngine::new(passive_config());
    let snap = engine.advance(60.0);
    assert!(snap.units.is_empty());
    assert_eq!(engine.side(Team::Enemy).coins.whole(), 10);
}

// ---- Invariants under arbitrary input ----

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_health_and_coins_stay_bounded(
        ops in prop::collection::vec(
            (0.0f64..0.5, prop::option::of((1u32..=8, 0.0f64..18.0, 0.0f64..32.0))),
            1..120,
        ),
        seed in any::<u64>(),
    ) {
        let mut engine = BattleEngine::new(MatchConfig {
            difficulty: Difficulty::Hard,
            seed,
            ..Default::default()
        });
        for (dt, deploy) in ops {
            if let Some((card, x, y)) = deploy {
                let result = engine.deploy(CardId(card), x, y);
                prop_assert_eq!(result.accepted, result.unit.is_some());
            }
            let snap = engine.advance(dt);
            prop_assert_ne!(snap.status, MatchStatus::Error);
            prop_assert!(snap.coins.amount >= 0.0 && snap.coins.amount <= snap.coins.max);
            for unit in &snap.units {
                prop_assert!(unit.hp > 0 && unit.hp <= unit.max_hp);
            }
            for tower in &snap.towers {
                prop_assert!(tower.hp > 0 && tower.hp <= tower.max_hp);
            }
            let enemy = engine.side(Team::Enemy);
            prop_assert!(enemy.coins.current() >= 0.0 && enemy.coins.current() <= enemy.coins.max());
        }
    }
}

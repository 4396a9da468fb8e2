//! Plain-text rendering of snapshots and events for the terminal.

use std::fmt::Write;

use royale_core::enums::{MatchStatus, Team};
use royale_core::events::BattleEvent;
use royale_core::state::MatchSnapshot;

const COIN_BAR_WIDTH: usize = 10;

/// `m:ss`, rounding up so the clock reads 0:00 only at expiry.
pub fn format_timer(secs: f64) -> String {
    let total = secs.max(0.0).ceil() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Multi-line HUD: clock, tower health, coins, hand and unit counts.
pub fn render(snapshot: &MatchSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "[{}] {:?}  ({:?}, {:?})",
        format_timer(snapshot.timer_remaining_secs),
        snapshot.status,
        snapshot.mode,
        snapshot.difficulty
    );
    let _ = writeln!(
        out,
        "towers  you {:>3.0}%  enemy {:>3.0}%",
        snapshot.player_health_pct, snapshot.enemy_health_pct
    );

    let coins = &snapshot.coins;
    let filled = (coins.whole as usize).min(COIN_BAR_WIDTH);
    let _ = writeln!(
        out,
        "coins   {:>2}/{} [{}{}] +{:.2}",
        coins.whole,
        coins.max,
        "#".repeat(filled),
        ".".repeat(COIN_BAR_WIDTH - filled),
        coins.regen_progress
    );

    let hand: Vec<String> = snapshot
        .hand
        .iter()
        .map(|card| {
            let mark = if card.affordable { "*" } else { "" };
            format!("{}:{}({}){}", card.id.0, card.name, card.cost, mark)
        })
        .collect();
    let next = snapshot
        .next_card
        .as_ref()
        .map(|card| card.name.as_str())
        .unwrap_or("-");
    let _ = writeln!(out, "hand    {}  next: {}", hand.join(" "), next);

    let ours = snapshot.units.iter().filter(|u| u.team == Team::Player).count();
    let theirs = snapshot.units.len() - ours;
    let _ = write!(out, "units   you {ours}  enemy {theirs}");
    out
}

/// One-line description of the events worth printing. Hits and shots are skipped.
pub fn describe_event(event: &BattleEvent) -> Option<String> {
    match event {
        BattleEvent::UnitDeployed { id, card, team, position } => Some(format!(
            "{team:?} deployed card {} as {id} at ({:.1}, {:.1})",
            card.0, position.x, position.y
        )),
        BattleEvent::TowerDestroyed { id, team, kind, team_health_pct } => Some(format!(
            "{team:?} {kind:?} tower {id} destroyed, {team_health_pct:.0}% left"
        )),
        BattleEvent::MatchEnded { status } => Some(format!("match ended: {status:?}")),
        BattleEvent::UnitDestroyed { .. }
        | BattleEvent::ProjectileFired { .. }
        | BattleEvent::Hit { .. } => None,
    }
}

/// Final result line.
pub fn summary(snapshot: &MatchSnapshot) -> String {
    let outcome = match snapshot.status {
        MatchStatus::Victory => "Victory",
        MatchStatus::Defeat => "Defeat",
        MatchStatus::Draw => "Draw",
        MatchStatus::Error => "Error",
        MatchStatus::Exited => "Exited",
        MatchStatus::Playing | MatchStatus::Paused => "Unfinished",
    };
    let mut line = format!(
        "{outcome} after {:.1}s: you {:.0}%, enemy {:.0}%",
        snapshot.time.elapsed_secs, snapshot.player_health_pct, snapshot.enemy_health_pct
    );
    if let Some(err) = &snapshot.error {
        let _ = write!(line, " ({err})");
    }
    line
}

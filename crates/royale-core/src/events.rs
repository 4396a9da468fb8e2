//! Battle events emitted by the simulation for visual feedback.
//!
//! Events are observational only: dropping them never changes the outcome.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::enums::*;
use crate::types::{EntityId, Position};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BattleEvent {
    /// A card was played and its unit entered the arena.
    UnitDeployed {
        id: EntityId,
        card: CardId,
        team: Team,
        position: Position,
    },
    /// An attacker launched a projectile or swing at a target.
    ProjectileFired {
        attacker: EntityId,
        target: EntityId,
        from: Position,
        to: Position,
    },
    /// Damage landed on a target.
    Hit {
        target: EntityId,
        damage: i32,
        remaining_hp: i32,
    },
    UnitDestroyed { id: EntityId, team: Team },
    TowerDestroyed {
        id: EntityId,
        team: Team,
        kind: TowerKind,
        /// Owning side's aggregate tower health after the loss.
        team_health_pct: f64,
    },
    /// The match reached a terminal status.
    MatchEnded { status: MatchStatus },
}

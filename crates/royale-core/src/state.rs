//! Match snapshot: the complete read model handed to the presentation layer each frame.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::enums::*;
use crate::events::BattleEvent;
use crate::types::{EntityId, Position, SimTime};

/// Complete visible state after a call to `advance`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub time: SimTime,
    pub status: MatchStatus,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub timer_remaining_secs: f64,
    pub units: Vec<UnitView>,
    pub towers: Vec<TowerView>,
    pub coins: CoinView,
    pub hand: Vec<CardView>,
    pub next_card: Option<CardView>,
    pub player_health_pct: f64,
    pub enemy_health_pct: f64,
    /// Events since the previous snapshot.
    pub events: Vec<BattleEvent>,
    /// Description of the fault when `status` is `Error`.
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitView {
    pub id: EntityId,
    pub team: Team,
    pub card: CardId,
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
    pub state: UnitState,
    pub target: Option<EntityId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub id: EntityId,
    pub team: Team,
    pub kind: TowerKind,
    pub position: Position,
    pub hp: i32,
    pub max_hp: i32,
}

/// Player coin balance for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinView {
    /// Exact fractional balance.
    pub amount: f64,
    /// Whole coins available to spend.
    pub whole: u32,
    /// Progress toward the next coin, in `[0, 1)`.
    pub regen_progress: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub name: String,
    pub cost: u32,
    /// Whether the player can currently afford the card.
    pub affordable: bool,
}

/// Answer to a deployment request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeployResult {
    pub accepted: bool,
    pub reason: Option<DeployRejection>,
    /// Id of the spawned unit when accepted.
    pub unit: Option<EntityId>,
}

impl DeployResult {
    pub fn accepted(unit: EntityId) -> Self {
        Self {
            accepted: true,
            reason: None,
            unit: Some(unit),
        }
    }

    pub fn rejected(reason: DeployRejection) -> Self {
        Self {
            accepted: false,
            reason: Some(reason),
            unit: None,
        }
    }
}

//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::ARENA_HEIGHT;

/// Side an entity fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Player => Team::Enemy,
            Team::Enemy => Team::Player,
        }
    }

    /// y coordinate of this side's own baseline.
    pub fn baseline_y(self) -> f64 {
        match self {
            Team::Player => 0.0,
            Team::Enemy => ARENA_HEIGHT,
        }
    }

    /// y coordinate `depth` units in front of this side's baseline.
    pub fn y_at_depth(self, depth: f64) -> f64 {
        match self {
            Team::Player => depth,
            Team::Enemy => ARENA_HEIGHT - depth,
        }
    }

    /// Distance of `y` from this side's baseline.
    pub fn depth_of(self, y: f64) -> f64 {
        match self {
            Team::Player => y,
            Team::Enemy => ARENA_HEIGHT - y,
        }
    }
}

/// Tower variant. Kings and princesses differ only in base stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    King,
    Princess,
}

/// Per-tick unit behaviour, derived from target distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitState {
    #[default]
    Idle,
    Moving,
    Attacking,
}

/// Top-level match status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    #[default]
    Playing,
    Paused,
    /// Enemy side lost its king or all of its towers.
    Victory,
    /// Player side lost its king or all of its towers.
    Defeat,
    /// Timer expired without a winner.
    Draw,
    /// An internal fault stopped the match. Only `restart` leaves this state.
    Error,
    /// Match was exited; all state has been discarded.
    Exited,
}

impl MatchStatus {
    /// Terminal statuses never advance the clock again.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            MatchStatus::Victory
                | MatchStatus::Defeat
                | MatchStatus::Draw
                | MatchStatus::Error
                | MatchStatus::Exited
        )
    }
}

/// Game mode selected by the host page. Carried through to the read model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Battle,
    Campaign,
    Puzzle,
}

/// Opponent difficulty. Only affects how often the AI acts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Expert,
    Legendary,
}

/// Tower arrangement built at match start, mirrored for both sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerLayout {
    /// One king tower flanked by two princess towers.
    #[default]
    Standard,
    /// A single king tower.
    KingOnly,
}

/// How the match resolves when the timer runs out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutResolution {
    /// Timer expiry is always a draw.
    #[default]
    Draw,
    /// The side with more aggregate tower health wins; equal health is a draw.
    TowerHealth,
}

/// Who drives the enemy side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentMode {
    /// Seeded AI plays cards from the enemy hand.
    #[default]
    Ai,
    /// Enemy never deploys; only its towers fight.
    Passive,
}

/// Reason a deployment request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeployRejection {
    OutOfZone,
    InsufficientFunds,
    CardNotInHand,
    MatchNotActive,
}

//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in arena space (arena units, Cartesian).
/// x = across the arena, y = from the player baseline (0) toward the enemy baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Stable identity of a unit or tower within one match.
///
/// Ids are handed out in spawn order and never reused, so they double as
/// the tie-break key for equidistant targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of sub-steps simulated so far.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.to_vec().distance(other.to_vec())
    }

    /// Squared distance, for comparisons that do not need the root.
    pub fn distance_squared_to(&self, other: &Position) -> f64 {
        self.to_vec().distance_squared(other.to_vec())
    }

    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl SimTime {
    /// Advance by one sub-step of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

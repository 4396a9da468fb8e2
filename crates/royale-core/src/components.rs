//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behaviour.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::enums::*;
use crate::types::EntityId;

/// Hit points. `current` stays within `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

/// Offensive stats shared by units and towers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attack {
    /// Hit points removed per attack.
    pub damage: i32,
    /// Attacks per second. The cooldown resets to `1 / attack_speed`.
    pub attack_speed: f64,
    /// Maximum distance to the target for an attack to land.
    pub range: f64,
}

/// Seconds until the entity may attack again. Never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AttackCooldown {
    pub remaining_secs: f64,
}

/// Movement speed in arena units per second. Towers have none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mobility {
    pub speed: f64,
}

/// Weak reference to the current target.
/// May name an entity that no longer exists; revalidate before every use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target(pub Option<EntityId>);

/// Marks a mobile combatant and records the card that spawned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub card: CardId,
}

/// Marks a stationary defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tower {
    pub kind: TowerKind,
}

// Position, Team, EntityId and UnitState are also used directly as components.

//! Card definitions and the unit blueprints they resolve to.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Identifier of a card definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

/// Static card definition. Unit stats are optional; missing ones fall back
/// to the `DEFAULT_UNIT_*` constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    /// Coins spent when the card is played.
    pub cost: u32,
    #[serde(default)]
    pub damage: Option<i32>,
    #[serde(default)]
    pub hitpoints: Option<i32>,
    #[serde(default)]
    pub range: Option<f64>,
    #[serde(default)]
    pub speed: Option<f64>,
    /// Attacks per second.
    #[serde(default)]
    pub attack_speed: Option<f64>,
}

/// Fully resolved stats of the unit a card spawns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitBlueprint {
    pub card: CardId,
    pub hitpoints: i32,
    pub damage: i32,
    pub attack_speed: f64,
    pub range: f64,
    pub speed: f64,
}

impl Card {
    pub fn blueprint(&self) -> UnitBlueprint {
        UnitBlueprint {
            card: self.id,
            hitpoints: self.hitpoints.unwrap_or(DEFAULT_UNIT_HP),
            damage: self.damage.unwrap_or(DEFAULT_UNIT_DAMAGE),
            attack_speed: self.attack_speed.unwrap_or(DEFAULT_UNIT_ATTACK_SPEED),
            range: self.range.unwrap_or(DEFAULT_UNIT_RANGE),
            speed: self.speed.unwrap_or(DEFAULT_UNIT_SPEED),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn unit_card(
    id: u32,
    name: &str,
    cost: u32,
    hitpoints: i32,
    damage: i32,
    attack_speed: f64,
    range: f64,
    speed: f64,
) -> Card {
    Card {
        id: CardId(id),
        name: name.to_string(),
        cost,
        damage: Some(damage),
        hitpoints: Some(hitpoints),
        range: Some(range),
        speed: Some(speed),
        attack_speed: Some(attack_speed),
    }
}

/// The default eight-card deck used by both sides.
pub fn standard_deck() -> Vec<Card> {
    vec![
        unit_card(1, "Knight", 3, 660, 75, 1.0 / 1.2, 1.2, 1.0),
        unit_card(2, "Archers", 3, 250, 40, 1.0, 5.0, 1.0),
        unit_card(3, "Giant", 5, 2000, 120, 1.0 / 1.5, 1.2, 0.75),
        unit_card(4, "Mini Pekka", 4, 600, 325, 1.0 / 1.8, 1.0, 1.5),
        unit_card(5, "Musketeer", 4, 340, 100, 1.0 / 1.1, 6.0, 1.0),
        unit_card(6, "Valkyrie", 4, 880, 120, 1.0 / 1.5, 1.2, 1.0),
        unit_card(7, "Skeletons", 1, 32, 32, 1.0, 1.0, 1.5),
        unit_card(8, "Hog Rider", 4, 800, 150, 1.0 / 1.6, 1.0, 2.0),
    ]
}

//! Match configuration, loadable from TOML.
//!
//! Every field has a default, so an empty document yields the standard
//! 3-minute battle against a normal-difficulty AI.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{standard_deck, Card};
use crate::constants::*;
use crate::enums::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Coin pool tuning, shared by both sides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub max_coins: f64,
    pub starting_coins: f64,
    /// Seconds per regenerated coin.
    pub regen_interval_secs: f64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            max_coins: MAX_COINS,
            starting_coins: STARTING_COINS,
            regen_interval_secs: COIN_REGEN_INTERVAL_SECS,
        }
    }
}

/// Configuration for a new match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub initial_hand_size: usize,
    pub tower_layout: TowerLayout,
    pub match_duration_secs: f64,
    pub timeout_resolution: TimeoutResolution,
    /// RNG seed for the opponent AI. Same seed = same match.
    pub seed: u64,
    pub opponent: OpponentMode,
    pub ai_decision_interval_secs: f64,
    pub economy: EconomyConfig,
    pub hand_refill_delay_secs: f64,
    pub player_deck: Vec<Card>,
    pub enemy_deck: Vec<Card>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            difficulty: Difficulty::default(),
            initial_hand_size: DEFAULT_HAND_SIZE,
            tower_layout: TowerLayout::default(),
            match_duration_secs: MATCH_DURATION_SECS,
            timeout_resolution: TimeoutResolution::default(),
            seed: 42,
            opponent: OpponentMode::default(),
            ai_decision_interval_secs: AI_DECISION_INTERVAL_SECS,
            economy: EconomyConfig::default(),
            hand_refill_delay_secs: HAND_REFILL_DELAY_SECS,
            player_deck: standard_deck(),
            enemy_deck: standard_deck(),
        }
    }
}

impl MatchConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_hand_size == 0 {
            return Err(invalid("initial_hand_size must be at least 1"));
        }
        for (side, deck) in [("player", &self.player_deck), ("enemy", &self.enemy_deck)] {
            if deck.len() <= self.initial_hand_size {
                return Err(invalid(format!(
                    "{side}_deck needs more than {} cards to cycle, has {}",
                    self.initial_hand_size,
                    deck.len()
                )));
            }
            for card in deck {
                validate_card(card)?;
            }
        }
        if !(self.match_duration_secs.is_finite() && self.match_duration_secs > 0.0) {
            return Err(invalid("match_duration_secs must be positive"));
        }
        if !(self.ai_decision_interval_secs.is_finite() && self.ai_decision_interval_secs > 0.0) {
            return Err(invalid("ai_decision_interval_secs must be positive"));
        }
        if !(self.hand_refill_delay_secs.is_finite() && self.hand_refill_delay_secs >= 0.0) {
            return Err(invalid("hand_refill_delay_secs must not be negative"));
        }
        let eco = &self.economy;
        if !(eco.max_coins.is_finite() && eco.max_coins > 0.0) {
            return Err(invalid("economy.max_coins must be positive"));
        }
        if !(0.0..=eco.max_coins).contains(&eco.starting_coins) {
            return Err(invalid("economy.starting_coins must lie within [0, max_coins]"));
        }
        if !(eco.regen_interval_secs.is_finite() && eco.regen_interval_secs > 0.0) {
            return Err(invalid("economy.regen_interval_secs must be positive"));
        }
        Ok(())
    }
}

fn validate_card(card: &Card) -> Result<(), ConfigError> {
    let stats = card.blueprint();
    if stats.hitpoints <= 0 {
        return Err(invalid(format!("card '{}' needs positive hitpoints", card.name)));
    }
    if stats.damage < 0 {
        return Err(invalid(format!("card '{}' has negative damage", card.name)));
    }
    if !(stats.attack_speed.is_finite() && stats.attack_speed > 0.0) {
        return Err(invalid(format!("card '{}' needs a positive attack_speed", card.name)));
    }
    if !(stats.range.is_finite() && stats.range >= 0.0) || !(stats.speed.is_finite() && stats.speed >= 0.0) {
        return Err(invalid(format!("card '{}' has an invalid range or speed", card.name)));
    }
    Ok(())
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

//! Difficulty-specific behaviour profiles.
//!
//! Difficulty only changes how often the opponent plays. Card choice and
//! placement follow the same policy at every level.

use royale_core::constants::*;
use royale_core::enums::Difficulty;

/// How an opponent of a given difficulty plays.
pub struct OpponentProfile {
    /// Probability of acting in one decision window.
    pub act_chance: f64,
}

/// Get the behaviour profile for a difficulty.
pub fn get_profile(difficulty: Difficulty) -> OpponentProfile {
    let act_chance = match difficulty {
        Difficulty::Easy => AI_ACT_CHANCE_EASY,
        Difficulty::Normal => AI_ACT_CHANCE_NORMAL,
        Difficulty::Hard => AI_ACT_CHANCE_HARD,
        Difficulty::Expert => AI_ACT_CHANCE_EXPERT,
        Difficulty::Legendary => AI_ACT_CHANCE_LEGENDARY,
    };
    OpponentProfile { act_chance }
}

//! Player commands sent from the presentation layer to the engine.
//!
//! Commands are applied in arrival order between ticks, never mid-tick.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Play a card from the hand at an arena position.
    Deploy { card: CardId, x: f64, y: f64 },
    /// Validate a deployment without playing it (placement preview).
    PreviewDeploy { card: CardId, x: f64, y: f64 },
    /// Pause the match.
    Pause,
    /// Resume a paused match.
    Resume,
    /// Discard the current match and start a fresh one with the same config.
    Restart,
    /// Leave the match and discard all state.
    Exit,
}

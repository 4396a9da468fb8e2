//! Battle simulation engine for Royale.
//!
//! Owns the hecs ECS world, advances all systems in a fixed order each
//! sub-step, gates deployments, and produces `MatchSnapshot`s for whatever
//! presentation layer drives it.

pub mod clock;
pub mod deck;
pub mod deploy;
pub mod economy;
pub mod engine;
pub mod error;
pub mod side;
pub mod systems;
pub mod world_setup;

pub use engine::BattleEngine;
pub use error::SimError;
pub use royale_core as core;

#[cfg(test)]
mod tests;

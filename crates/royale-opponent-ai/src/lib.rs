//! Opponent AI for Royale.
//!
//! Pure decision functions that pick which card the enemy side plays and
//! where. No ECS dependency: the simulation gathers an [`planner::OpponentContext`],
//! asks for a decision, and pushes the result through its deployment gate.

pub mod planner;
pub mod profiles;

pub use royale_core as core;

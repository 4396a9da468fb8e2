//! ECS systems that operate on the arena world each sub-step.
//!
//! Systems are free functions that take `&mut World` (or `&World` for read-only).
//! They do not own state: entity state lives in components, side state in `Sides`.

pub mod cleanup;
pub mod combat;
pub mod invariants;
pub mod movement;
pub mod opponent;
pub mod snapshot;
pub mod targeting;

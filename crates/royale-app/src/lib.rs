//! Royale headless application.
//!
//! Wires the simulation crates to a terminal: a game loop thread driven by
//! the wall clock, a command channel, a scripted player and a text HUD.

pub mod autopilot;
pub mod game_loop;
pub mod hud;
pub mod input;
pub mod state;

pub use royale_core as core;

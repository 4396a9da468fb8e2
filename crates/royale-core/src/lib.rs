//! Core types and definitions for the Royale battle simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, cards, commands, state snapshots, events, configuration
//! and constants. It has no dependency on any runtime or rendering framework.

pub mod cards;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

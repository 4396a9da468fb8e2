//! Faults that abort a tick. Expected outcomes such as refused
//! deployments are values, not errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("entity vanished mid-tick: {0}")]
    NoSuchEntity(#[from] hecs::NoSuchEntity),

    #[error("component access failed: {0}")]
    Component(#[from] hecs::ComponentError),

    #[error("invariant violated: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, SimError>;

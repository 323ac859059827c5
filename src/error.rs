//! Error types for KalaPlan

use thiserror::Error;

/// KalaPlan error type
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Out of bounds: {0}")]
    OutOfBounds(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;

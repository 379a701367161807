//! Crate error type
//!
//! The simulation itself never fails; game outcomes live in `GamePhase`.
//! Errors only come from loading configuration and persisting scores.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
}

pub type Result<T> = std::result::Result<T, Error>;

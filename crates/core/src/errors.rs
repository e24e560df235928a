//! Core error types for the fund NAV tracker.
//!
//! Per-ticker market data problems never show up here: the price resolver
//! turns them into [`crate::diagnostics::Diagnostic`] events. What remains
//! are caller mistakes (asking for a fund that does not exist) and broken
//! holdings configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the core crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Fund '{0}' is not in the holdings catalog")]
    FundNotFound(String),

    #[error("Invalid holdings configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while loading or validating the holdings catalog.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read holdings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse holdings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Fund '{0}' is defined more than once")]
    DuplicateFund(String),

    #[error("Fund name must not be empty")]
    EmptyFundName,

    #[error("Fund '{fund}' has a holding with an empty ticker")]
    EmptyTicker { fund: String },
}

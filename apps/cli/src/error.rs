//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Neither a fund name nor `--all` was given.
    #[error("No fund selected. Pass a fund name or --all (see `fundnav funds`).")]
    NoFundSelected,

    /// The requested fund is not in the holdings file.
    #[error("Unknown fund '{name}'. Available funds: {available}")]
    UnknownFund { name: String, available: String },
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

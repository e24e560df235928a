//! Diagnostic event types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How loudly a diagnostic should be shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// What happened to a ticker that could not be priced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The provider returned an empty series.
    NoDataAvailable,

    /// Fewer than two valid closes were found in the lookback window.
    InsufficientHistory { valid_closes: usize },

    /// The request itself failed (network, parse, unknown symbol, timeout).
    ProviderFetchFailure { cause: String },

    /// A figure for this ticker does not fit in a `Decimal`.
    Overflow { detail: String },
}

/// A non-fatal problem with one ticker. The ticker's change is treated as 0.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub ticker: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn no_data(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            kind: DiagnosticKind::NoDataAvailable,
        }
    }

    pub fn insufficient_history(ticker: impl Into<String>, valid_closes: usize) -> Self {
        Self {
            ticker: ticker.into(),
            kind: DiagnosticKind::InsufficientHistory { valid_closes },
        }
    }

    pub fn fetch_failure(ticker: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            kind: DiagnosticKind::ProviderFetchFailure {
                cause: cause.into(),
            },
        }
    }

    pub fn overflow(ticker: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            kind: DiagnosticKind::Overflow {
                detail: detail.into(),
            },
        }
    }

    /// Missing data is a warning; a failed request or overflow is an error.
    pub fn severity(&self) -> Severity {
        match self.kind {
            DiagnosticKind::NoDataAvailable | DiagnosticKind::InsufficientHistory { .. } => {
                Severity::Warning
            }
            DiagnosticKind::ProviderFetchFailure { .. } | DiagnosticKind::Overflow { .. } => {
                Severity::Error
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::NoDataAvailable => write!(f, "No data available for {}", self.ticker),
            DiagnosticKind::InsufficientHistory { .. } => {
                write!(f, "Insufficient historical data for {}", self.ticker)
            }
            DiagnosticKind::ProviderFetchFailure { cause } => {
                write!(f, "Error fetching data for {}: {}", self.ticker, cause)
            }
            DiagnosticKind::Overflow { detail } => {
                write!(f, "Could not compute NAV contribution for {}: {}", self.ticker, detail)
            }
        }
    }
}

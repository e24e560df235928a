//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching prices from a provider.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No data available for the requested date range.
    /// The provider answered, but the series it returned is empty.
    #[error("No data for date range")]
    NoDataForRange,

    /// The request to the provider did not complete in time.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned data that could not be used.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },
}

impl MarketDataError {
    /// Returns true when the provider answered with an empty series.
    ///
    /// Callers treat this differently from a failed request: the symbol may
    /// be perfectly valid, there simply were no trading sessions in range.
    ///
    /// ```
    /// use fundnav_market_data::MarketDataError;
    ///
    /// assert!(MarketDataError::NoDataForRange.is_no_data());
    /// assert!(!MarketDataError::SymbolNotFound("XYZ".to_string()).is_no_data());
    /// ```
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoDataForRange)
    }
}

//! Market data provider trait definitions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::MarketDataError;
use crate::models::Quote;

use super::rate_limit::RateLimit;

/// Trait for market data providers.
///
/// Implement this trait to add support for a new price source. The
/// resolver only needs daily history; everything else is up to the
/// provider.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use fundnav_market_data::{MarketDataError, MarketDataProvider, Quote, RateLimit};
///
/// struct MyProvider {
///     api_key: String,
/// }
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     fn rate_limit(&self) -> RateLimit {
///         RateLimit::default()
///     }
///
///     // ... implement get_historical_quotes
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO". Used for logging and
    /// error messages.
    fn id(&self) -> &'static str;

    /// Rate limiting configuration.
    ///
    /// Callers use this to bound how many requests they have in flight.
    fn rate_limit(&self) -> RateLimit {
        RateLimit::default()
    }

    /// Fetch daily historical quotes for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Provider-format symbol (e.g. `RELIANCE.NS`)
    /// * `start` - Start of the date range (inclusive)
    /// * `end` - End of the date range (inclusive)
    ///
    /// # Returns
    ///
    /// The quotes for the range ordered by timestamp ascending, or
    /// [`MarketDataError::NoDataForRange`] when the provider has nothing
    /// for the period. Sessions without a usable close are omitted rather
    /// than reported as zero.
    async fn get_historical_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Quote>, MarketDataError>;
}

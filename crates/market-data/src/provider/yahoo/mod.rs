//! Yahoo Finance market data provider.
//!
//! Fetches daily price history for equities on any exchange Yahoo covers,
//! using Yahoo's own symbol format (e.g. `AAPL`, `SHOP.TO`, `RELIANCE.NS`).

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::{MarketDataProvider, RateLimit};

const PROVIDER_ID: &str = "YAHOO";


/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self { connector })
    }

    /// Convert chrono DateTime<Utc> to time::OffsetDateTime for the Yahoo API.
    fn chrono_to_offset_datetime(dt: DateTime<Utc>) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(dt.timestamp())
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
    }

    /// Convert a Yahoo quote to our Quote model.
    fn yahoo_quote_to_quote(
        yahoo_quote: yahoo::Quote,
        currency: &str,
    ) -> Result<Quote, MarketDataError> {
        to_quote(
            yahoo_quote.timestamp as i64,
            yahoo_quote.open,
            yahoo_quote.high,
            yahoo_quote.low,
            yahoo_quote.close,
            yahoo_quote.volume,
            currency,
        )
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn rate_limit(&self) -> RateLimit {
        RateLimit {
            max_concurrency: 10,
            min_delay: Duration::from_millis(50),
        }
    }

    async fn get_historical_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Quote>, MarketDataError> {
        debug!(
            "Fetching historical quotes for {} from {} to {} from Yahoo",
            symbol,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );

        let start_time = Self::chrono_to_offset_datetime(start);
        let end_time = Self::chrono_to_offset_datetime(end);

        let response = self
            .connector
            .get_quote_history(symbol, start_time, end_time)
            .await
            .map_err(|e| match e {
                yahoo::YahooError::NoQuotes => MarketDataError::NoDataForRange,
                yahoo::YahooError::NoResult => MarketDataError::SymbolNotFound(symbol.to_string()),
                other => MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: other.to_string(),
                },
            })?;

        let currency = quote_currency(response.metadata().ok().and_then(|m| m.currency));

        match response.quotes() {
            Ok(yahoo_quotes) => {
                let mut quotes: Vec<Quote> = yahoo_quotes
                    .into_iter()
                    .filter_map(|q| match Self::yahoo_quote_to_quote(q, &currency) {
                        Ok(quote) => Some(quote),
                        Err(e) => {
                            warn!("Skipping quote for {} due to conversion error: {}", symbol, e);
                            None
                        }
                    })
                    .collect();

                if quotes.is_empty() {
                    return Err(MarketDataError::NoDataForRange);
                }

                quotes.sort_by_key(|q| q.timestamp);
                if let (Some(first), Some(last)) = (quotes.first(), quotes.last()) {
                    debug!(
                        "{}: {} sessions from {} to {}",
                        symbol,
                        quotes.len(),
                        first.trading_day(),
                        last.trading_day()
                    );
                }
                Ok(quotes)
            }
            Err(yahoo::YahooError::NoQuotes) => {
                warn!(
                    "No historical quotes returned for '{}' between {} and {}",
                    symbol,
                    start.format("%Y-%m-%d"),
                    end.format("%Y-%m-%d")
                );
                Err(MarketDataError::NoDataForRange)
            }
            Err(e) => Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Currency from the chart metadata, upper-cased.
///
/// Left empty when Yahoo does not report one; a guessed currency would be
/// wrong for most non-US listings.
fn quote_currency(reported: Option<String>) -> String {
    reported
        .map(|c| c.trim().to_uppercase())
        .unwrap_or_default()
}

/// Build a [`Quote`] from raw chart values.
///
/// Yahoo reports sessions without a trade as NaN; such a close cannot be
/// represented and is rejected so the session is dropped, never zeroed.
fn to_quote(
    timestamp: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
    currency: &str,
) -> Result<Quote, MarketDataError> {
    let timestamp: DateTime<Utc> = Utc.timestamp_opt(timestamp, 0).single().ok_or_else(|| {
        MarketDataError::ValidationFailed {
            message: format!("Invalid timestamp: {}", timestamp),
        }
    })?;

    let close = Decimal::from_f64_retain(close).ok_or_else(|| MarketDataError::ValidationFailed {
        message: format!("Failed to convert close price {} to Decimal", close),
    })?;

    let mut quote = Quote::new(
        timestamp,
        close,
        currency.to_string(),
        PROVIDER_ID.to_string(),
    );
    quote.open = Decimal::from_f64_retain(open);
    quote.high = Decimal::from_f64_retain(high);
    quote.low = Decimal::from_f64_retain(low);
    quote.volume = Decimal::from_u64(volume);
    Ok(quote)
}

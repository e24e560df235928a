//! Price Resolver.
//!
//! Turns a set of tickers into one percent change per ticker. Every ticker
//! gets a value: anything that prevents pricing it (no data, too little
//! history, a failed request) is recorded as `0` and reported as a
//! [`Diagnostic`], never as an error to the caller.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use futures::future::join_all;
use log::debug;
use rust_decimal::Decimal;

use fundnav_market_data::{MarketDataError, MarketDataProvider, Quote};

use super::nav_model::{PriceObservation, TickerOutcome};
use crate::diagnostics::{Diagnostic, DiagnosticSink};

/// Calendar days of history requested per ticker.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 7;

/// Largest lookback accepted from configuration.
pub const MAX_LOOKBACK_DAYS: i64 = 3650;

/// Upper bound on a single ticker's request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Tunables for [`PriceResolver`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverOptions {
    /// How far back the request window starts. Wide enough to cover
    /// weekends and short market holidays.
    pub lookback_days: i64,
    pub request_timeout: Duration,
    /// Requests in flight at once; `None` uses the provider's own limit.
    pub max_concurrency: Option<usize>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_concurrency: None,
        }
    }
}

/// Outcome of resolving a set of tickers.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    outcomes: HashMap<String, TickerOutcome>,
    diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    /// Build a resolution from per-ticker outcomes.
    ///
    /// Diagnostics are derived from the outcomes, one per unpriced ticker,
    /// ordered by ticker.
    pub fn from_outcomes(outcomes: HashMap<String, TickerOutcome>) -> Self {
        let mut tickers: Vec<&String> = outcomes.keys().collect();
        tickers.sort();
        let diagnostics = tickers
            .into_iter()
            .filter_map(|ticker| outcomes[ticker].diagnostic(ticker))
            .collect();

        Self {
            outcomes,
            diagnostics,
        }
    }

    /// Percent change for `ticker`, `0` when it could not be priced.
    pub fn percent_change(&self, ticker: &str) -> Decimal {
        self.outcomes
            .get(ticker)
            .map(TickerOutcome::percent_change)
            .unwrap_or(Decimal::ZERO)
    }

    /// One entry per resolved ticker.
    pub fn percent_changes(&self) -> HashMap<String, Decimal> {
        self.outcomes
            .iter()
            .map(|(ticker, outcome)| (ticker.clone(), outcome.percent_change()))
            .collect()
    }

    pub fn outcome(&self, ticker: &str) -> Option<&TickerOutcome> {
        self.outcomes.get(ticker)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Fetches recent closes for each ticker and derives its daily change.
pub struct PriceResolver {
    provider: Arc<dyn MarketDataProvider>,
    sink: Arc<dyn DiagnosticSink>,
    options: ResolverOptions,
}

impl PriceResolver {
    pub fn new(provider: Arc<dyn MarketDataProvider>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            provider,
            sink,
            options: ResolverOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn sink(&self) -> &dyn DiagnosticSink {
        self.sink.as_ref()
    }

    /// Resolve every ticker in `tickers`.
    ///
    /// Requests run concurrently in batches bounded by the configured
    /// concurrency. Each request owns its result slot, so one failure
    /// cannot disturb another ticker.
    pub async fn resolve(&self, tickers: &BTreeSet<String>) -> Resolution {
        if tickers.is_empty() {
            return Resolution::default();
        }

        let rate_limit = self.provider.rate_limit();
        let batch_size = self
            .options
            .max_concurrency
            .unwrap_or(rate_limit.max_concurrency)
            .max(1);

        let Some((start, end)) = fetch_window(Utc::now(), self.options.lookback_days) else {
            let cause = format!(
                "Invalid lookback window: {} days",
                self.options.lookback_days
            );
            debug!("{}; no ticker requested", cause);
            let outcomes = tickers
                .iter()
                .map(|ticker| {
                    (
                        ticker.clone(),
                        TickerOutcome::FetchFailed {
                            cause: cause.clone(),
                        },
                    )
                })
                .collect();
            let resolution = Resolution::from_outcomes(outcomes);
            self.sink.emit_batch(resolution.diagnostics.clone());
            return resolution;
        };

        debug!(
            "Resolving {} tickers via {} ({} at a time)",
            tickers.len(),
            self.provider.id(),
            batch_size
        );

        let tickers: Vec<&String> = tickers.iter().collect();
        let mut outcomes = HashMap::with_capacity(tickers.len());

        for (index, chunk) in tickers.chunks(batch_size).enumerate() {
            if index > 0 && !rate_limit.min_delay.is_zero() {
                tokio::time::sleep(rate_limit.min_delay).await;
            }

            let futures: Vec<_> = chunk
                .iter()
                .map(|ticker| async move {
                    let outcome = self.resolve_one(ticker, start, end).await;
                    ((*ticker).clone(), outcome)
                })
                .collect();

            outcomes.extend(join_all(futures).await);
        }

        let resolution = Resolution::from_outcomes(outcomes);
        self.sink.emit_batch(resolution.diagnostics.clone());
        resolution
    }

    async fn resolve_one(
        &self,
        ticker: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TickerOutcome {
        let fetch = self.provider.get_historical_quotes(ticker, start, end);
        let result = match tokio::time::timeout(self.options.request_timeout, fetch).await {
            Ok(result) => result,
            Err(_) => Err(MarketDataError::Timeout {
                provider: self.provider.id().to_string(),
            }),
        };

        let outcome = match result {
            Ok(quotes) => outcome_from_quotes(quotes),
            Err(e) if e.is_no_data() => TickerOutcome::NoData,
            Err(e) => TickerOutcome::FetchFailed {
                cause: e.to_string(),
            },
        };

        match &outcome {
            TickerOutcome::Priced(observation) => debug!(
                "{}: {} -> {} ({}%)",
                ticker,
                observation.previous_close,
                observation.current_close,
                observation.percent_change().round_dp(4)
            ),
            other => debug!("{}: unpriced ({:?})", ticker, other),
        }

        outcome
    }
}

/// Request window for `lookback_days` of history ending at `now`.
///
/// The end lies one day past `now` so today's session is included when it
/// exists. `None` for a non-positive lookback or one that leaves chrono's
/// representable range.
pub fn fetch_window(
    now: DateTime<Utc>,
    lookback_days: i64,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    if lookback_days <= 0 {
        return None;
    }
    let start = now.checked_sub_signed(TimeDelta::try_days(lookback_days)?)?;
    let end = now.checked_add_signed(TimeDelta::try_days(1)?)?;
    Some((start, end))
}

/// Pick the last two valid closes out of a provider series.
///
/// An empty series means the provider had nothing at all. Otherwise
/// non-positive closes are discarded, the rest sorted chronologically, and
/// only the two most recent matter.
pub fn outcome_from_quotes(quotes: Vec<Quote>) -> TickerOutcome {
    if quotes.is_empty() {
        return TickerOutcome::NoData;
    }

    let mut valid: Vec<Quote> = quotes
        .into_iter()
        .filter(|q| q.close > Decimal::ZERO)
        .collect();
    valid.sort_by_key(|q| q.timestamp);

    match valid.as_slice() {
        [.., previous, current] => {
            let observation = PriceObservation {
                previous_close: previous.close,
                previous_at: previous.timestamp,
                current_close: current.close,
                current_at: current.timestamp,
            };
            if observation.checked_percent_change().is_some() {
                TickerOutcome::Priced(observation)
            } else {
                TickerOutcome::Overflow {
                    detail: format!(
                        "daily change from {} to {} is out of range",
                        previous.close, current.close
                    ),
                }
            }
        }
        _ => TickerOutcome::InsufficientHistory {
            valid_closes: valid.len(),
        },
    }
}

//! Scripted market data provider shared by the nav tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use fundnav_market_data::{MarketDataError, MarketDataProvider, Quote, RateLimit};

use super::price_resolver::{PriceResolver, ResolverOptions};
use crate::diagnostics::CollectingDiagnosticSink;

#[derive(Clone)]
pub enum MockResponse {
    Quotes(Vec<Quote>),
    NoData,
    Fail(String),
    /// Never answers within any reasonable timeout.
    Hang,
}

#[derive(Clone, Default)]
pub struct MockProvider {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    calls: Arc<Mutex<Vec<String>>>,
    windows: Arc<Mutex<Vec<(DateTime<Utc>, DateTime<Utc>)>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, ticker: &str, response: MockResponse) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(ticker.to_string(), response);
        self
    }

    pub fn with_closes(self, ticker: &str, closes: &[Decimal]) -> Self {
        self.with(ticker, MockResponse::Quotes(daily_quotes(closes)))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, ticker: &str) -> usize {
        self.calls().iter().filter(|t| t.as_str() == ticker).count()
    }

    /// Requested `(start, end)` pairs, in call order.
    pub fn windows(&self) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        self.windows.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    fn rate_limit(&self) -> RateLimit {
        RateLimit {
            max_concurrency: 4,
            min_delay: Duration::ZERO,
        }
    }

    async fn get_historical_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Quote>, MarketDataError> {
        self.calls.lock().unwrap().push(symbol.to_string());
        self.windows.lock().unwrap().push((start, end));
        let response = self.responses.lock().unwrap().get(symbol).cloned();

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        // Yield so that concurrently started requests overlap.
        tokio::time::sleep(Duration::from_millis(5)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match response {
            Some(MockResponse::Quotes(quotes)) => Ok(quotes),
            Some(MockResponse::NoData) => Err(MarketDataError::NoDataForRange),
            Some(MockResponse::Fail(message)) => Err(MarketDataError::ProviderError {
                provider: "MOCK".to_string(),
                message,
            }),
            Some(MockResponse::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            }
            None => Err(MarketDataError::SymbolNotFound(symbol.to_string())),
        }
    }
}

/// One quote per consecutive day starting 2024-03-11, in the given order.
pub fn daily_quotes(closes: &[Decimal]) -> Vec<Quote> {
    closes
        .iter()
        .enumerate()
        .map(|(day, close)| quote_on(day as u32, *close))
        .collect()
}

pub fn quote_on(day_offset: u32, close: Decimal) -> Quote {
    let timestamp = Utc.with_ymd_and_hms(2024, 3, 11 + day_offset, 9, 15, 0).unwrap();
    Quote::new(timestamp, close, "INR".to_string(), "MOCK".to_string())
}

pub fn resolver_with(
    provider: &MockProvider,
    sink: &CollectingDiagnosticSink,
) -> PriceResolver {
    PriceResolver::new(Arc::new(provider.clone()), Arc::new(sink.clone())).with_options(
        ResolverOptions {
            request_timeout: Duration::from_secs(5),
            ..ResolverOptions::default()
        },
    )
}

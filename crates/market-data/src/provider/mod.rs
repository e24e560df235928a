//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - Rate limiting configuration
//! - The Yahoo Finance implementation
//!
//! Providers receive the symbol exactly as configured in the holdings
//! catalog, which is expected to already be in the provider's format
//! (e.g. exchange-suffixed tickers for Yahoo).

mod rate_limit;
mod traits;

pub mod yahoo;

pub use rate_limit::RateLimit;
pub use traits::MarketDataProvider;

//! Fund NAV Market Data Crate
//!
//! This crate provides provider-agnostic daily price history for the
//! fund NAV tracker.
//!
//! # Overview
//!
//! - [`MarketDataProvider`] - the trait every price source implements
//! - [`YahooProvider`] - Yahoo Finance implementation (equities on any
//!   exchange, using Yahoo's suffixed symbols such as `RELIANCE.NS`)
//! - [`Quote`] - one daily OHLCV observation
//! - [`MarketDataError`] - everything that can go wrong talking to a provider
//!
//! ```text
//! +------------------+     +------------------+     +------------------+
//! |  Price Resolver  | --> |    Provider      | --> |   Vec<Quote>     |
//! |  (fundnav-core)  |     | (Yahoo, mocks)   |     |  (daily closes)  |
//! +------------------+     +------------------+     +------------------+
//! ```

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::Quote;
pub use provider::yahoo::YahooProvider;
pub use provider::{MarketDataProvider, RateLimit};

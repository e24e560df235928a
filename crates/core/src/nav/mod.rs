//! NAV contribution calculation.
//!
//! - [`price_resolver`] - per-ticker daily change with failure isolation
//! - [`nav_aggregator`] - weighted, ordered breakdown with a running total
//! - [`nav_service`] - fund lookup facade for presentation layers
//! - [`formatting`] - display rounding
//!
//! ```text
//! NavService → NavAggregator → PriceResolver → MarketDataProvider
//!                   ↓                ↓
//!             NavBreakdown     DiagnosticSink
//! ```

pub mod formatting;
pub mod nav_aggregator;
pub mod nav_model;
pub mod nav_service;
pub mod price_resolver;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod price_resolver_tests;

pub use formatting::{format_percent, CHANGE_DECIMALS, CONTRIBUTION_DECIMALS};
pub use nav_aggregator::NavAggregator;
pub use nav_model::{BreakdownRow, NavBreakdown, PriceObservation, TickerOutcome};
pub use nav_service::{NavService, NavServiceTrait};
pub use price_resolver::{
    fetch_window, PriceResolver, Resolution, ResolverOptions, DEFAULT_LOOKBACK_DAYS,
    DEFAULT_REQUEST_TIMEOUT, MAX_LOOKBACK_DAYS,
};

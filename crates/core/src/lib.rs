//! Fund NAV Core - approximate daily NAV change of a mutual fund.
//!
//! Given a fund's disclosed holdings (ticker and percentage weight) and
//! each holding's last two daily closes, this crate computes every
//! holding's daily change, its weighted contribution, a running cumulative
//! contribution and the fund-level total.
//!
//! Market data comes from any [`fundnav_market_data::MarketDataProvider`].

pub mod diagnostics;
pub mod errors;
pub mod funds;
pub mod nav;

pub use diagnostics::{CollectingDiagnosticSink, Diagnostic, DiagnosticKind, DiagnosticSink};
pub use funds::{Fund, FundCatalog, Holding};
pub use nav::{BreakdownRow, NavAggregator, NavBreakdown, NavService, NavServiceTrait, PriceResolver};

// Re-export error types
pub use errors::Error;
pub use errors::Result;

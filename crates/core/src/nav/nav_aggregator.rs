//! NAV Aggregator.
//!
//! Folds a fund's weights over the resolver's percent changes into an
//! ordered breakdown with a running cumulative contribution.

use chrono::Utc;
use log::{debug, info};
use rust_decimal::Decimal;

use super::nav_model::{BreakdownRow, NavBreakdown};
use super::price_resolver::{PriceResolver, Resolution};
use crate::diagnostics::Diagnostic;
use crate::funds::Fund;

pub struct NavAggregator {
    resolver: PriceResolver,
}

impl NavAggregator {
    pub fn new(resolver: PriceResolver) -> Self {
        Self { resolver }
    }

    /// Compute the NAV breakdown for `fund`.
    ///
    /// The resolver is called once with the fund's distinct tickers. A fund
    /// without holdings yields no rows and a zero total without touching
    /// the provider.
    pub async fn aggregate(&self, fund: &Fund) -> NavBreakdown {
        if fund.is_empty() {
            info!("Fund '{}' has no holdings; NAV change is 0", fund.name);
            return NavBreakdown {
                fund_name: fund.name.clone(),
                rows: Vec::new(),
                total_nav_change: Decimal::ZERO,
                diagnostics: Vec::new(),
                calculated_at: Utc::now(),
            };
        }

        let resolution = self.resolver.resolve(&fund.tickers()).await;
        let (rows, overflows) = build_rows(fund, &resolution);
        let total_nav_change = total_from_rows(&rows);

        if !overflows.is_empty() {
            self.resolver.sink().emit_batch(overflows.clone());
        }
        let mut diagnostics = resolution.into_diagnostics();
        diagnostics.extend(overflows);

        debug!(
            "Fund '{}': {} rows, total NAV change {}%, {} diagnostics",
            fund.name,
            rows.len(),
            total_nav_change,
            diagnostics.len()
        );

        NavBreakdown {
            fund_name: fund.name.clone(),
            rows,
            total_nav_change,
            diagnostics,
            calculated_at: Utc::now(),
        }
    }
}

/// One row per holding, in holding order, with a full-precision prefix sum.
///
/// Repeated tickers reuse the same resolved change and each occurrence
/// contributes on its own. A contribution that would overflow, alone or
/// added to the running sum, counts as `0` and is reported as an overflow
/// diagnostic.
pub fn build_rows(fund: &Fund, resolution: &Resolution) -> (Vec<BreakdownRow>, Vec<Diagnostic>) {
    let mut cumulative = Decimal::ZERO;
    let mut overflows = Vec::new();

    let rows: Vec<BreakdownRow> = fund
        .holdings
        .iter()
        .map(|holding| {
            let daily_change = resolution.percent_change(&holding.ticker);
            let nav_contribution = match holding.weight.checked_mul(daily_change) {
                Some(contribution) => match cumulative.checked_add(contribution) {
                    Some(sum) => {
                        cumulative = sum;
                        contribution
                    }
                    None => {
                        overflows.push(Diagnostic::overflow(
                            &holding.ticker,
                            "cumulative contribution is out of range",
                        ));
                        Decimal::ZERO
                    }
                },
                None => {
                    overflows.push(Diagnostic::overflow(
                        &holding.ticker,
                        format!(
                            "weight {} times change {}% is out of range",
                            holding.weight, daily_change
                        ),
                    ));
                    Decimal::ZERO
                }
            };
            BreakdownRow {
                ticker: holding.ticker.clone(),
                weight: holding.weight,
                daily_change,
                nav_contribution,
                cumulative_nav_contribution: cumulative,
            }
        })
        .collect();

    (rows, overflows)
}

/// Fund-level change: the last cumulative contribution over 100.
pub fn total_from_rows(rows: &[BreakdownRow]) -> Decimal {
    rows.last()
        .map(|row| row.cumulative_nav_contribution / Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::ZERO)
}

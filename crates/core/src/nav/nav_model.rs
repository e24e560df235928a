use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::formatting::{format_percent, CHANGE_DECIMALS, CONTRIBUTION_DECIMALS};
use crate::diagnostics::Diagnostic;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// The two most recent valid closes for a ticker, oldest first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceObservation {
    pub previous_close: Decimal,
    pub previous_at: DateTime<Utc>,
    pub current_close: Decimal,
    pub current_at: DateTime<Utc>,
}

impl PriceObservation {
    /// `(current - previous) / previous * 100`, or `None` when it does not
    /// fit in a `Decimal`.
    ///
    /// `previous_close` is always positive: non-positive closes are never
    /// selected as observations.
    pub fn checked_percent_change(&self) -> Option<Decimal> {
        self.current_close
            .checked_sub(self.previous_close)?
            .checked_div(self.previous_close)?
            .checked_mul(HUNDRED)
    }

    /// Like [`checked_percent_change`](Self::checked_percent_change), neutral on overflow.
    pub fn percent_change(&self) -> Decimal {
        self.checked_percent_change().unwrap_or(Decimal::ZERO)
    }
}

/// What the resolver concluded for one ticker.
#[derive(Debug, Clone, PartialEq)]
pub enum TickerOutcome {
    Priced(PriceObservation),
    NoData,
    InsufficientHistory { valid_closes: usize },
    FetchFailed { cause: String },
    /// Closes were found but their change is not representable.
    Overflow { detail: String },
}

impl TickerOutcome {
    /// Percent change used for the NAV; anything but a priced ticker is neutral.
    pub fn percent_change(&self) -> Decimal {
        match self {
            Self::Priced(observation) => observation.percent_change(),
            _ => Decimal::ZERO,
        }
    }

    pub fn observation(&self) -> Option<&PriceObservation> {
        match self {
            Self::Priced(observation) => Some(observation),
            _ => None,
        }
    }

    /// The diagnostic to surface for this outcome, if any.
    pub fn diagnostic(&self, ticker: &str) -> Option<Diagnostic> {
        match self {
            Self::Priced(_) => None,
            Self::NoData => Some(Diagnostic::no_data(ticker)),
            Self::InsufficientHistory { valid_closes } => {
                Some(Diagnostic::insufficient_history(ticker, *valid_closes))
            }
            Self::FetchFailed { cause } => Some(Diagnostic::fetch_failure(ticker, cause.clone())),
            Self::Overflow { detail } => Some(Diagnostic::overflow(ticker, detail.clone())),
        }
    }
}

/// One line of the NAV breakdown, in fund holding order.
///
/// All figures are percentages at full precision. `nav_contribution` is
/// `weight * daily_change` (percent times percent), so the fund-level
/// change is the final cumulative value divided by 100.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownRow {
    pub ticker: String,
    pub weight: Decimal,
    pub daily_change: Decimal,
    pub nav_contribution: Decimal,
    pub cumulative_nav_contribution: Decimal,
}

impl BreakdownRow {
    pub fn weight_display(&self) -> String {
        format_percent(self.weight, CHANGE_DECIMALS)
    }

    pub fn daily_change_display(&self) -> String {
        format_percent(self.daily_change, CHANGE_DECIMALS)
    }

    pub fn contribution_display(&self) -> String {
        format_percent(self.nav_contribution, CONTRIBUTION_DECIMALS)
    }

    pub fn cumulative_display(&self) -> String {
        format_percent(self.cumulative_nav_contribution, CONTRIBUTION_DECIMALS)
    }
}

/// Result of one NAV calculation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NavBreakdown {
    pub fund_name: String,
    pub rows: Vec<BreakdownRow>,
    /// Last cumulative contribution / 100; zero for a fund without holdings.
    pub total_nav_change: Decimal,
    /// Per-ticker problems met while pricing this fund.
    pub diagnostics: Vec<Diagnostic>,
    pub calculated_at: DateTime<Utc>,
}

impl NavBreakdown {
    pub fn total_display(&self) -> String {
        format_percent(self.total_nav_change, CONTRIBUTION_DECIMALS)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

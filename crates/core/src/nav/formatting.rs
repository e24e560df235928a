//! Display rounding for NAV figures.
//!
//! Values are only rounded here, at the presentation boundary. Nothing
//! rounded by this module is ever fed back into a calculation.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places for weights and per-stock daily change.
pub const CHANGE_DECIMALS: u32 = 2;

/// Decimal places for contributions, cumulative contribution and the total.
pub const CONTRIBUTION_DECIMALS: u32 = 4;

/// Render `value` as a percentage string with exactly `decimals` places.
///
/// Halves round away from zero, and a value that rounds to zero is shown
/// without a sign.
///
/// ```
/// use fundnav_core::nav::format_percent;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_percent(dec!(0.5), 4), "0.5000%");
/// assert_eq!(format_percent(dec!(-1.005), 2), "-1.01%");
/// ```
pub fn format_percent(value: Decimal, decimals: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    format!("{:.*}%", decimals as usize, rounded)
}

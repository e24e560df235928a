use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single stock position inside a fund.
///
/// `weight` is in percent units: `5.0` means 5% of the fund.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub ticker: String,
    pub weight: Decimal,
}

impl Holding {
    pub fn new(ticker: impl Into<String>, weight: Decimal) -> Self {
        Self {
            ticker: ticker.into(),
            weight,
        }
    }
}

/// A named, ordered set of holdings.
///
/// Holding order is significant: the NAV breakdown is produced in this
/// order. Weights are taken as disclosed and are not required to add up
/// to 100.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    pub name: String,
    #[serde(default)]
    pub holdings: Vec<Holding>,
}

impl Fund {
    pub fn new(name: impl Into<String>, holdings: Vec<Holding>) -> Self {
        Self {
            name: name.into(),
            holdings,
        }
    }

    /// Distinct tickers held by the fund.
    pub fn tickers(&self) -> BTreeSet<String> {
        self.holdings.iter().map(|h| h.ticker.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Sum of the disclosed weights, for display only.
    pub fn total_weight(&self) -> Decimal {
        self.holdings.iter().map(|h| h.weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tickers_are_deduplicated() {
        let fund = Fund::new(
            "Dup Fund",
            vec![
                Holding::new("TCS.NS", dec!(4)),
                Holding::new("INFY.NS", dec!(3)),
                Holding::new("TCS.NS", dec!(2)),
            ],
        );

        let tickers = fund.tickers();
        assert_eq!(tickers.len(), 2);
        assert!(tickers.contains("TCS.NS"));
        assert!(tickers.contains("INFY.NS"));
        assert_eq!(fund.holdings.len(), 3);
    }

    #[test]
    fn test_total_weight_is_not_normalized() {
        let fund = Fund::new(
            "Partial Fund",
            vec![Holding::new("A", dec!(9.5)), Holding::new("B", dec!(20.25))],
        );
        assert_eq!(fund.total_weight(), dec!(29.75));
    }

    #[test]
    fn test_holding_deserializes_numeric_weight() {
        let holding: Holding =
            serde_json::from_str(r#"{ "ticker": "RELIANCE.NS", "weight": 9.12 }"#).unwrap();
        assert_eq!(holding.ticker, "RELIANCE.NS");
        assert_eq!(holding.weight, dec!(9.12));
    }
}

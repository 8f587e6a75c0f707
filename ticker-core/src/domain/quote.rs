//! Real-time quote snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Latest market snapshot for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ask: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_volume: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    pub previous_close: f64,
    pub timestamp: DateTime<Utc>,
}

impl Quote {
    /// Absolute and percent change of `price` against `previous_close`.
    ///
    /// Percent change is 0 when there is no previous close to compare with.
    pub fn change_from(price: f64, previous_close: f64) -> (f64, f64) {
        let change = price - previous_close;
        let pct = if previous_close != 0.0 {
            change / previous_close * 100.0
        } else {
            0.0
        };
        (change, pct)
    }
}

/// Quotes for every requested symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteList {
    pub quotes: Vec<Quote>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_from_previous_close() {
        let (change, pct) = Quote::change_from(110.0, 100.0);
        assert!((change - 10.0).abs() < 1e-12);
        assert!((pct - 10.0).abs() < 1e-12);
    }

    #[test]
    fn change_percent_is_zero_without_previous_close() {
        let (change, pct) = Quote::change_from(42.0, 0.0);
        assert_eq!(change, 42.0);
        assert_eq!(pct, 0.0);
    }
}

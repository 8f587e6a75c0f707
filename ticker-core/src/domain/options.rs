//! Option chain for one expiration.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionContract {
    pub contract_symbol: String,
    pub strike: f64,
    pub last_price: f64,
    pub change: f64,
    pub bid: f64,
    pub ask: f64,
    pub volume: u64,
    pub open_interest: u64,
    /// Implied volatility in percent.
    pub implied_volatility: f64,
    pub in_the_money: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
}

/// Calls and puts for a single expiration date.
///
/// A side is `None` when it was filtered out, so the JSON shows only the
/// requested side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionChain {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlying_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calls: Option<Vec<OptionContract>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub puts: Option<Vec<OptionContract>>,
}

/// Which side(s) of the chain to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionSide {
    #[default]
    Both,
    Calls,
    Puts,
}

impl OptionSide {
    /// Side selection from the `--calls` / `--puts` flag pair. Both or neither
    /// flags keep both sides.
    pub fn from_flags(calls: bool, puts: bool) -> Self {
        match (calls, puts) {
            (true, false) => OptionSide::Calls,
            (false, true) => OptionSide::Puts,
            _ => OptionSide::Both,
        }
    }
}

impl OptionChain {
    /// Drop the side not selected by `side`.
    pub fn filter(mut self, side: OptionSide) -> Self {
        match side {
            OptionSide::Both => {}
            OptionSide::Calls => self.puts = None,
            OptionSide::Puts => self.calls = None,
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> OptionChain {
        OptionChain {
            symbol: "AAPL".into(),
            expiration_date: None,
            underlying_price: Some(190.0),
            calls: Some(vec![]),
            puts: Some(vec![]),
        }
    }

    #[test]
    fn side_from_flags() {
        assert_eq!(OptionSide::from_flags(true, false), OptionSide::Calls);
        assert_eq!(OptionSide::from_flags(false, true), OptionSide::Puts);
        assert_eq!(OptionSide::from_flags(true, true), OptionSide::Both);
        assert_eq!(OptionSide::from_flags(false, false), OptionSide::Both);
    }

    #[test]
    fn filter_drops_unselected_side_from_json() {
        let calls_only = chain().filter(OptionSide::Calls);
        let json = serde_json::to_value(&calls_only).unwrap();
        assert!(json.get("calls").is_some());
        assert!(json.get("puts").is_none());

        let both = chain().filter(OptionSide::Both);
        assert!(both.calls.is_some() && both.puts.is_some());
    }
}

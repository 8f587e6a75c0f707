//! Indicator output shapes.

use super::params::{IndicatorKind, IndicatorSpec};
use chrono::NaiveDate;
use serde::Serialize;

/// Indicator value(s) for one bar. `None` marks an undefined value (warm-up
/// or a window touching an undefined input) and is left out of the JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PointValues {
    Single {
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<f64>,
    },
    Macd {
        #[serde(skip_serializing_if = "Option::is_none")]
        macd: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        signal: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        histogram: Option<f64>,
    },
    Bands {
        #[serde(skip_serializing_if = "Option::is_none")]
        upper: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        middle: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        lower: Option<f64>,
    },
}

/// One aligned output row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub values: PointValues,
}

/// Indicator series for one symbol, aligned 1:1 with the input bars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorResult {
    pub symbol: String,
    pub indicator: IndicatorKind,
    /// Parameters actually used, after defaults were applied.
    pub config: IndicatorSpec,
    pub data: Vec<IndicatorPoint>,
}

impl IndicatorResult {
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }
}

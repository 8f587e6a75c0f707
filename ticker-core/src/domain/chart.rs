//! Historical bar series for one symbol.

use super::Bar;
use crate::range::{Interval, Period};
use chrono::NaiveDate;
use serde::Serialize;

/// Bars for a symbol over a resolved window, chronological ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
    pub interval: Interval,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub data: Vec<Bar>,
}

//! News articles related to a symbol.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub publisher: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_tickers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsResult {
    pub symbol: String,
    pub news: Vec<NewsItem>,
}

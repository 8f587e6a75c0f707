//! Predefined stock screens.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Screens the provider publishes under a fixed id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenerQuery {
    MostActives,
    DayGainers,
    DayLosers,
    UndervaluedGrowthStocks,
    UndervaluedLargeCaps,
    GrowthTechnologyStocks,
    TopMutualFunds,
}

impl ScreenerQuery {
    pub const ALL: [ScreenerQuery; 7] = [
        ScreenerQuery::MostActives,
        ScreenerQuery::DayGainers,
        ScreenerQuery::DayLosers,
        ScreenerQuery::UndervaluedGrowthStocks,
        ScreenerQuery::UndervaluedLargeCaps,
        ScreenerQuery::GrowthTechnologyStocks,
        ScreenerQuery::TopMutualFunds,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScreenerQuery::MostActives => "most_actives",
            ScreenerQuery::DayGainers => "day_gainers",
            ScreenerQuery::DayLosers => "day_losers",
            ScreenerQuery::UndervaluedGrowthStocks => "undervalued_growth_stocks",
            ScreenerQuery::UndervaluedLargeCaps => "undervalued_large_caps",
            ScreenerQuery::GrowthTechnologyStocks => "growth_technology_stocks",
            ScreenerQuery::TopMutualFunds => "top_mutual_funds",
        }
    }
}

impl fmt::Display for ScreenerQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenerQuery {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ScreenerQuery::ALL
            .into_iter()
            .find(|q| q.as_str() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = ScreenerQuery::ALL.iter().map(|q| q.as_str()).collect();
                format!("unknown screener query '{s}'. Valid: {}", valid.join(", "))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerQuote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerResult {
    pub query: ScreenerQuery,
    pub quotes: Vec<ScreenerQuote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
}

impl ScreenerResult {
    pub fn empty(query: ScreenerQuery) -> Self {
        Self {
            query,
            quotes: Vec::new(),
            total_results: None,
        }
    }
}

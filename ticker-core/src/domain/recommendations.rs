//! Symbols the provider considers similar to a given symbol.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendedSymbol {
    pub symbol: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub symbol: String,
    pub recommended_symbols: Vec<RecommendedSymbol>,
}

impl Recommendations {
    pub fn empty(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            recommended_symbols: Vec::new(),
        }
    }
}

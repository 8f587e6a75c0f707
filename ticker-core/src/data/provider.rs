//! Market data provider trait and structured error types.
//!
//! The `MarketDataProvider` trait abstracts over the data source so commands
//! can be driven by Yahoo Finance in production and by a fixed in-memory
//! provider in tests.

use crate::domain::{
    ChartSeries, Insights, NewsResult, OptionChain, QuoteList, Recommendations, ScreenerQuery,
    ScreenerResult, SearchResult, Summary,
};
use crate::range::HistoryRequest;
use chrono::NaiveDate;
use thiserror::Error;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider")]
    RateLimited,

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("HTTP {status} from provider for {target}")]
    Http { status: u16, target: String },

    #[error("data error: {0}")]
    Other(String),
}

/// Which sections a symbol search should return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub include_quotes: bool,
    pub include_news: bool,
}

/// One method per data family the command line exposes.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    fn quotes(&self, symbols: &[String]) -> Result<QuoteList, DataError>;

    /// Daily or intraday OHLCV bars for the resolved window.
    fn chart(&self, request: &HistoryRequest) -> Result<ChartSeries, DataError>;

    fn search(&self, query: &str, options: SearchOptions) -> Result<SearchResult, DataError>;

    fn news(&self, symbol: &str, limit: usize) -> Result<NewsResult, DataError>;

    /// Option chain for the nearest expiration, or for `expiration` if given.
    fn options(&self, symbol: &str, expiration: Option<NaiveDate>)
        -> Result<OptionChain, DataError>;

    fn summary(&self, symbol: &str, modules: &[String]) -> Result<Summary, DataError>;

    fn recommendations(&self, symbol: &str) -> Result<Recommendations, DataError>;

    fn screener(&self, query: ScreenerQuery) -> Result<ScreenerResult, DataError>;

    fn insights(&self, symbol: &str) -> Result<Insights, DataError>;
}

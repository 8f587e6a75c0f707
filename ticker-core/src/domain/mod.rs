//! Domain types: bars plus the market-data payloads each command returns.

pub mod bar;
pub mod chart;
pub mod insights;
pub mod news;
pub mod options;
pub mod quote;
pub mod recommendations;
pub mod screener;
pub mod search;
pub mod summary;

pub use bar::{closes, Bar};
pub use chart::ChartSeries;
pub use insights::{AnalystView, CompanySnapshot, Insights, KeyTechnicals, TechnicalOutlook};
pub use news::{NewsItem, NewsResult};
pub use options::{OptionChain, OptionContract, OptionSide};
pub use quote::{Quote, QuoteList};
pub use recommendations::{RecommendedSymbol, Recommendations};
pub use screener::{ScreenerQuery, ScreenerQuote, ScreenerResult};
pub use search::{SearchMatch, SearchResult};
pub use summary::{
    FinancialData, Summary, SummaryDetail, SummaryProfile, SummaryValue, DEFAULT_SUMMARY_MODULES,
};

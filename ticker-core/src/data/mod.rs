//! Market data retrieval.

pub mod payload;
pub mod provider;
pub mod yahoo;

pub use provider::{DataError, MarketDataProvider, SearchOptions};
pub use yahoo::YahooProvider;

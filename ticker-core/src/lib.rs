//! Ticker Core: market data types, technical indicators, Yahoo Finance access.
//!
//! This crate holds everything behind the `ticker` command line:
//! - Domain types for quotes, bars, news, options, summaries, screens, insights
//! - Indicator engine: SMA, EMA, RSI, MACD, Bollinger Bands, plus the
//!   name-based dispatcher and the date aligner
//! - Period/interval presets and date-range resolution
//! - `MarketDataProvider` trait and the Yahoo Finance implementation
//! - TOML configuration and JSON/table output rendering

pub mod config;
pub mod data;
pub mod domain;
pub mod format;
pub mod indicators;
pub mod range;

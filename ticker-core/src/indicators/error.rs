//! Indicator configuration and alignment errors.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum IndicatorError {
    #[error("unknown indicator '{name}'. Available: sma, ema, rsi, macd, bb")]
    UnknownIndicator { name: String },

    #[error("invalid {name} value {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("indicator series has {actual} values for {expected} bars")]
    SeriesLengthMismatch { expected: usize, actual: usize },
}

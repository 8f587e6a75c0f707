//! Moving Average Convergence/Divergence (MACD).
//!
//! - MACD line: EMA(short) - EMA(long)
//! - Signal line: EMA(macd line, signal), seeded after the MACD line's warm-up
//! - Histogram: MACD line - signal line
//!
//! Lookback: max(short, long) - 1 for the MACD line, plus signal - 1 for the
//! signal line and histogram.

use super::ema::ema;

/// The three MACD output series, each as long as the input.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdLines {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

pub fn macd(values: &[f64], short: usize, long: usize, signal: usize) -> MacdLines {
    let short_ema = ema(values, short);
    let long_ema = ema(values, long);

    let macd_line: Vec<f64> = short_ema
        .iter()
        .zip(&long_ema)
        .map(|(s, l)| s - l)
        .collect();
    let signal_line = ema(&macd_line, signal);
    let histogram = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    MacdLines {
        macd: macd_line,
        signal: signal_line,
        histogram,
    }
}

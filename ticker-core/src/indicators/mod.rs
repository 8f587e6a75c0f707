//! Technical indicator engine.
//!
//! The math functions (`sma`, `ema`, `rsi`, `macd`, `bollinger`) take a value
//! series and return same-length output with NaN marking undefined entries
//! (warm-up, or a window that touched an undefined input). The dispatcher
//! resolves a name and overrides into an `IndicatorSpec`, runs the math over
//! bar closes, and aligns the output back onto bar dates.

pub mod align;
pub mod bollinger;
pub mod dispatch;
pub mod ema;
pub mod error;
pub mod macd;
pub mod params;
pub mod result;
pub mod rsi;
pub mod sma;

pub use align::{align, align_single};
pub use bollinger::{bollinger, rolling_stddev, Bands};
pub use dispatch::calculate;
pub use ema::ema;
pub use error::IndicatorError;
pub use macd::{macd, MacdLines};
pub use params::{
    BandsParams, IndicatorKind, IndicatorOverrides, IndicatorSpec, LengthParams, MacdParams,
    INDICATOR_NAMES,
};
pub use result::{IndicatorPoint, IndicatorResult, PointValues};
pub use rsi::rsi;
pub use sma::sma;

/// Create synthetic bars from close prices for testing.
///
/// open = prev_close (or close for the first bar), high/low one point outside
/// the open/close range, volume = 1000, one calendar day apart.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
                adj_close: None,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! - Middle: SMA(close, length)
//! - Upper: middle + mult * stddev(close, length)
//! - Lower: middle - mult * stddev(close, length)
//!
//! Uses population stddev (divide by N).
//! Lookback: length - 1 for all three bands.

use super::sma::sma;

/// Upper, middle, and lower band series, each as long as the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Bands {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Rolling population standard deviation over `length` values.
pub fn rolling_stddev(values: &[f64], length: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if length == 0 || n < length {
        return result;
    }

    for i in (length - 1)..n {
        let window = &values[(i + 1 - length)..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        let mean = window.iter().sum::<f64>() / length as f64;
        let variance = window
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum::<f64>()
            / length as f64;
        result[i] = variance.sqrt();
    }

    result
}

pub fn bollinger(values: &[f64], length: usize, multiplier: f64) -> Bands {
    let middle = sma(values, length);
    let stddev = rolling_stddev(values, length);

    let upper = middle
        .iter()
        .zip(&stddev)
        .map(|(m, sd)| m + multiplier * sd)
        .collect();
    let lower = middle
        .iter()
        .zip(&stddev)
        .map(|(m, sd)| m - multiplier * sd)
        .collect();

    Bands {
        upper,
        middle,
        lower,
    }
}

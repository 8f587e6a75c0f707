//! Relative Strength Index (RSI).
//!
//! Uses Wilder smoothing of average gains and average losses, seeded by the
//! simple mean of the first `length` changes.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: length.
//! Edge cases: no movement → 50; avg_loss == 0 → 100; avg_gain == 0 → 0.

/// RSI of `values` over `length` changes. Undefined before index `length`.
pub fn rsi(values: &[f64], length: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if length == 0 || n < length + 1 {
        return result;
    }

    // changes[i] = values[i] - values[i-1]; NaN if either side is NaN
    let mut changes = vec![f64::NAN; n];
    for i in 1..n {
        changes[i] = values[i] - values[i - 1];
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for &ch in &changes[1..=length] {
        if ch.is_nan() {
            return result;
        }
        if ch > 0.0 {
            avg_gain += ch;
        } else {
            avg_loss -= ch;
        }
    }
    avg_gain /= length as f64;
    avg_loss /= length as f64;

    result[length] = rsi_value(avg_gain, avg_loss);

    let alpha = 1.0 / length as f64;
    for i in (length + 1)..n {
        let ch = changes[i];
        if ch.is_nan() {
            return result;
        }

        let gain = ch.max(0.0);
        let loss = (-ch).max(0.0);

        avg_gain = alpha * gain + (1.0 - alpha) * avg_gain;
        avg_loss = alpha * loss + (1.0 - alpha) * avg_loss;

        result[i] = rsi_value(avg_gain, avg_loss);
    }

    result
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

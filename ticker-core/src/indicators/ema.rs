//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], alpha = 2 / (length + 1).
//! Seed: SMA of the first `length` defined values.
//! Lookback: length - 1 on a fully defined series.

/// EMA of `values`.
///
/// Leading NaN values (another indicator's warm-up) are skipped before seeding,
/// so the seed lands at `first_defined + length - 1`. A NaN inside the seed
/// window leaves the whole output undefined; a NaN after the seed taints every
/// later value.
pub fn ema(values: &[f64], length: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if length == 0 {
        return result;
    }

    let first = values.iter().position(|v| !v.is_nan()).unwrap_or(n);
    if n - first < length {
        return result;
    }

    let alpha = 2.0 / (length as f64 + 1.0);

    let seed_window = &values[first..first + length];
    if seed_window.iter().any(|v| v.is_nan()) {
        return result;
    }
    let seed_index = first + length - 1;
    let mut prev = seed_window.iter().sum::<f64>() / length as f64;
    result[seed_index] = prev;

    for i in (seed_index + 1)..n {
        if values[i].is_nan() {
            return result;
        }
        prev = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = prev;
    }

    result
}

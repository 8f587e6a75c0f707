//! Simple Moving Average (SMA).
//!
//! Rolling mean of a series over a trailing window.
//! Lookback: length - 1 (first valid value at index length-1).

/// Rolling mean over `length` values. Undefined (NaN) before index `length - 1`
/// and for every window that contains a NaN input.
pub fn sma(values: &[f64], length: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if length == 0 || n < length {
        return result;
    }

    // Sums are kept relative to the first defined value so a flat series
    // averages back to itself exactly.
    let shift = values.iter().copied().find(|v| !v.is_nan()).unwrap_or(0.0);
    let window_sum = |window: &[f64]| -> (f64, bool) {
        let mut sum = 0.0;
        let mut nan_in_window = false;
        for &v in window {
            if v.is_nan() {
                nan_in_window = true;
            }
            sum += v - shift;
        }
        (sum, nan_in_window)
    };

    let (mut sum, mut nan_in_window) = window_sum(&values[..length]);
    if !nan_in_window {
        result[length - 1] = shift + sum / length as f64;
    }

    for i in length..n {
        let leaving = values[i - length];
        let entering = values[i];

        if entering.is_nan() || leaving.is_nan() || nan_in_window {
            // NaN poisons the running sum; rescan the window.
            (sum, nan_in_window) = window_sum(&values[(i + 1 - length)..=i]);
            if nan_in_window {
                continue;
            }
        } else {
            sum += (entering - shift) - (leaving - shift);
        }

        result[i] = shift + sum / length as f64;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn sma_5_basic() {
        let result = sma(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0], 5);

        assert_eq!(result.len(), 7);
        for (i, v) in result.iter().enumerate().take(4) {
            assert!(v.is_nan(), "expected NaN at index {i}");
        }
        // SMA[4] = mean(10,11,12,13,14) = 12.0
        assert_approx(result[4], 12.0, DEFAULT_EPSILON);
        assert_approx(result[5], 13.0, DEFAULT_EPSILON);
        assert_approx(result[6], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_1_is_identity() {
        let result = sma(&[100.0, 200.0, 300.0], 1);
        assert_eq!(result, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn sma_flat_series_is_exact() {
        let result = sma(&[0.1; 30], 7);
        for v in &result[6..] {
            assert_eq!(*v, 0.1);
        }
    }

    #[test]
    fn sma_nan_propagation() {
        let result = sma(&[10.0, 11.0, f64::NAN, 13.0, 14.0, 15.0], 3);
        // Windows [10,11,NaN], [11,NaN,13], [NaN,13,14] are undefined
        assert!(result[2].is_nan());
        assert!(result[3].is_nan());
        assert!(result[4].is_nan());
        // [13,14,15] → 14.0
        assert_approx(result[5], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_too_few_values() {
        let result = sma(&[10.0, 11.0], 5);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn sma_zero_length_is_undefined() {
        assert!(sma(&[1.0, 2.0], 0).iter().all(|v| v.is_nan()));
    }
}

//! Series alignment: raw indicator arrays back onto the bar date axis.
//!
//! Pairs the i-th value of each parallel series with the i-th bar's date.
//! No trimming, no interpolation: NaN entries become `None` in place, and the
//! output always has exactly one row per bar.

use super::error::IndicatorError;
use super::result::{IndicatorPoint, PointValues};
use crate::domain::Bar;

fn defined(v: f64) -> Option<f64> {
    (!v.is_nan()).then_some(v)
}

/// Zip `N` parallel series with the bar dates, shaping each row with `shape`.
///
/// Every series must be exactly as long as `bars`.
pub fn align<const N: usize>(
    bars: &[Bar],
    series: [&[f64]; N],
    shape: impl Fn([Option<f64>; N]) -> PointValues,
) -> Result<Vec<IndicatorPoint>, IndicatorError> {
    for s in &series {
        if s.len() != bars.len() {
            return Err(IndicatorError::SeriesLengthMismatch {
                expected: bars.len(),
                actual: s.len(),
            });
        }
    }

    Ok(bars
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatorPoint {
            date: bar.date,
            values: shape(series.map(|s| defined(s[i]))),
        })
        .collect())
}

/// Single-value families (moving averages, RSI).
pub fn align_single(bars: &[Bar], values: &[f64]) -> Result<Vec<IndicatorPoint>, IndicatorError> {
    align(bars, [values], |[value]| PointValues::Single { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    #[test]
    fn undefined_values_pass_through_as_none() {
        let bars = make_bars(&[1.0, 2.0, 3.0]);
        let points = align_single(&bars, &[f64::NAN, 1.5, 2.5]).unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].date, bars[0].date);
        assert_eq!(points[0].values, PointValues::Single { value: None });
        assert_eq!(points[2].values, PointValues::Single { value: Some(2.5) });
    }

    #[test]
    fn multi_series_zip_by_index() {
        let bars = make_bars(&[1.0, 2.0]);
        let upper = [f64::NAN, 3.0];
        let middle = [f64::NAN, 2.0];
        let lower = [f64::NAN, 1.0];
        let points = align(&bars, [&upper, &middle, &lower], |[upper, middle, lower]| {
            PointValues::Bands {
                upper,
                middle,
                lower,
            }
        })
        .unwrap();

        assert_eq!(
            points[1].values,
            PointValues::Bands {
                upper: Some(3.0),
                middle: Some(2.0),
                lower: Some(1.0)
            }
        );
        assert_eq!(points[1].date, bars[1].date);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let bars = make_bars(&[1.0, 2.0, 3.0]);
        let err = align_single(&bars, &[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::SeriesLengthMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(align_single(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn undefined_values_are_omitted_from_json() {
        let bars = make_bars(&[1.0]);
        let points = align_single(&bars, &[f64::NAN]).unwrap();
        let json = serde_json::to_value(points[0]).unwrap();
        assert_eq!(json, serde_json::json!({"date": "2024-01-02"}));
    }
}

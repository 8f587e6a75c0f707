//! Dispatcher: indicator name + overrides + bars → aligned `IndicatorResult`.

use super::align::{align, align_single};
use super::bollinger::bollinger;
use super::ema::ema;
use super::error::IndicatorError;
use super::macd::macd;
use super::params::{IndicatorKind, IndicatorOverrides, IndicatorSpec};
use super::result::{IndicatorPoint, IndicatorResult, PointValues};
use super::rsi::rsi;
use super::sma::sma;
use crate::domain::{closes, Bar};
use tracing::{debug, warn};

/// Resolve `name` against the known families and compute it over `bars`.
///
/// Overrides that mean nothing to the chosen family are ignored with a
/// warning. The returned result has an empty symbol; callers attach one with
/// [`IndicatorResult::with_symbol`].
pub fn calculate(
    name: &str,
    bars: &[Bar],
    overrides: &IndicatorOverrides,
) -> Result<IndicatorResult, IndicatorError> {
    let kind: IndicatorKind = name.parse()?;
    for field in overrides.unused_by(kind) {
        warn!(indicator = kind.tag(), field, "override does not apply, ignoring");
    }
    let spec = IndicatorSpec::resolve(kind, overrides)?;
    Ok(IndicatorResult {
        symbol: String::new(),
        indicator: kind,
        config: spec,
        data: spec.compute(bars)?,
    })
}

impl IndicatorSpec {
    /// Compute over the close series of `bars`, one output row per bar.
    pub fn compute(&self, bars: &[Bar]) -> Result<Vec<IndicatorPoint>, IndicatorError> {
        let close = closes(bars);
        debug!(
            indicator = self.kind().tag(),
            bars = bars.len(),
            lookback = self.lookback(),
            "computing"
        );

        match *self {
            IndicatorSpec::Sma(p) => align_single(bars, &sma(&close, p.length)),
            IndicatorSpec::Ema(p) => align_single(bars, &ema(&close, p.length)),
            IndicatorSpec::Rsi(p) => align_single(bars, &rsi(&close, p.length)),
            IndicatorSpec::Macd(p) => {
                let lines = macd(&close, p.short, p.long, p.signal);
                align(
                    bars,
                    [&lines.macd, &lines.signal, &lines.histogram],
                    |[macd, signal, histogram]| PointValues::Macd {
                        macd,
                        signal,
                        histogram,
                    },
                )
            }
            IndicatorSpec::Bollinger(p) => {
                let bands = bollinger(&close, p.length, p.stddev);
                align(
                    bars,
                    [&bands.upper, &bands.middle, &bands.lower],
                    |[upper, middle, lower]| PointValues::Bands {
                        upper,
                        middle,
                        lower,
                    },
                )
            }
        }
    }
}

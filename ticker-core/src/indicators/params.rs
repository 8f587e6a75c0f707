//! Indicator families, caller overrides, and resolved parameter sets.
//!
//! Each family owns its defaults. `IndicatorSpec::resolve` merges the caller's
//! overrides over those defaults and validates the result, so a spec that
//! exists is always computable.

use super::error::IndicatorError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_MA_LENGTH: usize = 20;
pub const DEFAULT_RSI_LENGTH: usize = 14;
pub const DEFAULT_MACD_SHORT: usize = 12;
pub const DEFAULT_MACD_LONG: usize = 26;
pub const DEFAULT_MACD_SIGNAL: usize = 9;
pub const DEFAULT_BANDS_LENGTH: usize = 20;
pub const DEFAULT_BANDS_STDDEV: f64 = 2.0;

/// Canonical indicator names accepted on the command line.
pub const INDICATOR_NAMES: [&str; 5] = ["sma", "ema", "rsi", "macd", "bb"];

/// Indicator families. Serializes as the result tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IndicatorKind {
    #[serde(rename = "SMA")]
    Sma,
    #[serde(rename = "EMA")]
    Ema,
    #[serde(rename = "RSI")]
    Rsi,
    #[serde(rename = "MACD")]
    Macd,
    #[serde(rename = "BollingerBands")]
    Bollinger,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 5] = [
        IndicatorKind::Sma,
        IndicatorKind::Ema,
        IndicatorKind::Rsi,
        IndicatorKind::Macd,
        IndicatorKind::Bollinger,
    ];

    /// Display tag used in results and table titles.
    pub fn tag(self) -> &'static str {
        match self {
            IndicatorKind::Sma => "SMA",
            IndicatorKind::Ema => "EMA",
            IndicatorKind::Rsi => "RSI",
            IndicatorKind::Macd => "MACD",
            IndicatorKind::Bollinger => "BollingerBands",
        }
    }
}

impl FromStr for IndicatorKind {
    type Err = IndicatorError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sma" => Ok(IndicatorKind::Sma),
            "ema" => Ok(IndicatorKind::Ema),
            "rsi" => Ok(IndicatorKind::Rsi),
            "macd" => Ok(IndicatorKind::Macd),
            "bb" | "bollinger" | "bollingerbands" => Ok(IndicatorKind::Bollinger),
            _ => Err(IndicatorError::UnknownIndicator { name: name.into() }),
        }
    }
}

/// Caller-supplied parameter overrides. `None` means "use the family default".
///
/// Window lengths are carried as signed integers so that zero and negative
/// values reach validation instead of being clamped by a parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndicatorOverrides {
    #[serde(default, alias = "period")]
    pub length: Option<i64>,
    #[serde(default, alias = "fast")]
    pub short: Option<i64>,
    #[serde(default, alias = "slow")]
    pub long: Option<i64>,
    #[serde(default)]
    pub signal: Option<i64>,
    #[serde(default)]
    pub stddev: Option<f64>,
}

impl IndicatorOverrides {
    /// Names of the overrides that are set but mean nothing to `kind`.
    pub fn unused_by(&self, kind: IndicatorKind) -> Vec<&'static str> {
        let uses_length = !matches!(kind, IndicatorKind::Macd);
        let uses_macd = matches!(kind, IndicatorKind::Macd);
        let uses_stddev = matches!(kind, IndicatorKind::Bollinger);

        let mut unused = Vec::new();
        if self.length.is_some() && !uses_length {
            unused.push("length");
        }
        if self.short.is_some() && !uses_macd {
            unused.push("short");
        }
        if self.long.is_some() && !uses_macd {
            unused.push("long");
        }
        if self.signal.is_some() && !uses_macd {
            unused.push("signal");
        }
        if self.stddev.is_some() && !uses_stddev {
            unused.push("stddev");
        }
        unused
    }
}

/// Resolved single-window parameters (SMA, EMA, RSI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthParams {
    pub length: usize,
}

/// Resolved MACD parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MacdParams {
    pub short: usize,
    pub long: usize,
    pub signal: usize,
}

/// Resolved Bollinger Band parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandsParams {
    pub length: usize,
    pub stddev: f64,
}

/// A fully resolved indicator request. Serializes as its parameter set only,
/// which is what the result's `config` field reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IndicatorSpec {
    Sma(LengthParams),
    Ema(LengthParams),
    Rsi(LengthParams),
    Macd(MacdParams),
    Bollinger(BandsParams),
}

impl IndicatorSpec {
    /// Merge `overrides` over the defaults of `kind` and validate.
    pub fn resolve(kind: IndicatorKind, overrides: &IndicatorOverrides) -> Result<Self, IndicatorError> {
        let spec = match kind {
            IndicatorKind::Sma => IndicatorSpec::Sma(LengthParams {
                length: window("length", overrides.length, DEFAULT_MA_LENGTH)?,
            }),
            IndicatorKind::Ema => IndicatorSpec::Ema(LengthParams {
                length: window("length", overrides.length, DEFAULT_MA_LENGTH)?,
            }),
            IndicatorKind::Rsi => IndicatorSpec::Rsi(LengthParams {
                length: window("length", overrides.length, DEFAULT_RSI_LENGTH)?,
            }),
            IndicatorKind::Macd => IndicatorSpec::Macd(MacdParams {
                short: window("short", overrides.short, DEFAULT_MACD_SHORT)?,
                long: window("long", overrides.long, DEFAULT_MACD_LONG)?,
                signal: window("signal", overrides.signal, DEFAULT_MACD_SIGNAL)?,
            }),
            IndicatorKind::Bollinger => IndicatorSpec::Bollinger(BandsParams {
                length: window("length", overrides.length, DEFAULT_BANDS_LENGTH)?,
                stddev: multiplier(overrides.stddev)?,
            }),
        };
        Ok(spec)
    }

    pub fn kind(&self) -> IndicatorKind {
        match self {
            IndicatorSpec::Sma(_) => IndicatorKind::Sma,
            IndicatorSpec::Ema(_) => IndicatorKind::Ema,
            IndicatorSpec::Rsi(_) => IndicatorKind::Rsi,
            IndicatorSpec::Macd(_) => IndicatorKind::Macd,
            IndicatorSpec::Bollinger(_) => IndicatorKind::Bollinger,
        }
    }

    /// Index of the first fully defined output row on a gap-free series.
    pub fn lookback(&self) -> usize {
        match self {
            IndicatorSpec::Sma(p) | IndicatorSpec::Ema(p) => p.length - 1,
            IndicatorSpec::Rsi(p) => p.length,
            IndicatorSpec::Macd(p) => p.short.max(p.long) - 1 + p.signal - 1,
            IndicatorSpec::Bollinger(p) => p.length - 1,
        }
    }

    /// Resolved parameters as `key=value` pairs, in declaration order.
    pub fn param_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            IndicatorSpec::Sma(p) | IndicatorSpec::Ema(p) | IndicatorSpec::Rsi(p) => {
                vec![("length", p.length.to_string())]
            }
            IndicatorSpec::Macd(p) => vec![
                ("short", p.short.to_string()),
                ("long", p.long.to_string()),
                ("signal", p.signal.to_string()),
            ],
            IndicatorSpec::Bollinger(p) => vec![
                ("length", p.length.to_string()),
                ("stddev", p.stddev.to_string()),
            ],
        }
    }
}

fn window(name: &'static str, value: Option<i64>, default: usize) -> Result<usize, IndicatorError> {
    match value {
        None => Ok(default),
        Some(v) if v > 0 => usize::try_from(v).map_err(|_| IndicatorError::InvalidParameter {
            name,
            value: v.to_string(),
            reason: "window length is too large",
        }),
        Some(v) => Err(IndicatorError::InvalidParameter {
            name,
            value: v.to_string(),
            reason: "window length must be a positive integer",
        }),
    }
}

fn multiplier(value: Option<f64>) -> Result<f64, IndicatorError> {
    match value {
        None => Ok(DEFAULT_BANDS_STDDEV),
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Some(v) => Err(IndicatorError::InvalidParameter {
            name: "stddev",
            value: v.to_string(),
            reason: "multiplier must be a finite non-negative number",
        }),
    }
}

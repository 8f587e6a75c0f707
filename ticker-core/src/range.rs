//! Period presets, bar intervals, and date-range resolution for history requests.
//!
//! A history request is either an explicit `start..end` window or a period
//! preset counted back from today. The interval defaults from the period when
//! the caller does not pick one.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while resolving a history request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("invalid period '{0}'. Valid options: 1d, 5d, 1w, 1mo, 3mo, 6mo, 1y, 2y, 5y")]
    UnknownPeriod(String),

    #[error("invalid interval '{0}'. Valid options: 1m, 5m, 15m, 30m, 1h, 1d, 1w, 1mo")]
    UnknownInterval(String),

    #[error("invalid date '{0}': use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("start date {start} must be before end date {end}")]
    StartNotBeforeEnd { start: NaiveDate, end: NaiveDate },

    #[error("an end date requires a start date")]
    EndWithoutStart,
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, RangeError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| RangeError::InvalidDate(s.into()))
}

// ─── Period ──────────────────────────────────────────────────────────

/// Lookback preset counted back from today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1w", alias = "1wk")]
    OneWeek,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
}

impl Period {
    pub const ALL: [Period; 9] = [
        Period::OneDay,
        Period::FiveDays,
        Period::OneWeek,
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::TwoYears,
        Period::FiveYears,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::FiveDays => "5d",
            Period::OneWeek => "1w",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
        }
    }

    /// Bar granularity used when the caller does not ask for one.
    pub fn default_interval(self) -> Interval {
        match self {
            Period::OneDay | Period::FiveDays => Interval::FifteenMinutes,
            Period::OneWeek => Interval::OneHour,
            Period::OneMonth
            | Period::ThreeMonths
            | Period::SixMonths
            | Period::OneYear
            | Period::TwoYears => Interval::OneDay,
            Period::FiveYears => Interval::OneWeek,
        }
    }

    /// First day of the window ending at `end`.
    ///
    /// Month and year steps are calendar steps; a day that does not exist in
    /// the target month clamps to that month's last day.
    pub fn start_from(self, end: NaiveDate) -> NaiveDate {
        let start = match self {
            Period::OneDay => end.checked_sub_days(Days::new(1)),
            Period::FiveDays => end.checked_sub_days(Days::new(5)),
            Period::OneWeek => end.checked_sub_days(Days::new(7)),
            Period::OneMonth => end.checked_sub_months(Months::new(1)),
            Period::ThreeMonths => end.checked_sub_months(Months::new(3)),
            Period::SixMonths => end.checked_sub_months(Months::new(6)),
            Period::OneYear => end.checked_sub_months(Months::new(12)),
            Period::TwoYears => end.checked_sub_months(Months::new(24)),
            Period::FiveYears => end.checked_sub_months(Months::new(60)),
        };
        start.unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1wk" => Ok(Period::OneWeek),
            other => Period::ALL
                .into_iter()
                .find(|p| p.as_str() == other)
                .ok_or_else(|| RangeError::UnknownPeriod(s.into())),
        }
    }
}

// ─── Interval ────────────────────────────────────────────────────────

/// Bar granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "1w", alias = "1wk")]
    OneWeek,
    #[serde(rename = "1mo")]
    OneMonth,
}

impl Interval {
    pub const ALL: [Interval; 8] = [
        Interval::OneMinute,
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::ThirtyMinutes,
        Interval::OneHour,
        Interval::OneDay,
        Interval::OneWeek,
        Interval::OneMonth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::ThirtyMinutes => "30m",
            Interval::OneHour => "1h",
            Interval::OneDay => "1d",
            Interval::OneWeek => "1w",
            Interval::OneMonth => "1mo",
        }
    }

    /// Interval code understood by the chart endpoint.
    pub fn provider_code(self) -> &'static str {
        match self {
            Interval::OneWeek => "1wk",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1wk" => Ok(Interval::OneWeek),
            other => Interval::ALL
                .into_iter()
                .find(|i| i.as_str() == other)
                .ok_or_else(|| RangeError::UnknownInterval(s.into())),
        }
    }
}

// ─── History request ─────────────────────────────────────────────────

/// Caller-supplied range options, all optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeOptions {
    pub period: Option<Period>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub interval: Option<Interval>,
}

/// Fully resolved request for a symbol's bar history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: String,
    /// Preset the window came from; `None` for an explicit date window.
    pub period: Option<Period>,
    pub interval: Interval,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl HistoryRequest {
    /// Resolve range options against `today`.
    ///
    /// Explicit dates take precedence over the period. A start date alone runs
    /// to today. Without dates the period (or `default_period`) is counted back
    /// from today.
    pub fn resolve(
        symbol: &str,
        opts: RangeOptions,
        default_period: Period,
        today: NaiveDate,
    ) -> Result<Self, RangeError> {
        let effective_period = opts.period.unwrap_or(default_period);
        let interval = opts
            .interval
            .unwrap_or_else(|| effective_period.default_interval());

        let (period, start, end) = match (opts.start, opts.end) {
            (Some(start), Some(end)) => (None, start, end),
            (Some(start), None) => (None, start, today),
            (None, Some(_)) => return Err(RangeError::EndWithoutStart),
            (None, None) => (
                Some(effective_period),
                effective_period.start_from(today),
                today,
            ),
        };

        if start >= end {
            return Err(RangeError::StartNotBeforeEnd { start, end });
        }

        Ok(Self {
            symbol: symbol.to_string(),
            period,
            interval,
            start,
            end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn period_parses_all_presets_and_week_alias() {
        for p in Period::ALL {
            assert_eq!(p.as_str().parse::<Period>().unwrap(), p);
        }
        assert_eq!("1wk".parse::<Period>().unwrap(), Period::OneWeek);
        assert_eq!("1MO".parse::<Period>().unwrap(), Period::OneMonth);
        assert_eq!(
            "7y".parse::<Period>(),
            Err(RangeError::UnknownPeriod("7y".into()))
        );
    }

    #[test]
    fn interval_provider_code_maps_week() {
        assert_eq!(Interval::OneWeek.provider_code(), "1wk");
        assert_eq!(Interval::OneDay.provider_code(), "1d");
        assert_eq!("1wk".parse::<Interval>().unwrap(), Interval::OneWeek);
        assert!("2h".parse::<Interval>().is_err());
    }

    #[test]
    fn default_intervals_follow_period_length() {
        assert_eq!(Period::OneDay.default_interval(), Interval::FifteenMinutes);
        assert_eq!(Period::FiveDays.default_interval(), Interval::FifteenMinutes);
        assert_eq!(Period::OneWeek.default_interval(), Interval::OneHour);
        assert_eq!(Period::ThreeMonths.default_interval(), Interval::OneDay);
        assert_eq!(Period::TwoYears.default_interval(), Interval::OneDay);
        assert_eq!(Period::FiveYears.default_interval(), Interval::OneWeek);
    }

    #[test]
    fn period_start_uses_calendar_steps() {
        let end = d("2024-03-15");
        assert_eq!(Period::OneDay.start_from(end), d("2024-03-14"));
        assert_eq!(Period::OneWeek.start_from(end), d("2024-03-08"));
        assert_eq!(Period::ThreeMonths.start_from(end), d("2023-12-15"));
        assert_eq!(Period::FiveYears.start_from(end), d("2019-03-15"));
    }

    #[test]
    fn period_start_clamps_to_month_end() {
        assert_eq!(Period::OneMonth.start_from(d("2024-03-31")), d("2024-02-29"));
        assert_eq!(Period::OneYear.start_from(d("2024-02-29")), d("2023-02-28"));
    }

    #[test]
    fn resolve_uses_default_period_when_nothing_given() {
        let today = d("2024-06-30");
        let req =
            HistoryRequest::resolve("AAPL", RangeOptions::default(), Period::ThreeMonths, today)
                .unwrap();
        assert_eq!(req.period, Some(Period::ThreeMonths));
        assert_eq!(req.start, d("2024-03-30"));
        assert_eq!(req.end, today);
        assert_eq!(req.interval, Interval::OneDay);
    }

    #[test]
    fn resolve_explicit_dates_win_over_period() {
        let opts = RangeOptions {
            period: Some(Period::FiveYears),
            start: Some(d("2024-01-01")),
            end: Some(d("2024-02-01")),
            interval: None,
        };
        let req = HistoryRequest::resolve("MSFT", opts, Period::OneMonth, d("2024-06-30")).unwrap();
        assert_eq!(req.period, None);
        assert_eq!(req.start, d("2024-01-01"));
        assert_eq!(req.end, d("2024-02-01"));
        // Interval still derives from the requested period.
        assert_eq!(req.interval, Interval::OneWeek);
    }

    #[test]
    fn resolve_start_only_runs_to_today() {
        let opts = RangeOptions {
            start: Some(d("2024-05-01")),
            ..Default::default()
        };
        let req = HistoryRequest::resolve("SPY", opts, Period::OneMonth, d("2024-06-30")).unwrap();
        assert_eq!(req.end, d("2024-06-30"));
    }

    #[test]
    fn resolve_rejects_end_without_start_and_inverted_range() {
        let today = d("2024-06-30");
        let end_only = RangeOptions {
            end: Some(d("2024-05-01")),
            ..Default::default()
        };
        assert_eq!(
            HistoryRequest::resolve("SPY", end_only, Period::OneMonth, today),
            Err(RangeError::EndWithoutStart)
        );

        let inverted = RangeOptions {
            start: Some(d("2024-05-02")),
            end: Some(d("2024-05-01")),
            ..Default::default()
        };
        assert!(matches!(
            HistoryRequest::resolve("SPY", inverted, Period::OneMonth, today),
            Err(RangeError::StartNotBeforeEnd { .. })
        ));
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert_eq!(
            parse_date("2024/01/01"),
            Err(RangeError::InvalidDate("2024/01/01".into()))
        );
    }
}

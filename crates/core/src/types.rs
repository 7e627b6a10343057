//! Core data types for the OHLC chart system.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Timestamp in milliseconds since Unix epoch (UTC).
pub type TimestampMs = i64;

/// Price type with ordering support.
pub type Price = OrderedFloat<f64>;

/// Milliseconds in one minute.
pub const MS_PER_MINUTE: i64 = 60_000;
/// Milliseconds in one hour.
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
/// Milliseconds in one day.
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Format used for timestamps in the result file. Fractional seconds are
/// printed only when non-zero.
pub const RESULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a timestamp string into milliseconds since epoch.
///
/// Accepts RFC 3339 and the common naive layouts (`YYYY-MM-DD HH:MM:SS[.fff]`,
/// `T` separator, minute precision, date only). Naive values are taken as UTC.
pub fn parse_timestamp(s: &str) -> Option<TimestampMs> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Format a millisecond timestamp with a chrono format string.
///
/// Out-of-range timestamps fall back to the raw millisecond value.
pub fn format_timestamp(ts_ms: TimestampMs, fmt: &str) -> String {
    match DateTime::<Utc>::from_timestamp_millis(ts_ms) {
        Some(dt) => dt.format(fmt).to_string(),
        None => ts_ms.to_string(),
    }
}

/// A single trade print.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Timestamp in milliseconds.
    pub ts_ms: TimestampMs,
    /// Trade price.
    pub price: f64,
}

impl Tick {
    pub fn new(ts_ms: TimestampMs, price: f64) -> Self {
        Self { ts_ms, price }
    }
}

/// How ticks on a bucket's upper edge are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketBoundary {
    /// `[start, start + interval)`: every tick lands in exactly one bucket.
    #[default]
    HalfOpen,
    /// `[start, start + interval]`: a tick exactly on the edge is also
    /// visible to the bucket that ends there.
    Closed,
}

/// OHLC summary of one interval bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bucket start timestamp (ms).
    pub ts_ms: TimestampMs,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price.
    pub close: f64,
}

impl Candle {
    /// A candle with all four prices equal, used to fill empty buckets.
    pub fn flat(ts_ms: TimestampMs, price: f64) -> Self {
        Self {
            ts_ms,
            open: price,
            high: price,
            low: price,
            close: price,
        }
    }

    /// Close at or above open.
    #[inline]
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    /// Check `low <= open, close <= high`.
    pub fn is_consistent(&self) -> bool {
        self.low <= self.open
            && self.low <= self.close
            && self.open <= self.high
            && self.close <= self.high
    }
}

/// One output row: a candle and its aligned EMA value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    pub ts_ms: TimestampMs,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub ema: f64,
}

impl ChartRow {
    pub fn new(candle: &Candle, ema: f64) -> Self {
        Self {
            ts_ms: candle.ts_ms,
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
            ema,
        }
    }

    /// The candle part of the row.
    pub fn candle(&self) -> Candle {
        Candle {
            ts_ms: self.ts_ms,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_formats() {
        // 2024-01-01 00:30:00 UTC
        let expected = 1704069000000i64;
        assert_eq!(parse_timestamp("2024-01-01 00:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T00:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01 00:30"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T00:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T02:30:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01 00:30:00.250"), Some(expected + 250));
        assert_eq!(parse_timestamp("2024-01-01"), Some(1704067200000));
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2024-13-01 00:00:00"), None);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(1704069000000, RESULT_TIMESTAMP_FORMAT),
            "2024-01-01 00:30:00"
        );
        assert_eq!(
            format_timestamp(1704069000250, RESULT_TIMESTAMP_FORMAT),
            "2024-01-01 00:30:00.250"
        );
        assert_eq!(format_timestamp(1704069000000, "%Y-%m-%d %H:%M"), "2024-01-01 00:30");
    }

    #[test]
    fn test_flat_candle() {
        let candle = Candle::flat(0, 42.0);
        assert!(candle.is_consistent());
        assert!(candle.is_bullish());
        assert_eq!(candle.high, candle.low);
    }

    #[test]
    fn test_candle_consistency() {
        let bad = Candle {
            ts_ms: 0,
            open: 10.0,
            high: 9.0,
            low: 8.0,
            close: 8.5,
        };
        assert!(!bad.is_consistent());
    }

    #[test]
    fn test_chart_row_candle() {
        let candle = Candle {
            ts_ms: 5,
            open: 1.0,
            high: 3.0,
            low: 0.5,
            close: 2.0,
        };
        let row = ChartRow::new(&candle, 1.5);
        assert_eq!(row.candle(), candle);
        assert_eq!(row.ema, 1.5);
    }
}

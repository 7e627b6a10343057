//! Candle interval and EMA period parsing.
//!
//! Interval strings have the form `<digit 1-9><unit>` with the unit one of
//! `T` (minutes), `H` (hours) or `D` (days), e.g. `5T`, `1H`, `1D`.

use crate::error::{Error, Result};
use crate::types::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE};
use std::fmt;
use std::str::FromStr;

/// Fixed candle width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    ms: i64,
    label: String,
}

impl Interval {
    /// Parse an interval string such as `5T`, `1H` or `1D`.
    pub fn parse(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(Error::invalid_interval(format!(
                "'{s}' must be one digit 1-9 followed by T, H or D"
            )));
        }

        let count = match bytes[0] {
            b @ b'1'..=b'9' => i64::from(b - b'0'),
            _ => {
                return Err(Error::invalid_interval(format!(
                    "'{s}' must start with a digit 1-9"
                )))
            }
        };

        let unit_ms = match bytes[1] {
            b'T' => MS_PER_MINUTE,
            b'H' => MS_PER_HOUR,
            b'D' => MS_PER_DAY,
            _ => {
                return Err(Error::invalid_interval(format!(
                    "'{s}' has unknown unit (expected T, H or D)"
                )))
            }
        };

        Ok(Self {
            ms: count * unit_ms,
            label: s.to_string(),
        })
    }

    /// Build an interval from a raw millisecond width.
    pub fn from_millis(ms: i64) -> Result<Self> {
        if ms <= 0 {
            return Err(Error::invalid_interval(format!(
                "interval must be positive, got {ms} ms"
            )));
        }
        Ok(Self {
            ms,
            label: format!("{ms}ms"),
        })
    }

    /// Width in milliseconds.
    #[inline]
    pub fn as_millis(&self) -> i64 {
        self.ms
    }

    /// The string this interval was built from.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// EMA span, validated to lie in `[EmaPeriod::MIN, EmaPeriod::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmaPeriod(u32);

impl EmaPeriod {
    pub const MIN: u32 = 7;
    pub const MAX: u32 = 200;

    pub fn new(period: u32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&period) {
            Ok(Self(period))
        } else {
            Err(Error::invalid_period(format!(
                "{period} is outside [{}, {}]",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Smoothing factor `2 / (period + 1)`.
    #[inline]
    pub fn alpha(self) -> f64 {
        2.0 / (f64::from(self.0) + 1.0)
    }
}

impl FromStr for EmaPeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let period: u32 = s
            .trim()
            .parse()
            .map_err(|_| Error::invalid_period(format!("'{s}' is not a whole number")))?;
        Self::new(period)
    }
}

impl fmt::Display for EmaPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Exponential moving average of candle closes.
//!
//! Uses the adjusted weighting: every value seen so far contributes with
//! weight `(1 - alpha)^age`, normalized by the sum of weights, so the series
//! is defined from the first candle with no warm-up gap.

use ohlc_core::{Candle, EmaPeriod, Result};
use tracing::debug;

/// Incremental adjusted EMA.
#[derive(Debug, Clone)]
pub struct AdjustedEma {
    /// `1 - alpha`.
    decay: f64,
    /// Running `sum(w_k * x_{i-k})`.
    numerator: f64,
    /// Running `sum(w_k)`.
    denominator: f64,
    count: usize,
}

impl AdjustedEma {
    /// Create an EMA with `alpha = 2 / (period + 1)`.
    pub fn new(period: EmaPeriod) -> Self {
        Self {
            decay: 1.0 - period.alpha(),
            numerator: 0.0,
            denominator: 0.0,
            count: 0,
        }
    }

    /// Add a value and return the updated average.
    pub fn add(&mut self, value: f64) -> f64 {
        self.numerator = value + self.decay * self.numerator;
        self.denominator = 1.0 + self.decay * self.denominator;
        self.count += 1;
        self.numerator / self.denominator
    }

    /// Current average, if any value has been added.
    pub fn value(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.numerator / self.denominator)
        }
    }

    /// Get the number of observations.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Clear all data.
    pub fn clear(&mut self) {
        self.numerator = 0.0;
        self.denominator = 0.0;
        self.count = 0;
    }
}

/// EMA of candle closes, one value per candle.
///
/// Fails if `period` is outside `[EmaPeriod::MIN, EmaPeriod::MAX]`.
pub fn smooth(candles: &[Candle], period: u32) -> Result<Vec<f64>> {
    let period = EmaPeriod::new(period)?;
    Ok(smooth_closes(candles, period))
}

/// EMA of candle closes with an already validated period.
pub fn smooth_closes(candles: &[Candle], period: EmaPeriod) -> Vec<f64> {
    let mut ema = AdjustedEma::new(period);
    let values: Vec<f64> = candles.iter().map(|c| ema.add(c.close)).collect();
    debug!(candles = candles.len(), period = period.get(), "Computed EMA");
    values
}

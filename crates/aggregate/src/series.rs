//! Candles and their EMA, aligned into chart rows.

use crate::bucket::bucketize_with;
use crate::ema::smooth_closes;
use ohlc_core::{
    BucketBoundary, Candle, ChartRow, EmaPeriod, Error, Interval, Result, Tick, TimestampMs,
};
use ordered_float::OrderedFloat;

/// Computed chart data for one run.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    rows: Vec<ChartRow>,
    interval: Interval,
    period: EmaPeriod,
}

impl ChartSeries {
    /// Bucket `ticks` into candles and overlay the EMA of their closes.
    pub fn compute(
        ticks: &[Tick],
        interval: Interval,
        period: EmaPeriod,
        boundary: BucketBoundary,
    ) -> Result<Self> {
        let candles = bucketize_with(ticks, &interval, boundary)?;
        let ema = smooth_closes(&candles, period);
        Self::from_parts(&candles, &ema, interval, period)
    }

    /// Pair up precomputed candles and EMA values.
    pub fn from_parts(
        candles: &[Candle],
        ema: &[f64],
        interval: Interval,
        period: EmaPeriod,
    ) -> Result<Self> {
        if candles.len() != ema.len() {
            return Err(Error::data(format!(
                "{} candles but {} EMA values",
                candles.len(),
                ema.len()
            )));
        }

        let rows = candles
            .iter()
            .zip(ema)
            .map(|(candle, &value)| ChartRow::new(candle, value))
            .collect();

        Ok(Self {
            rows,
            interval,
            period,
        })
    }

    pub fn rows(&self) -> &[ChartRow] {
        &self.rows
    }

    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    pub fn period(&self) -> EmaPeriod {
        self.period
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First and last candle timestamps.
    pub fn time_range(&self) -> Option<(TimestampMs, TimestampMs)> {
        Some((self.rows.first()?.ts_ms, self.rows.last()?.ts_ms))
    }

    /// Lowest and highest price across candle lows, highs and the EMA.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let low = self
            .rows
            .iter()
            .map(|r| OrderedFloat(r.low.min(r.ema)))
            .min()?;
        let high = self
            .rows
            .iter()
            .map(|r| OrderedFloat(r.high.max(r.ema)))
            .max()?;
        Some((low.into_inner(), high.into_inner()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ohlc_core::MS_PER_MINUTE;

    const BASE: i64 = 1_704_067_200_000;

    #[test]
    fn test_compute_aligns_rows() {
        let ticks = vec![
            Tick::new(BASE, 10.0),
            Tick::new(BASE + 30 * MS_PER_MINUTE, 12.0),
            Tick::new(BASE + 75 * MS_PER_MINUTE, 11.0),
            Tick::new(BASE + 120 * MS_PER_MINUTE, 13.0),
        ];

        let series = ChartSeries::compute(
            &ticks,
            Interval::parse("1H").unwrap(),
            EmaPeriod::new(14).unwrap(),
            BucketBoundary::HalfOpen,
        )
        .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.interval().label(), "1H");
        assert_eq!(series.period().get(), 14);
        assert_relative_eq!(series.rows()[0].ema, series.rows()[0].close);
        assert_eq!(series.time_range(), Some((BASE, BASE + 120 * MS_PER_MINUTE)));

        let (low, high) = series.price_range().unwrap();
        assert_relative_eq!(low, 10.0);
        assert_relative_eq!(high, 13.0);
    }

    #[test]
    fn test_single_tick_daily() {
        let series = ChartSeries::compute(
            &[Tick::new(BASE, 5.0)],
            Interval::parse("1D").unwrap(),
            EmaPeriod::new(7).unwrap(),
            BucketBoundary::HalfOpen,
        )
        .unwrap();

        assert_eq!(series.len(), 1);
        let row = series.rows()[0];
        assert_eq!(row.candle(), Candle::flat(BASE, 5.0));
        assert_relative_eq!(row.ema, 5.0);
    }

    #[test]
    fn test_from_parts_length_mismatch() {
        let candles = vec![Candle::flat(0, 1.0), Candle::flat(60_000, 2.0)];
        let result = ChartSeries::from_parts(
            &candles,
            &[1.0],
            Interval::parse("1T").unwrap(),
            EmaPeriod::new(7).unwrap(),
        );
        assert!(matches!(result, Err(Error::Data(_))));
    }

    #[test]
    fn test_compute_propagates_bucket_errors() {
        let result = ChartSeries::compute(
            &[],
            Interval::parse("1H").unwrap(),
            EmaPeriod::new(7).unwrap(),
            BucketBoundary::HalfOpen,
        );
        assert!(matches!(result, Err(Error::InsufficientData(_))));
    }
}

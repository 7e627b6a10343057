//! Fixed-interval candle building from ticks.
//!
//! Buckets are anchored at the first tick and advance by one interval until
//! they pass the last tick. Buckets without ticks repeat the previous close.

use ohlc_core::{BucketBoundary, Candle, Error, Interval, Price, Result, Tick, TimestampMs};
use ordered_float::OrderedFloat;
use tracing::{debug, info};

/// A bucket that's currently being filled.
#[derive(Debug, Clone)]
struct BucketInProgress {
    ts_ms: TimestampMs,
    open: Option<f64>,
    high: Price,
    low: Price,
    close: f64,
    tick_count: usize,
}

impl BucketInProgress {
    fn new(ts_ms: TimestampMs) -> Self {
        Self {
            ts_ms,
            open: None,
            high: OrderedFloat(f64::NEG_INFINITY),
            low: OrderedFloat(f64::INFINITY),
            close: 0.0,
            tick_count: 0,
        }
    }

    fn add_tick(&mut self, price: f64) {
        if self.open.is_none() {
            self.open = Some(price);
        }
        self.high = self.high.max(OrderedFloat(price));
        self.low = self.low.min(OrderedFloat(price));
        self.close = price;
        self.tick_count += 1;
    }

    fn to_candle(&self) -> Option<Candle> {
        let open = self.open?;
        Some(Candle {
            ts_ms: self.ts_ms,
            open,
            high: self.high.into_inner(),
            low: self.low.into_inner(),
            close: self.close,
        })
    }
}

/// Number of candles produced for ticks spanning `[first_ts, last_ts]`.
///
/// One bucket per interval start `t` with `first_ts <= t <= last_ts`.
pub fn candle_count(first_ts: TimestampMs, last_ts: TimestampMs, interval: &Interval) -> usize {
    let span = (last_ts - first_ts).max(0);
    (span / interval.as_millis()) as usize + 1
}

/// Build candles using half-open `[t, t + interval)` buckets.
pub fn bucketize(ticks: &[Tick], interval: &Interval) -> Result<Vec<Candle>> {
    bucketize_with(ticks, interval, BucketBoundary::HalfOpen)
}

/// Build candles with explicit bucket edge semantics.
///
/// Fails if `ticks` is empty, unsorted or carries a non-finite price.
pub fn bucketize_with(
    ticks: &[Tick],
    interval: &Interval,
    boundary: BucketBoundary,
) -> Result<Vec<Candle>> {
    validate_ticks(ticks)?;

    let step = interval.as_millis();
    let first_ts = ticks[0].ts_ms;
    let last_ts = ticks[ticks.len() - 1].ts_ms;
    let count = candle_count(first_ts, last_ts, interval);

    let mut candles: Vec<Candle> = Vec::with_capacity(count);
    // Index of the first tick at or after the current bucket start.
    let mut cursor = 0usize;
    let mut filled = 0usize;

    for i in 0..count {
        let start = first_ts + i as i64 * step;
        let end = start + step;
        let remaining = &ticks[cursor..];

        let below_end = remaining.partition_point(|t| t.ts_ms < end);
        let selected = match boundary {
            BucketBoundary::HalfOpen => below_end,
            BucketBoundary::Closed => remaining.partition_point(|t| t.ts_ms <= end),
        };

        let mut bucket = BucketInProgress::new(start);
        for tick in &remaining[..selected] {
            bucket.add_tick(tick.price);
        }

        let candle = match bucket.to_candle() {
            Some(candle) => candle,
            None => {
                let prev_close = candles
                    .last()
                    .map(|c| c.close)
                    .ok_or_else(|| Error::insufficient_data("first bucket has no ticks"))?;
                debug!(bucket_ts = start, prev_close, "Empty bucket, carrying close forward");
                filled += 1;
                Candle::flat(start, prev_close)
            }
        };
        candles.push(candle);

        cursor += below_end;
    }

    info!(
        ticks = ticks.len(),
        candles = candles.len(),
        gap_filled = filled,
        interval = %interval,
        "Built candles"
    );

    Ok(candles)
}

fn validate_ticks(ticks: &[Tick]) -> Result<()> {
    if ticks.is_empty() {
        return Err(Error::insufficient_data("no ticks to aggregate"));
    }

    if let Some(i) = ticks.windows(2).position(|w| w[1].ts_ms < w[0].ts_ms) {
        return Err(Error::data(format!(
            "ticks not sorted: tick {} ({}) precedes tick {} ({})",
            i,
            ticks[i].ts_ms,
            i + 1,
            ticks[i + 1].ts_ms
        )));
    }

    if let Some(i) = ticks.iter().position(|t| !t.price.is_finite()) {
        return Err(Error::data(format!(
            "tick {} has non-finite price {}",
            i, ticks[i].price
        )));
    }

    Ok(())
}

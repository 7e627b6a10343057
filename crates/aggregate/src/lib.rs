//! Candle aggregation for the OHLC chart system.
//!
//! This crate handles:
//! - Bucketing ticks into fixed-interval OHLC candles (with gap filling)
//! - Adjusted exponential moving average of candle closes
//! - Composing both into an aligned chart series

pub mod bucket;
pub mod ema;
pub mod series;

pub use bucket::{bucketize, bucketize_with, candle_count};
pub use ema::{smooth, smooth_closes, AdjustedEma};
pub use series::ChartSeries;

//! Core types and configuration for the OHLC chart system.
//!
//! This crate provides shared types used across all other crates:
//! - Market data types (ticks, candles, chart rows)
//! - Candle interval and EMA period parsing
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod interval;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use interval::{EmaPeriod, Interval};
pub use types::*;

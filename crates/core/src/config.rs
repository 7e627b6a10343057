//! Configuration structures for the OHLC chart system.

use crate::error::{Error, Result};
use crate::types::BucketBoundary;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for a charting run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tick file layout.
    pub input: InputConfig,
    /// Candle aggregation configuration.
    pub aggregation: AggregationConfig,
    /// Result file configuration.
    pub output: OutputConfig,
    /// Chart rendering configuration.
    pub chart: ChartConfig,
}

impl Config {
    /// Load a configuration from a JSON file. Missing sections take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.input.timestamp_column.is_empty() || self.input.price_column.is_empty() {
            return Err(Error::config("input column names must not be empty"));
        }
        if !self.input.delimiter.is_ascii() {
            return Err(Error::config(format!(
                "delimiter '{}' is not a single ASCII character",
                self.input.delimiter
            )));
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(Error::config("chart dimensions must be non-zero"));
        }
        Ok(())
    }
}

/// Tick file layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Name of the timestamp column.
    pub timestamp_column: String,
    /// Name of the price column.
    pub price_column: String,
    /// Field delimiter.
    pub delimiter: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            timestamp_column: "TS".to_string(),
            price_column: "PRICE".to_string(),
            delimiter: ',',
        }
    }
}

/// Candle aggregation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Bucket edge semantics.
    pub boundary: BucketBoundary,
}

/// Result file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the result CSV.
    pub result_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            result_path: PathBuf::from("result.csv"),
        }
    }
}

/// Chart rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Whether to render a chart at all.
    pub enabled: bool,
    /// Path of the SVG chart.
    pub path: PathBuf,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Maximum number of x axis labels.
    pub max_x_labels: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from("chart.svg"),
            width: 1000,
            height: 800,
            max_x_labels: 10,
        }
    }
}

//! Command line arguments.

use clap::Parser;
use ohlc_core::{BucketBoundary, Config, Result};
use std::path::PathBuf;

/// Build OHLC candles with an EMA overlay from tick data.
///
/// File, interval and period are prompted for when not given.
#[derive(Parser, Debug, Default)]
#[command(name = "ohlc-chart", version)]
pub struct Args {
    /// Tick data file (.csv)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Candle interval: a digit 1-9 followed by T (minutes), H (hours) or D (days)
    #[arg(short, long)]
    pub interval: Option<String>,

    /// EMA period (7 to 200)
    #[arg(short, long)]
    pub period: Option<String>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Result CSV path (overrides the configuration)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Chart SVG path (overrides the configuration)
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Skip chart rendering
    #[arg(long)]
    pub no_chart: bool,

    /// Include a tick on a bucket's upper edge in both adjacent buckets
    #[arg(long)]
    pub closed_buckets: bool,
}

impl Args {
    /// Load the configuration file (or defaults) and apply flag overrides.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };

        if let Some(output) = &self.output {
            config.output.result_path = output.clone();
        }
        if let Some(chart) = &self.chart {
            config.chart.path = chart.clone();
        }
        if self.no_chart {
            config.chart.enabled = false;
        }
        if self.closed_buckets {
            config.aggregation.boundary = BucketBoundary::Closed;
        }

        config.validate()?;
        Ok(config)
    }
}

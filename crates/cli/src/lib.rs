//! Command line front end for the OHLC chart system.
//!
//! Collects the tick file, interval and EMA period (from flags or prompts),
//! then runs load -> bucketize -> smooth -> write result -> render chart.

pub mod args;
pub mod prompt;

pub use args::Args;

use anyhow::Context;
use ohlc_aggregate::ChartSeries;
use ohlc_core::{Config, EmaPeriod, Interval};
use ohlc_io::{load_ticks, write_result_csv};
use ohlc_render::render_chart;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;

/// Validated inputs for one run.
#[derive(Debug, Clone)]
pub struct RunInputs {
    pub file: PathBuf,
    pub interval: Interval,
    pub period: EmaPeriod,
}

/// Take each input from its flag, or prompt for it when the flag is absent.
///
/// A flag value that fails validation is an error; it is not re-prompted.
pub fn collect_inputs<R: BufRead, W: Write>(
    args: &Args,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<RunInputs> {
    let file = match &args.file {
        Some(file) => prompt::validate_data_file(file).context("--file")?,
        None => prompt::prompt_data_file(input, out)?,
    };
    let interval = match &args.interval {
        Some(interval) => Interval::parse(interval).context("--interval")?,
        None => prompt::prompt_interval(input, out)?,
    };
    let period = match &args.period {
        Some(period) => period.parse::<EmaPeriod>().context("--period")?,
        None => prompt::prompt_period(input, out)?,
    };

    Ok(RunInputs {
        file,
        interval,
        period,
    })
}

/// Run the whole pipeline. Nothing is written if loading or aggregation fails.
pub fn run(inputs: &RunInputs, config: &Config) -> anyhow::Result<ChartSeries> {
    let ticks = load_ticks(&inputs.file, &config.input)
        .with_context(|| format!("loading ticks from {}", inputs.file.display()))?;

    let series = ChartSeries::compute(
        &ticks,
        inputs.interval.clone(),
        inputs.period,
        config.aggregation.boundary,
    )
    .context("building candles")?;

    write_result_csv(&config.output.result_path, series.rows()).with_context(|| {
        format!("writing {}", config.output.result_path.display())
    })?;

    if config.chart.enabled {
        render_chart(&series, &config.chart)
            .with_context(|| format!("rendering {}", config.chart.path.display()))?;
    }

    info!(
        candles = series.len(),
        interval = %inputs.interval,
        period = inputs.period.get(),
        "Run complete"
    );
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ohlc_io::read_result_csv;
    use std::io::Cursor;

    const TICKS: &str = "TS,PRICE\n\
        2024-01-01 02:00:00,13\n\
        2024-01-01 00:00:00,10\n\
        2024-01-01 01:15:00,11\n\
        2024-01-01 00:30:00,12\n";

    fn write_ticks(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("prices.csv");
        std::fs::write(&path, TICKS).unwrap();
        path
    }

    fn config_in(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.output.result_path = dir.join("result.csv");
        config.chart.path = dir.join("chart.svg");
        config
    }

    #[test]
    fn test_run_writes_result_and_chart() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = RunInputs {
            file: write_ticks(dir.path()),
            interval: Interval::parse("1H").unwrap(),
            period: EmaPeriod::new(14).unwrap(),
        };
        let config = config_in(dir.path());

        let series = run(&inputs, &config).unwrap();
        assert_eq!(series.len(), 3);

        let rows = read_result_csv(&config.output.result_path).unwrap();
        assert_eq!(rows.len(), 3);
        assert_relative_eq!(rows[0].open, 10.0);
        assert_relative_eq!(rows[0].high, 12.0);
        assert_relative_eq!(rows[0].close, 12.0);
        assert_relative_eq!(rows[0].ema, 12.0);
        assert_relative_eq!(rows[1].close, 11.0);
        assert_relative_eq!(rows[2].close, 13.0);
        assert!(config.chart.path.exists());
    }

    #[test]
    fn test_run_without_chart() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = RunInputs {
            file: write_ticks(dir.path()),
            interval: Interval::parse("5T").unwrap(),
            period: EmaPeriod::new(7).unwrap(),
        };
        let mut config = config_in(dir.path());
        config.chart.enabled = false;

        let series = run(&inputs, &config).unwrap();

        // 120 minutes / 5 + 1
        assert_eq!(series.len(), 25);
        assert!(config.output.result_path.exists());
        assert!(!config.chart.path.exists());
    }

    #[test]
    fn test_failed_load_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "TS,PRICE\n").unwrap();
        let inputs = RunInputs {
            file: path,
            interval: Interval::parse("1H").unwrap(),
            period: EmaPeriod::new(14).unwrap(),
        };
        let config = config_in(dir.path());

        assert!(run(&inputs, &config).is_err());
        assert!(!config.output.result_path.exists());
    }

    #[test]
    fn test_collect_inputs_mixes_flags_and_prompts() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_ticks(dir.path());
        let args = Args {
            file: Some(file.to_str().unwrap().to_string()),
            ..Args::default()
        };
        let mut input = Cursor::new(b"2H\n30\n".to_vec());
        let mut out = Vec::new();

        let inputs = collect_inputs(&args, &mut input, &mut out).unwrap();

        assert_eq!(inputs.file, file);
        assert_eq!(inputs.interval.label(), "2H");
        assert_eq!(inputs.period.get(), 30);
        let printed = String::from_utf8(out).unwrap();
        assert!(!printed.contains(".csv data file"));
    }

    #[test]
    fn test_collect_inputs_rejects_bad_flag() {
        let args = Args {
            interval: Some("1W".to_string()),
            file: None,
            ..Args::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let file = write_ticks(dir.path());
        let mut input = Cursor::new(format!("{}\n", file.display()).into_bytes());
        let mut out = Vec::new();

        assert!(collect_inputs(&args, &mut input, &mut out).is_err());
    }
}

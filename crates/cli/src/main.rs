use anyhow::Context;
use clap::Parser;
use ohlc_cli::{collect_inputs, run, Args};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.load_config().context("loading configuration")?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();
    let inputs = collect_inputs(&args, &mut input, &mut out)?;

    let series = run(&inputs, &config)?;

    println!(
        "Wrote {} candles to {}",
        series.len(),
        config.output.result_path.display()
    );
    if config.chart.enabled {
        println!("Chart saved to {}", config.chart.path.display());
    }
    Ok(())
}

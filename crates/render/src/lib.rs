//! Candlestick chart rendering for the OHLC chart system.
//!
//! Draws one candlestick per row (green when close >= open, red otherwise)
//! with the EMA overlaid as a line, and writes the chart as SVG.

use ohlc_aggregate::ChartSeries;
use ohlc_core::config::ChartConfig;
use ohlc_core::{format_timestamp, Error, Result};
use plotters::prelude::*;
use tracing::info;

/// X axis label format.
const X_LABEL_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Fraction of the per-candle slot taken by the candle body.
const BODY_FILL: f64 = 0.6;
/// Pixels reserved for the y axis labels.
const Y_LABEL_AREA: u32 = 80;
/// Pixels reserved for the x axis labels.
const X_LABEL_AREA: u32 = 60;
const MARGIN: u32 = 20;

fn render_err<E: std::fmt::Display>(err: E) -> Error {
    Error::render(err.to_string())
}

/// Chart title for a series.
pub fn chart_title(series: &ChartSeries) -> String {
    format!(
        "Candlestick Chart with EMA ({} interval)",
        series.interval().label()
    )
}

/// Render `series` to the SVG file named in `config`.
pub fn render_chart(series: &ChartSeries, config: &ChartConfig) -> Result<()> {
    let (first_ts, last_ts) = series
        .time_range()
        .ok_or_else(|| Error::insufficient_data("no candles to plot"))?;
    let (low, high) = series
        .price_range()
        .ok_or_else(|| Error::insufficient_data("no prices to plot"))?;

    // Half a slot on each side so the edge candles are not clipped.
    let half_step = (series.interval().as_millis() / 2).max(1);
    let x_range = (first_ts - half_step)..(last_ts + half_step);
    let (y_low, y_high) = padded_range(low, high);

    let root = SVGBackend::new(&config.path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(chart_title(series), ("sans-serif", 24))
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(x_range, y_low..y_high)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_labels(config.max_x_labels)
        .x_label_formatter(&|ts: &i64| format_timestamp(*ts, X_LABEL_FORMAT))
        .x_desc("Time")
        .y_desc("Price")
        .draw()
        .map_err(render_err)?;

    let width = candle_width(config.width, series.len());
    chart
        .draw_series(series.rows().iter().map(|row| {
            CandleStick::new(
                row.ts_ms,
                row.open,
                row.high,
                row.low,
                row.close,
                GREEN.filled(),
                RED.filled(),
                width,
            )
        }))
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(
            series.rows().iter().map(|row| (row.ts_ms, row.ema)),
            &BLUE,
        ))
        .map_err(render_err)?
        .label(format!("EMA-{}", series.period()))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;

    info!(path = %config.path.display(), candles = series.len(), "Rendered chart");
    Ok(())
}

/// Pad the price range by 5% so candles do not touch the frame.
fn padded_range(low: f64, high: f64) -> (f64, f64) {
    let span = high - low;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        (high.abs() * 0.01).max(1.0)
    };
    (low - pad, high + pad)
}

/// Candle body width in pixels for `count` candles across a chart `chart_width` wide.
fn candle_width(chart_width: u32, count: usize) -> u32 {
    let plot_width = chart_width.saturating_sub(Y_LABEL_AREA + 2 * MARGIN).max(1);
    let slot = plot_width as f64 / count.max(1) as f64;
    ((slot * BODY_FILL) as u32).clamp(1, 40)
}

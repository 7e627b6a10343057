//! Tick loading from delimited text files.
//!
//! The file must have a header row naming a timestamp and a price column.
//! Other columns are ignored. Rows may be in any order; the returned ticks
//! are sorted by timestamp with ties kept in file order.

use crate::csv_err;
use ohlc_core::config::InputConfig;
use ohlc_core::{parse_timestamp, Error, Result, Tick};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Load ticks from a file on disk.
pub fn load_ticks(path: impl AsRef<Path>, config: &InputConfig) -> Result<Vec<Tick>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let ticks = read_ticks(file, config)?;

    info!(path = %path.display(), ticks = ticks.len(), "Loaded ticks");
    Ok(ticks)
}

/// Read ticks from any reader.
pub fn read_ticks<R: Read>(reader: R, config: &InputConfig) -> Result<Vec<Tick>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter as u8)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_err)?.clone();
    let ts_idx = column_index(&headers, &config.timestamp_column)?;
    let px_idx = column_index(&headers, &config.price_column)?;

    let mut ticks = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(csv_err)?;
        // Header is line 1.
        let line = row + 2;

        let ts_raw = record.get(ts_idx).unwrap_or_default();
        let ts_ms = parse_timestamp(ts_raw).ok_or_else(|| {
            Error::data(format!("line {line}: cannot parse timestamp '{ts_raw}'"))
        })?;

        let px_raw = record.get(px_idx).unwrap_or_default();
        let price: f64 = px_raw
            .parse()
            .map_err(|_| Error::data(format!("line {line}: cannot parse price '{px_raw}'")))?;
        if !price.is_finite() {
            return Err(Error::data(format!("line {line}: price '{px_raw}' is not finite")));
        }

        ticks.push(Tick::new(ts_ms, price));
    }

    if ticks.is_empty() {
        return Err(Error::insufficient_data("tick file has no data rows"));
    }

    if ticks.windows(2).any(|w| w[1].ts_ms < w[0].ts_ms) {
        debug!(ticks = ticks.len(), "Ticks out of order, sorting");
        ticks.sort_by_key(|t| t.ts_ms);
    }

    Ok(ticks)
}

/// Find a column by exact name, falling back to a case-insensitive match.
fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .or_else(|| headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
        .ok_or_else(|| {
            Error::data(format!(
                "column '{name}' not found (columns: {})",
                headers.iter().collect::<Vec<_>>().join(", ")
            ))
        })
}

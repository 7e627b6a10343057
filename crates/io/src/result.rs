//! Result file writing and reading.
//!
//! One row per candle with columns `Timestamp, Open, High, Low, Close, EMA`.

use crate::csv_err;
use ohlc_core::{
    format_timestamp, parse_timestamp, ChartRow, Error, Result, RESULT_TIMESTAMP_FORMAT,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

/// Result file header, in column order.
pub const RESULT_COLUMNS: [&str; 6] = ["Timestamp", "Open", "High", "Low", "Close", "EMA"];

/// One serialized result row.
#[derive(Debug, Serialize, Deserialize)]
struct ResultRecord {
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "Open")]
    open: f64,
    #[serde(rename = "High")]
    high: f64,
    #[serde(rename = "Low")]
    low: f64,
    #[serde(rename = "Close")]
    close: f64,
    #[serde(rename = "EMA")]
    ema: f64,
}

impl From<&ChartRow> for ResultRecord {
    fn from(row: &ChartRow) -> Self {
        Self {
            timestamp: format_timestamp(row.ts_ms, RESULT_TIMESTAMP_FORMAT),
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            ema: row.ema,
        }
    }
}

impl TryFrom<ResultRecord> for ChartRow {
    type Error = Error;

    fn try_from(record: ResultRecord) -> Result<Self> {
        let ts_ms = parse_timestamp(&record.timestamp).ok_or_else(|| {
            Error::data(format!("cannot parse timestamp '{}'", record.timestamp))
        })?;
        Ok(ChartRow {
            ts_ms,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
            ema: record.ema,
        })
    }
}

/// Write the result file to disk.
pub fn write_result_csv(path: impl AsRef<Path>, rows: &[ChartRow]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_results(file, rows)?;

    info!(path = %path.display(), rows = rows.len(), "Wrote result file");
    Ok(())
}

/// Write result rows to any writer. The header is always written.
pub fn write_results<W: Write>(writer: W, rows: &[ChartRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(RESULT_COLUMNS).map_err(csv_err)?;
    for row in rows {
        writer.serialize(ResultRecord::from(row)).map_err(csv_err)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a result file from disk.
pub fn read_result_csv(path: impl AsRef<Path>) -> Result<Vec<ChartRow>> {
    let file = File::open(path.as_ref())?;
    read_results(file)
}

/// Read result rows from any reader.
pub fn read_results<R: Read>(reader: R) -> Result<Vec<ChartRow>> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader.headers().map_err(csv_err)?;
    if !headers.iter().eq(RESULT_COLUMNS) {
        return Err(Error::data(format!(
            "unexpected result header: {}",
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    reader
        .deserialize::<ResultRecord>()
        .map(|record| ChartRow::try_from(record.map_err(csv_err)?))
        .collect()
}

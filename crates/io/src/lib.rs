//! File input and output for the OHLC chart system.
//!
//! This crate handles:
//! - Loading ticks from delimited text files
//! - Writing the candle + EMA result file
//! - Reading a result file back

pub mod result;
pub mod ticks;

pub use result::{read_result_csv, read_results, write_result_csv, write_results, RESULT_COLUMNS};
pub use ticks::{load_ticks, read_ticks};

use ohlc_core::Error;

/// Map a csv crate error into our error type.
pub(crate) fn csv_err(err: csv::Error) -> Error {
    Error::csv(err.to_string())
}

//! Error types for the OHLC chart system.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the OHLC chart system.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data error (invalid, unsorted or missing data).
    #[error("Data error: {0}")]
    Data(String),

    /// Insufficient data for computation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Malformed or non-positive candle interval.
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    /// EMA period outside the supported range.
    #[error("Invalid EMA period: {0}")]
    InvalidPeriod(String),

    /// CSV read/write error.
    #[error("CSV error: {0}")]
    Csv(String),

    /// Chart rendering error.
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a data error.
    pub fn data(msg: impl Into<String>) -> Self {
        Error::Data(msg.into())
    }

    /// Create an insufficient data error.
    pub fn insufficient_data(msg: impl Into<String>) -> Self {
        Error::InsufficientData(msg.into())
    }

    /// Create an invalid interval error.
    pub fn invalid_interval(msg: impl Into<String>) -> Self {
        Error::InvalidInterval(msg.into())
    }

    /// Create an invalid period error.
    pub fn invalid_period(msg: impl Into<String>) -> Self {
        Error::InvalidPeriod(msg.into())
    }

    /// Create a CSV error.
    pub fn csv(msg: impl Into<String>) -> Self {
        Error::Csv(msg.into())
    }

    /// Create a render error.
    pub fn render(msg: impl Into<String>) -> Self {
        Error::Render(msg.into())
    }
}

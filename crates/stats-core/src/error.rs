use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the chat statistics crates.
#[derive(Error, Debug)]
pub enum StatsError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The aggregated report could not be written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The export could not be decoded as CSV (header or encoding level).
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON document could not be parsed or serialised.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A date cell did not match the two-digit-year `YY-MM-DD` format.
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// A time cell did not match `hh:mm`.
    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    /// The export had data rows but none of them could be parsed.
    #[error("No valid messages found in {path} ({rows} rows read)")]
    NoValidRows { path: PathBuf, rows: usize },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the chat statistics crates.
pub type Result<T> = std::result::Result<T, StatsError>;

//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while loading the daily metric tables
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("duplicate date {date} in '{path}' (date key must be unique per chain)")]
    DuplicateDate { date: NaiveDate, path: String },

    #[error("no usable rows in '{0}'")]
    EmptyTable(String),
}

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("no modeled rows to chart")]
    EmptySeries,

    #[error("chart width/height too small: {0}x{1}")]
    DegenerateGeometry(usize, usize),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("CSV export failed: {0}")]
    CsvFailed(#[from] csv::Error),

    #[error("invalid output path: {0}")]
    InvalidPath(String),
}

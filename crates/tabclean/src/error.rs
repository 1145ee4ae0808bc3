//! Error types for the tabclean library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tabclean operations.
#[derive(Debug, Error)]
pub enum TabcleanError {
    /// Error reading, creating or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed row or cell in the input data.
    #[error("Parse error at row {row}, column {column}: {message}")]
    Parse {
        row: usize,
        column: usize,
        message: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error opening or reading an Excel workbook.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    /// Error assembling an xlsx package.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no data to load.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TabcleanError {
    /// Wrap an IO error with the path it happened on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for tabclean operations.
pub type Result<T> = std::result::Result<T, TabcleanError>;

//! Dataset error types
//!
//! Defines all errors that can occur while loading or re-parsing sales data.

use thiserror::Error;

/// Errors that can occur in the dataset layer
#[derive(Error, Debug)]
pub enum DatasetError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV framing error (ragged row, bad quoting, invalid UTF-8)
    #[error("CSV error: {0}")]
    Csv(String),

    /// A required column is absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A date cell could not be parsed as a calendar date
    #[error("Line {line}: cannot parse date '{value}'")]
    InvalidDate { line: usize, value: String },

    /// A sales cell could not be parsed as a number
    #[error("Line {line}: cannot parse sales amount '{value}'")]
    InvalidAmount { line: usize, value: String },
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        DatasetError::Csv(err.to_string())
    }
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

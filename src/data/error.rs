use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a sales extract from loading.
///
/// Display strings are shown verbatim in the dashboard's status line.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(
        "The '{}' file was not found. Please make sure it is in the same directory as the application.",
        .0.display()
    )]
    MissingFile(PathBuf),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid JSON record {row}: {reason}")]
    InvalidJsonRecord { row: usize, reason: String },

    #[error("Invalid Parquet file: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Invalid Arrow data: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Required column '{0}' is missing")]
    MissingColumn(&'static str),

    #[error("Row {row}: cannot parse date '{value}'")]
    InvalidDate { row: usize, value: String },

    #[error("Row {row}: column '{column}' has non-numeric value '{value}'")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Row {row}: purchase address '{address}' has no city component")]
    MalformedAddress { row: usize, address: String },
}

pub type LoadResult<T> = Result<T, LoadError>;

use std::path::PathBuf;

use crate::dataset::DatasetError;

/// Errors that can occur during import
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    /// The container path does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid file format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A required container entry is absent
    #[error("Container is missing entry: {0}")]
    MissingEntry(String),

    /// Column not found
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Format version this reader does not understand
    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(String),

    /// Decoded data violates the dataset invariants
    #[error("Invalid dataset: {0}")]
    InvalidDataset(#[from] DatasetError),
}

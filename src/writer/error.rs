use crate::dataset::DatasetError;

/// Errors that can occur during export
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the Arrow library during array operations
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Error from the Parquet library during table encoding
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// Error from the ZIP container library
    #[error("ZIP error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// Error serializing the manifest
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Dataset violates its invariants
    #[error("Invalid dataset: {0}")]
    DatasetError(#[from] DatasetError),

    /// Dataset cannot be represented in the container
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

use crate::dataset::DatasetError;

/// Errors that can occur while reading sample sheets and joining them onto a dataset
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// I/O error reading the sample sheet
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV/TSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// The key column is not in the sheet header
    #[error("Missing required sample sheet column: {0}")]
    MissingColumn(String),

    /// Malformed sample sheet
    #[error("Invalid sample sheet: {0}")]
    InvalidFormat(String),

    /// An observation has no row in the sample sheet
    #[error("No sample sheet row for observation '{0}'")]
    UnmatchedSample(String),

    /// Adding the joined columns violated a dataset invariant
    #[error("Dataset error: {0}")]
    DatasetError(#[from] DatasetError),
}

use crate::dataset::DatasetError;

/// Errors raised while converting values across the bridge
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// A required record field is absent
    #[error("{record} record is missing field '{field}'")]
    MissingField {
        /// Record class
        record: String,
        /// Missing field
        field: String,
    },

    /// A record field the schema does not declare
    #[error("{record} record has unknown field '{field}'")]
    UnknownField {
        /// Record class
        record: String,
        /// Undeclared field
        field: String,
    },

    /// A value has the wrong type
    #[error("Type mismatch for {context}: expected {expected}, found {found}")]
    TypeMismatch {
        /// What was being converted
        context: String,
        /// Expected type
        expected: String,
        /// Actual type
        found: String,
    },

    /// An identifier field does not match the matrix shape
    #[error("Length mismatch for '{field}': expected {expected}, found {found}")]
    LengthMismatch {
        /// Field name
        field: String,
        /// Length implied by the matrix
        expected: usize,
        /// Actual length
        found: usize,
    },

    /// The runtime has no call by this name
    #[error("Unknown call: {0}")]
    UnknownCall(String),

    /// A requested output is not bound after the call
    #[error("Unknown output: {0}")]
    UnknownOutput(String),

    /// The bridge runtime cannot execute requests
    #[error("Runtime unavailable: {0}")]
    RuntimeUnavailable(String),

    /// The converted dataset violates its invariants
    #[error("Invalid dataset: {0}")]
    InvalidDataset(#[from] DatasetError),
}

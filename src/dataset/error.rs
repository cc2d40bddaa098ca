use crate::matrix::MatrixError;

use super::Axis;

/// Errors raised when a dataset would violate its structural invariants
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    /// Matrix storage is malformed
    #[error("Matrix error: {0}")]
    MatrixError(#[from] MatrixError),

    /// An identifier list or attribute column has the wrong length for its axis
    #[error("Length mismatch for {axis} {what}: expected {expected}, found {found}")]
    LengthMismatch {
        /// Axis the sequence belongs to
        axis: Axis,
        /// What was measured (identifiers or an attribute name)
        what: String,
        /// Length implied by the matrix shape
        expected: usize,
        /// Actual length
        found: usize,
    },

    /// The same identifier appears twice on one axis
    #[error("Duplicate {axis} identifier: {id}")]
    DuplicateIdentifier {
        /// Axis of the identifier
        axis: Axis,
        /// Repeated identifier
        id: String,
    },

    /// Two attributes on one axis share a name
    #[error("Duplicate {axis} attribute: {name}")]
    DuplicateAttribute {
        /// Axis of the attribute
        axis: Axis,
        /// Colliding name
        name: String,
    },

    /// A categorical code is neither -1 nor a valid category index
    #[error("Invalid category code {code} in {axis} attribute '{name}' ({n_categories} categories)")]
    InvalidCategoryCode {
        /// Axis of the attribute
        axis: Axis,
        /// Attribute name
        name: String,
        /// Offending code
        code: i32,
        /// Number of declared categories
        n_categories: usize,
    },

    /// An attribute does not have the type an operation requires
    #[error("Invalid {axis} attribute '{name}': {reason}")]
    InvalidAttribute {
        /// Axis of the attribute
        axis: Axis,
        /// Attribute name
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// Matrix tag must not be empty
    #[error("Matrix name must not be empty")]
    EmptyMatrixName,
}

/// Errors raised while constructing or reshaping matrix storage
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatrixError {
    /// Flat value buffer does not match the declared shape
    #[error("Shape mismatch: expected {expected} values for {n_rows}x{n_cols}, found {found}")]
    ShapeMismatch {
        /// Declared row count
        n_rows: usize,
        /// Declared column count
        n_cols: usize,
        /// Number of values implied by the shape
        expected: usize,
        /// Number of values supplied
        found: usize,
    },

    /// The cell count of the declared shape does not fit in `usize`
    #[error("Shape overflow: {n_rows}x{n_cols} cells do not fit in memory")]
    ShapeOverflow {
        /// Declared row count
        n_rows: usize,
        /// Declared column count
        n_cols: usize,
    },

    /// A row of a nested dense input has the wrong width
    #[error("Ragged rows: row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        /// Offending row
        row: usize,
        /// Width of the first row
        expected: usize,
        /// Width of the offending row
        found: usize,
    },

    /// CSR components are inconsistent
    #[error("Invalid sparse structure: {0}")]
    InvalidSparse(String),

    /// An entry lies outside the matrix bounds
    #[error("Index ({row}, {col}) out of bounds for {n_rows}x{n_cols} matrix")]
    IndexOutOfBounds {
        /// Row index
        row: usize,
        /// Column index
        col: usize,
        /// Row count
        n_rows: usize,
        /// Column count
        n_cols: usize,
    },
}

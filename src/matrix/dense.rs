use ndarray::{Array2, ArrayView1};

use super::MatrixError;

/// Dense matrix (n_rows × n_cols) backed by an [`ndarray::Array2`].
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    values: Array2<f64>,
}

/// `n_rows * n_cols`, or an error when the shape cannot be allocated.
///
/// Mirrors ndarray's limit: the product of the non-zero axis lengths must fit in `isize`.
pub(crate) fn cell_count(n_rows: usize, n_cols: usize) -> Result<usize, MatrixError> {
    let fits = n_rows
        .max(1)
        .checked_mul(n_cols.max(1))
        .is_some_and(|n| n <= isize::MAX as usize);
    if !fits {
        return Err(MatrixError::ShapeOverflow { n_rows, n_cols });
    }
    Ok(n_rows * n_cols)
}

impl DenseMatrix {
    /// Create a dense matrix from a flat row-major buffer.
    pub fn new(n_rows: usize, n_cols: usize, values: Vec<f64>) -> Result<Self, MatrixError> {
        let expected = cell_count(n_rows, n_cols)?;
        let found = values.len();
        if found != expected {
            return Err(MatrixError::ShapeMismatch {
                n_rows,
                n_cols,
                expected,
                found,
            });
        }
        let values = Array2::from_shape_vec((n_rows, n_cols), values).map_err(|_| {
            MatrixError::ShapeMismatch {
                n_rows,
                n_cols,
                expected,
                found,
            }
        })?;
        Ok(Self { values })
    }

    /// All-zero matrix.
    pub fn zeros(n_rows: usize, n_cols: usize) -> Result<Self, MatrixError> {
        cell_count(n_rows, n_cols)?;
        Ok(Self {
            values: Array2::zeros((n_rows, n_cols)),
        })
    }

    /// Build from nested rows. Every row must have the same width.
    ///
    /// An empty outer vector yields a `0 × 0` matrix; use [`DenseMatrix::zeros`]
    /// for an empty matrix with a non-zero column count.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.len());
        cell_count(n_rows, n_cols)?;
        let mut values = Vec::with_capacity(rows.iter().map(Vec::len).sum());
        for (row, data) in rows.into_iter().enumerate() {
            if data.len() != n_cols {
                return Err(MatrixError::RaggedRows {
                    row,
                    expected: n_cols,
                    found: data.len(),
                });
            }
            values.extend(data);
        }
        Self::new(n_rows, n_cols, values)
    }

    /// (n_rows, n_cols)
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get((row, col)).copied()
    }

    /// Set a value. Returns an error if the index is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), MatrixError> {
        let (n_rows, n_cols) = self.shape();
        let cell = self
            .values
            .get_mut((row, col))
            .ok_or(MatrixError::IndexOutOfBounds {
                row,
                col,
                n_rows,
                n_cols,
            })?;
        *cell = value;
        Ok(())
    }

    /// One row. Panics when `row` is out of bounds.
    pub fn row(&self, row: usize) -> ArrayView1<'_, f64> {
        self.values.row(row)
    }

    /// Iterate every cell as `(row, col, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.values
            .indexed_iter()
            .map(|((row, col), &value)| (row, col, value))
    }

    /// Underlying array.
    pub fn as_array(&self) -> &Array2<f64> {
        &self.values
    }

    /// Transposed copy (n_cols × n_rows).
    pub fn transpose(&self) -> Self {
        Self {
            values: self.values.t().as_standard_layout().into_owned(),
        }
    }
}

impl From<Array2<f64>> for DenseMatrix {
    fn from(values: Array2<f64>) -> Self {
        Self { values }
    }
}

//! Compressed sparse row (CSR) storage on top of [`nalgebra_sparse::CsrMatrix`].
//!
//! Only entries whose bit pattern differs from `+0.0` are stored, so a
//! dense → sparse → dense trip keeps `-0.0`, NaN payloads and infinities intact.
//! `CsrMatrix` keeps explicit entries as given, which is what makes this work.

use nalgebra_sparse::{CooMatrix, CsrMatrix, SparseFormatError};
use ndarray::Array2;

use super::{DenseMatrix, MatrixError};

/// Returns true when `value` must be kept in sparse storage.
#[inline]
pub(crate) fn is_stored(value: f64) -> bool {
    value.to_bits() != 0
}

fn invalid(e: SparseFormatError) -> MatrixError {
    MatrixError::InvalidSparse(e.to_string())
}

/// A sparse matrix in CSR format.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    inner: CsrMatrix<f64>,
}

impl SparseMatrix {
    /// Empty matrix with the given dimensions.
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self {
            inner: CsrMatrix::zeros(n_rows, n_cols),
        }
    }

    /// Create from raw CSR components, validating the structure.
    ///
    /// Column indices must be in range and strictly increasing within each row.
    pub fn from_csr(
        n_rows: usize,
        n_cols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<f64>,
    ) -> Result<Self, MatrixError> {
        let inner = CsrMatrix::try_from_csr_data(n_rows, n_cols, indptr, indices, data)
            .map_err(invalid)?;
        Ok(Self { inner })
    }

    /// Build from `(row, col, value)` triplets in any order.
    ///
    /// Duplicate coordinates are rejected rather than summed.
    pub fn from_triplets(
        n_rows: usize,
        n_cols: usize,
        triplets: Vec<(usize, usize, f64)>,
    ) -> Result<Self, MatrixError> {
        let mut triplets = triplets;
        triplets.sort_by_key(|&(r, c, _)| (r, c));
        if let Some(pair) = triplets
            .windows(2)
            .find(|pair| (pair[0].0, pair[0].1) == (pair[1].0, pair[1].1))
        {
            return Err(MatrixError::InvalidSparse(format!(
                "duplicate entry at ({}, {})",
                pair[0].0, pair[0].1
            )));
        }

        let mut row_indices = Vec::with_capacity(triplets.len());
        let mut col_indices = Vec::with_capacity(triplets.len());
        let mut values = Vec::with_capacity(triplets.len());
        for (row, col, value) in triplets {
            if row >= n_rows || col >= n_cols {
                return Err(MatrixError::IndexOutOfBounds {
                    row,
                    col,
                    n_rows,
                    n_cols,
                });
            }
            if is_stored(value) {
                row_indices.push(row);
                col_indices.push(col);
                values.push(value);
            }
        }

        let coo = CooMatrix::try_from_triplets(n_rows, n_cols, row_indices, col_indices, values)
            .map_err(invalid)?;
        Ok(Self {
            inner: CsrMatrix::from(&coo),
        })
    }

    /// Sparse copy of a dense matrix.
    pub fn from_dense(dense: &DenseMatrix) -> Self {
        let (n_rows, n_cols) = dense.shape();
        let mut coo = CooMatrix::new(n_rows, n_cols);
        for (row, col, value) in dense.iter() {
            if is_stored(value) {
                coo.push(row, col, value);
            }
        }
        Self {
            inner: CsrMatrix::from(&coo),
        }
    }

    /// Dense copy.
    ///
    /// # Panics
    ///
    /// If `n_rows * n_cols` overflows `usize`.
    pub fn to_dense(&self) -> DenseMatrix {
        let mut values = Array2::zeros(self.shape());
        for (row, col, &value) in self.inner.triplet_iter() {
            values[(row, col)] = value;
        }
        DenseMatrix::from(values)
    }

    /// (n_rows, n_cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.inner.nrows(), self.inner.ncols())
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.inner.nnz()
    }

    /// Value at `(row, col)`; `0.0` when not stored, `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        let (n_rows, n_cols) = self.shape();
        if row >= n_rows || col >= n_cols {
            return None;
        }
        let (cols, values) = self.row(row);
        match cols.binary_search(&col) {
            Ok(pos) => Some(values[pos]),
            Err(_) => Some(0.0),
        }
    }

    /// Column indices and values of one row. Panics when `row` is out of bounds.
    pub fn row(&self, row: usize) -> (&[usize], &[f64]) {
        let offsets = self.inner.row_offsets();
        let (start, end) = (offsets[row], offsets[row + 1]);
        (
            &self.inner.col_indices()[start..end],
            &self.inner.values()[start..end],
        )
    }

    /// Row pointer array.
    pub fn indptr(&self) -> &[usize] {
        self.inner.row_offsets()
    }

    /// Column index array.
    pub fn indices(&self) -> &[usize] {
        self.inner.col_indices()
    }

    /// Stored values.
    pub fn data(&self) -> &[f64] {
        self.inner.values()
    }

    /// Underlying CSR matrix.
    pub fn as_csr(&self) -> &CsrMatrix<f64> {
        &self.inner
    }

    /// Iterate stored entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.inner
            .triplet_iter()
            .map(|(row, col, &value)| (row, col, value))
    }

    /// Transposed copy, still in CSR (i.e. the CSC layout of `self`).
    pub fn transpose(&self) -> Self {
        Self {
            inner: self.inner.transpose(),
        }
    }
}

impl From<CsrMatrix<f64>> for SparseMatrix {
    fn from(inner: CsrMatrix<f64>) -> Self {
        Self { inner }
    }
}

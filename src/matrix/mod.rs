//! # Matrix Storage
//!
//! The primary numeric matrix of a dataset, held either dense (an
//! `ndarray::Array2`) or sparse (a `nalgebra_sparse::CsrMatrix`). Storage
//! kind is always an explicit choice: nothing in the crate switches
//! representation implicitly.
//!
//! ```
//! use scconvert::matrix::{MatrixData, StorageKind};
//!
//! let dense = MatrixData::from_rows(vec![vec![0.0, 2.0], vec![3.0, 0.0]]).unwrap();
//! let sparse = dense.clone().into_sparse();
//! assert_eq!(sparse.storage(), StorageKind::Sparse);
//! assert_eq!(sparse.nnz(), 2);
//! assert!(sparse.bitwise_eq(&dense));
//! ```

mod dense;
mod error;
mod sparse;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

pub use dense::DenseMatrix;
pub use error::MatrixError;
pub use sparse::SparseMatrix;

/// Storage representation of a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Every cell stored
    Dense,
    /// Only non-zero cells stored (CSR)
    Sparse,
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKind::Dense => write!(f, "dense"),
            StorageKind::Sparse => write!(f, "sparse"),
        }
    }
}

impl std::str::FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dense" => Ok(StorageKind::Dense),
            "sparse" | "csr" => Ok(StorageKind::Sparse),
            other => Err(format!("Unknown storage '{}'. Valid options: dense, sparse", other)),
        }
    }
}

/// The primary data matrix (n_obs × n_vars), dense or sparse.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixData {
    /// Dense storage
    Dense(DenseMatrix),
    /// CSR sparse storage
    Sparse(SparseMatrix),
}

impl MatrixData {
    /// Dense matrix from nested rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        Ok(MatrixData::Dense(DenseMatrix::from_rows(rows)?))
    }

    /// (n_rows, n_cols)
    pub fn shape(&self) -> (usize, usize) {
        match self {
            MatrixData::Dense(m) => m.shape(),
            MatrixData::Sparse(m) => m.shape(),
        }
    }

    /// Current storage kind.
    pub fn storage(&self) -> StorageKind {
        match self {
            MatrixData::Dense(_) => StorageKind::Dense,
            MatrixData::Sparse(_) => StorageKind::Sparse,
        }
    }

    /// Value at `(row, col)`, `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        match self {
            MatrixData::Dense(m) => m.get(row, col),
            MatrixData::Sparse(m) => m.get(row, col),
        }
    }

    /// Number of stored cells (all cells for dense storage).
    pub fn nnz(&self) -> usize {
        match self {
            MatrixData::Dense(m) => m.len(),
            MatrixData::Sparse(m) => m.nnz(),
        }
    }

    /// Iterate stored cells in row-major order.
    pub fn entries(&self) -> Box<dyn Iterator<Item = (usize, usize, f64)> + '_> {
        match self {
            MatrixData::Dense(m) => Box::new(m.iter()),
            MatrixData::Sparse(m) => Box::new(m.iter()),
        }
    }

    /// Convert to sparse storage. Values are kept bit-for-bit.
    pub fn into_sparse(self) -> Self {
        match self {
            MatrixData::Dense(m) => MatrixData::Sparse(SparseMatrix::from_dense(&m)),
            sparse @ MatrixData::Sparse(_) => sparse,
        }
    }

    /// Convert to dense storage. Values are kept bit-for-bit.
    pub fn into_dense(self) -> Self {
        match self {
            MatrixData::Sparse(m) => MatrixData::Dense(m.to_dense()),
            dense @ MatrixData::Dense(_) => dense,
        }
    }

    /// Convert to the requested storage kind.
    pub fn into_storage(self, kind: StorageKind) -> Self {
        match kind {
            StorageKind::Dense => self.into_dense(),
            StorageKind::Sparse => self.into_sparse(),
        }
    }

    /// Transposed copy with the same storage kind.
    pub fn transpose(&self) -> Self {
        match self {
            MatrixData::Dense(m) => MatrixData::Dense(m.transpose()),
            MatrixData::Sparse(m) => MatrixData::Sparse(m.transpose()),
        }
    }

    /// Compare every cell by bit pattern, independent of storage kind.
    ///
    /// Unlike `==`, NaN cells compare equal to themselves and `-0.0` differs from `0.0`.
    pub fn bitwise_eq(&self, other: &MatrixData) -> bool {
        let (n_rows, n_cols) = self.shape();
        if other.shape() != (n_rows, n_cols) {
            return false;
        }
        match (self, other) {
            (MatrixData::Dense(a), MatrixData::Dense(b)) => a
                .as_array()
                .iter()
                .zip(b.as_array().iter())
                .all(|(x, y)| x.to_bits() == y.to_bits()),
            _ => (0..n_rows).all(|r| {
                (0..n_cols).all(|c| {
                    let a = self.get(r, c).map(f64::to_bits);
                    let b = other.get(r, c).map(f64::to_bits);
                    a == b
                })
            }),
        }
    }
}

impl From<DenseMatrix> for MatrixData {
    fn from(m: DenseMatrix) -> Self {
        MatrixData::Dense(m)
    }
}

impl From<SparseMatrix> for MatrixData {
    fn from(m: SparseMatrix) -> Self {
        MatrixData::Sparse(m)
    }
}

use super::*;

fn sample_dense() -> DenseMatrix {
    DenseMatrix::from_rows(vec![
        vec![0.0, 1.5, 0.0, -0.0],
        vec![2.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, f64::NAN, 4.0],
    ])
    .unwrap()
}

#[test]
fn test_dense_shape_and_get() {
    let m = sample_dense();
    assert_eq!(m.shape(), (3, 4));
    assert_eq!(m.get(0, 1), Some(1.5));
    assert_eq!(m.get(3, 0), None);
    assert_eq!(m.row(1).to_vec(), vec![2.0, 0.0, 0.0, 0.0]);
}

#[test]
fn test_dense_rejects_bad_shape() {
    let err = DenseMatrix::new(2, 2, vec![1.0; 3]).unwrap_err();
    assert!(matches!(err, MatrixError::ShapeMismatch { expected: 4, found: 3, .. }));

    let err = DenseMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
    assert!(matches!(err, MatrixError::RaggedRows { row: 1, .. }));
}

#[test]
fn test_dense_shape_overflow_is_an_error() {
    let err = DenseMatrix::zeros(usize::MAX, 2).unwrap_err();
    assert_eq!(
        err,
        MatrixError::ShapeOverflow {
            n_rows: usize::MAX,
            n_cols: 2
        }
    );
    assert!(matches!(
        DenseMatrix::new(usize::MAX / 2, 3, vec![0.0; 4]).unwrap_err(),
        MatrixError::ShapeOverflow { .. }
    ));
    assert!(DenseMatrix::zeros(0, 5).unwrap().is_empty());
    assert!(DenseMatrix::zeros(0, usize::MAX).is_err());
}

#[test]
fn test_dense_set_out_of_bounds() {
    let mut m = DenseMatrix::zeros(2, 2).unwrap();
    m.set(1, 1, 7.0).unwrap();
    assert_eq!(m.get(1, 1), Some(7.0));
    assert!(m.set(2, 0, 1.0).is_err());
}

#[test]
fn test_sparse_from_dense_keeps_negative_zero_and_nan() {
    let sparse = SparseMatrix::from_dense(&sample_dense());
    // 1.5, -0.0, 2.0, NaN, 4.0
    assert_eq!(sparse.nnz(), 5);
    assert_eq!(sparse.indptr(), &[0, 2, 3, 5]);
    assert_eq!(sparse.get(0, 3).unwrap().to_bits(), (-0.0f64).to_bits());
    assert!(sparse.get(2, 2).unwrap().is_nan());
    assert_eq!(sparse.get(1, 1), Some(0.0));
}

#[test]
fn test_sparse_dense_roundtrip_is_bitwise() {
    let dense = MatrixData::Dense(sample_dense());
    let back = dense.clone().into_sparse().into_dense();
    assert!(back.bitwise_eq(&dense));
    assert_eq!(back.storage(), StorageKind::Dense);
}

#[test]
fn test_sparse_from_csr_validation() {
    assert!(SparseMatrix::from_csr(2, 3, vec![0, 1, 2], vec![0, 2], vec![1.0, 2.0]).is_ok());

    // indptr too short
    assert!(SparseMatrix::from_csr(2, 3, vec![0, 1], vec![0], vec![1.0]).is_err());
    // column out of range
    let err = SparseMatrix::from_csr(1, 2, vec![0, 1], vec![5], vec![1.0]).unwrap_err();
    assert!(matches!(err, MatrixError::InvalidSparse(_)));
    // unsorted columns
    assert!(SparseMatrix::from_csr(1, 3, vec![0, 2], vec![2, 1], vec![1.0, 2.0]).is_err());
    // indptr does not cover data
    assert!(SparseMatrix::from_csr(1, 3, vec![0, 1], vec![0, 1], vec![1.0, 2.0]).is_err());
}

#[test]
fn test_sparse_from_triplets() {
    let m = SparseMatrix::from_triplets(3, 3, vec![(2, 1, 5.0), (0, 2, 1.0), (0, 0, 3.0)]).unwrap();
    assert_eq!(m.nnz(), 3);
    assert_eq!(m.indices(), &[0, 2, 1]);
    assert_eq!(m.get(2, 1), Some(5.0));

    let dup = SparseMatrix::from_triplets(2, 2, vec![(0, 0, 1.0), (0, 0, 2.0)]);
    assert!(dup.is_err());

    let err = SparseMatrix::from_triplets(2, 2, vec![(0, 2, 1.0)]).unwrap_err();
    assert!(matches!(err, MatrixError::IndexOutOfBounds { col: 2, .. }));

    // Explicit +0.0 is dropped; -0.0 is kept.
    let m = SparseMatrix::from_triplets(1, 3, vec![(0, 0, 0.0), (0, 2, -0.0)]).unwrap();
    assert_eq!(m.nnz(), 1);
    assert_eq!(m.get(0, 2).unwrap().to_bits(), (-0.0f64).to_bits());
    assert_eq!(m.as_csr().nnz(), 1);
}

#[test]
fn test_transpose_dense_and_sparse_agree() {
    let dense = MatrixData::Dense(sample_dense());
    let sparse = dense.clone().into_sparse();

    let dt = dense.transpose();
    let st = sparse.transpose();

    assert_eq!(dt.shape(), (4, 3));
    assert_eq!(st.shape(), (4, 3));
    assert_eq!(st.storage(), StorageKind::Sparse);
    assert!(dt.bitwise_eq(&st));
    assert_eq!(dt.get(1, 0), Some(1.5));
    assert!(dt.transpose().bitwise_eq(&dense));
}

#[test]
fn test_entries_row_major() {
    let sparse = MatrixData::Dense(sample_dense()).into_sparse();
    let coords: Vec<(usize, usize)> = sparse.entries().map(|(r, c, _)| (r, c)).collect();
    assert_eq!(coords, vec![(0, 1), (0, 3), (1, 0), (2, 2), (2, 3)]);

    let dense = MatrixData::Dense(DenseMatrix::zeros(2, 3).unwrap());
    assert_eq!(dense.entries().count(), 6);
}

#[test]
fn test_bitwise_eq_distinguishes_signed_zero() {
    let a = MatrixData::from_rows(vec![vec![0.0]]).unwrap();
    let b = MatrixData::from_rows(vec![vec![-0.0]]).unwrap();
    assert_eq!(a, b);
    assert!(!a.bitwise_eq(&b));
}

#[test]
fn test_storage_kind_parse() {
    assert_eq!("Sparse".parse::<StorageKind>().unwrap(), StorageKind::Sparse);
    assert_eq!("dense".parse::<StorageKind>().unwrap(), StorageKind::Dense);
    assert!("coo".parse::<StorageKind>().is_err());
    assert_eq!(serde_json::to_string(&StorageKind::Sparse).unwrap(), "\"sparse\"");
}

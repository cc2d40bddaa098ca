use super::*;
use crate::matrix::{DenseMatrix, MatrixData, StorageKind};

fn names(prefix: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{}{}", prefix, i)).collect()
}

fn small_dataset() -> AnnotatedDataset {
    let matrix = MatrixData::from_rows(vec![
        vec![0.0, 1.0, 0.0],
        vec![2.5, 0.0, -0.0],
        vec![0.0, 0.0, 7.0],
        vec![1.0, 1.0, 1.0],
    ])
    .unwrap();
    let mut dataset = AnnotatedDataset::new(matrix, names("cell_", 4), names("gene_", 3)).unwrap();
    dataset
        .add_obs("Source.Name", AttributeValues::from(vec!["a", "a", "b", "c"]))
        .unwrap();
    dataset
        .add_obs("n counts", AttributeValues::from(vec![1.0, 2.5, 7.0, 3.0]))
        .unwrap();
    dataset
        .add_var("highly_variable", AttributeValues::from(vec![true, false, true]))
        .unwrap();
    dataset
}

#[test]
fn test_new_rejects_length_mismatch() {
    let matrix = MatrixData::Dense(DenseMatrix::zeros(2, 3).unwrap());
    let err = AnnotatedDataset::new(matrix, names("c", 3), names("g", 3)).unwrap_err();
    assert_eq!(
        err,
        DatasetError::LengthMismatch {
            axis: Axis::Obs,
            what: "identifiers".to_string(),
            expected: 2,
            found: 3,
        }
    );
}

#[test]
fn test_new_rejects_duplicate_identifier() {
    let matrix = MatrixData::Dense(DenseMatrix::zeros(2, 2).unwrap());
    let err = AnnotatedDataset::new(
        matrix,
        names("c", 2),
        vec!["GeneA".to_string(), "GeneA".to_string()],
    )
    .unwrap_err();
    assert!(matches!(err, DatasetError::DuplicateIdentifier { axis: Axis::Var, .. }));
}

#[test]
fn test_add_attribute_checks() {
    let mut dataset = small_dataset();
    let err = dataset
        .add_obs("short", AttributeValues::from(vec![1i64, 2]))
        .unwrap_err();
    assert!(matches!(err, DatasetError::LengthMismatch { axis: Axis::Obs, .. }));

    let err = dataset
        .add_var("highly_variable", AttributeValues::from(vec![false, false, false]))
        .unwrap_err();
    assert!(matches!(err, DatasetError::DuplicateAttribute { .. }));

    let bad = AttributeValues::Categorical {
        codes: vec![0, 1, 2],
        categories: vec!["x".to_string(), "y".to_string()],
    };
    let err = dataset.add_var("cluster", bad).unwrap_err();
    assert!(matches!(err, DatasetError::InvalidCategoryCode { code: 2, .. }));

    let missing = AttributeValues::Categorical {
        codes: vec![0, -1, 1],
        categories: vec!["x".to_string(), "y".to_string()],
    };
    dataset.add_var("cluster", missing).unwrap();
    assert_eq!(dataset.var().len(), 2);
}

#[test]
fn test_normalize_observation_attribute_names() {
    let dataset = small_dataset();
    let before = dataset.obs().values().cloned().collect::<Vec<_>>();

    let normalized = dataset.normalize_observation_attribute_names().unwrap();
    let keys: Vec<&str> = normalized.obs().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["source_name", "n_counts"]);
    let after = normalized.obs().values().cloned().collect::<Vec<_>>();
    assert_eq!(before, after);

    let twice = normalized.clone().normalize_observation_attribute_names().unwrap();
    assert_eq!(twice, normalized);
}

#[test]
fn test_normalize_observation_attribute_names_collision() {
    let mut dataset = small_dataset();
    dataset
        .add_obs("source name", AttributeValues::from(vec!["1", "2", "3", "4"]))
        .unwrap();
    let err = dataset.normalize_observation_attribute_names().unwrap_err();
    assert_eq!(
        err,
        DatasetError::DuplicateAttribute {
            axis: Axis::Obs,
            name: "source_name".to_string(),
        }
    );
}

#[test]
fn test_coerce_storage_roundtrip() {
    let dataset = small_dataset();
    let sparse = dataset.clone().coerce_matrix_sparse();
    assert_eq!(sparse.storage(), StorageKind::Sparse);
    assert_eq!(sparse.matrix().nnz(), 7);
    assert_eq!(sparse.obs(), dataset.obs());

    let dense = sparse.coerce_matrix_dense();
    assert_eq!(dense.storage(), StorageKind::Dense);
    assert!(dense.matrix().bitwise_eq(dataset.matrix()));
}

#[test]
fn test_rename_matrix() {
    let dataset = small_dataset().rename_matrix("X").unwrap();
    let renamed = dataset.clone().rename_matrix("counts").unwrap();
    assert_eq!(renamed.matrix_name(), Some("counts"));
    assert!(renamed.matrix().bitwise_eq(dataset.matrix()));

    assert_eq!(
        dataset.rename_matrix("  ").unwrap_err(),
        DatasetError::EmptyMatrixName
    );
}

#[test]
fn test_normalize_feature_ids() {
    let matrix = MatrixData::Dense(DenseMatrix::zeros(1, 3).unwrap());
    let mut dataset =
        AnnotatedDataset::new(matrix, names("c", 1), positional_names(3)).unwrap();
    dataset
        .add_var("mean", AttributeValues::from(vec![0.1, 0.2, 0.3]))
        .unwrap();
    dataset
        .add_var(ROWNAMES_ATTRIBUTE, AttributeValues::from(vec!["TP53", "GAPDH", "ACTB"]))
        .unwrap();
    assert!(dataset.has_feature_id_quirk());

    let fixed = dataset.normalize_feature_ids().unwrap();
    assert!(!fixed.has_feature_id_quirk());
    assert_eq!(fixed.var_names(), &["TP53", "GAPDH", "ACTB"]);
    let keys: Vec<&str> = fixed.var().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["mean", FEATURE_ID_ATTRIBUTE]);

    // Nothing left to move.
    let again = fixed.clone().normalize_feature_ids().unwrap();
    assert_eq!(again, fixed);
}

#[test]
fn test_normalize_feature_ids_keeps_real_identifiers() {
    let mut dataset = small_dataset();
    dataset
        .add_var(ROWNAMES_ATTRIBUTE, AttributeValues::from(vec!["x", "y", "z"]))
        .unwrap();
    assert!(!dataset.has_feature_id_quirk());

    let unchanged = dataset.clone().normalize_feature_ids().unwrap();
    assert_eq!(unchanged.var_names(), &["gene_0", "gene_1", "gene_2"]);
    assert!(unchanged.var().contains_key(ROWNAMES_ATTRIBUTE));
    assert_eq!(unchanged, dataset);
}

#[test]
fn test_normalize_feature_ids_rejects_bad_rownames() {
    let matrix = MatrixData::Dense(DenseMatrix::zeros(1, 2).unwrap());
    let mut dataset =
        AnnotatedDataset::new(matrix.clone(), names("c", 1), positional_names(2)).unwrap();
    dataset
        .add_var(ROWNAMES_ATTRIBUTE, AttributeValues::from(vec![1i64, 2]))
        .unwrap();
    assert!(matches!(
        dataset.normalize_feature_ids().unwrap_err(),
        DatasetError::InvalidAttribute { .. }
    ));

    let mut dataset = AnnotatedDataset::new(matrix, names("c", 1), positional_names(2)).unwrap();
    dataset
        .add_var(ROWNAMES_ATTRIBUTE, AttributeValues::from(vec!["A", "A"]))
        .unwrap();
    assert!(matches!(
        dataset.normalize_feature_ids().unwrap_err(),
        DatasetError::DuplicateIdentifier { axis: Axis::Var, .. }
    ));
}

#[test]
fn test_categorical_from_labels() {
    let values = AttributeValues::categorical_from_labels(["b", "a", "b", "c"]);
    assert_eq!(
        values,
        AttributeValues::Categorical {
            codes: vec![0, 1, 0, 2],
            categories: vec!["b".to_string(), "a".to_string(), "c".to_string()],
        }
    );
    assert_eq!(values.kind(), AttributeKind::Categorical);
}

#[test]
fn test_parts_roundtrip() {
    let dataset = small_dataset().rename_matrix("counts").unwrap();
    let parts = dataset.clone().into_parts();
    assert_eq!(AnnotatedDataset::from_parts(parts).unwrap(), dataset);
}

//! End-to-end conversion scenarios: export, import, normalize, bridge.

use scconvert::bridge::{bridge_convert, dataset_to_observation_major, observation_major_to_dataset, Direction};
use scconvert::convert::{self, ConversionSteps};
use scconvert::dataset::{AnnotatedDataset, AttributeValues, FEATURE_ID_ATTRIBUTE, ROWNAMES_ATTRIBUTE};
use scconvert::matrix::{MatrixData, SparseMatrix, StorageKind};
use scconvert::metadata::{annotate_observations, SampleSheet};
use scconvert::reader::{import_with_options, ImportOptions};
use scconvert::schema::IndexLayout;
use scconvert::writer::{export_with_config, WriterConfig};
use tempfile::tempdir;

/// Sparse counts shaped like a typical droplet experiment.
fn droplet_dataset(n_obs: usize, n_vars: usize) -> AnnotatedDataset {
    let mut triplets = Vec::new();
    for row in 0..n_obs {
        // ~0.5% of genes detected per cell, spread over the whole gene range
        for k in 0..(n_vars / 200) {
            let col = (row * 7919 + k * 211) % n_vars;
            triplets.push((row, col, ((row + k) % 17 + 1) as f64));
        }
    }
    triplets.sort_by_key(|&(r, c, _)| (r, c));
    triplets.dedup_by_key(|t| (t.0, t.1));
    let matrix = SparseMatrix::from_triplets(n_obs, n_vars, triplets).unwrap();

    let mut dataset = AnnotatedDataset::new(
        MatrixData::Sparse(matrix),
        (0..n_obs).map(|i| format!("CELL{:05}-1", i)).collect(),
        (0..n_vars).map(|j| format!("ENSG{:011}", j)).collect(),
    )
    .unwrap();
    let sources: Vec<String> = (0..n_obs).map(|i| format!("run{}", i % 3)).collect();
    dataset
        .add_obs("Source.Name", AttributeValues::Strings(sources))
        .unwrap();
    dataset
}

#[test]
fn test_large_sparse_roundtrip_with_normalized_names() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pbmc.scmat");
    let original = droplet_dataset(192, 46604);
    assert_eq!(original.storage(), StorageKind::Sparse);

    convert::export(&original, &path).unwrap();
    let imported = convert::import(&path).unwrap();
    assert_eq!(imported.shape(), (192, 46604));
    assert_eq!(imported.storage(), StorageKind::Sparse);
    assert!(imported.matrix().bitwise_eq(original.matrix()));
    assert_eq!(imported.var_names(), original.var_names());

    let normalized = convert::normalize_observation_attribute_names(imported).unwrap();
    let keys: Vec<&str> = normalized.obs().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["source_name"]);
    assert_eq!(
        normalized.obs().get("source_name"),
        original.obs().get("Source.Name")
    );
}

#[test]
fn test_rename_matrix_keeps_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("renamed.scmat");
    let original = droplet_dataset(12, 400);
    let renamed = convert::rename_matrix(original.clone(), "counts").unwrap();
    assert_eq!(renamed.matrix_name(), Some("counts"));
    assert!(renamed.matrix().bitwise_eq(original.matrix()));

    convert::export(&renamed, &path).unwrap();
    let back = convert::import(&path).unwrap();
    assert_eq!(back.matrix_name(), Some("counts"));
    assert!(back.matrix().bitwise_eq(original.matrix()));
}

#[test]
fn test_foreign_layout_then_repair() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("foreign.scmat");
    let original = droplet_dataset(8, 400);
    let config = WriterConfig::default().with_index_layout(IndexLayout::Attribute);
    export_with_config(&original, &path, &config).unwrap();

    // Plain import exhibits the quirk exactly
    let quirky = convert::import(&path).unwrap();
    assert!(quirky.has_feature_id_quirk());
    let expected: Vec<String> = (0..400).map(|j| j.to_string()).collect();
    assert_eq!(quirky.var_names(), expected.as_slice());
    assert_eq!(
        quirky.var().get(ROWNAMES_ATTRIBUTE),
        Some(&AttributeValues::Strings(original.var_names().to_vec()))
    );

    // Explicit repair
    let repaired = convert::normalize_feature_ids(quirky).unwrap();
    assert_eq!(repaired.var_names(), original.var_names());
    assert!(repaired.var().contains_key(FEATURE_ID_ATTRIBUTE));

    // Repair during import gives the same result
    let options = ImportOptions::default().with_fix_feature_ids(true);
    assert_eq!(import_with_options(&path, &options).unwrap(), repaired);
}

#[test]
fn test_full_pipeline_through_bridge() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.scmat");
    let sheet_path = dir.path().join("samples.tsv");
    let output = dir.path().join("output.scmat");

    let original = droplet_dataset(4, 400).coerce_matrix_dense();
    convert::export(&original, &input).unwrap();
    std::fs::write(
        &sheet_path,
        "barcode\tCell Type\nCELL00000-1\tT\nCELL00001-1\tB\nCELL00002-1\tNK\nCELL00003-1\tT\n",
    )
    .unwrap();

    let dataset = convert::import(&input).unwrap();
    let sheet = SampleSheet::from_path(&sheet_path).unwrap();
    let dataset = annotate_observations(dataset, &sheet, "barcode", false).unwrap();

    let steps = ConversionSteps {
        normalize_obs_names: true,
        fix_feature_ids: true,
        matrix_name: Some("counts".into()),
        storage: Some(StorageKind::Sparse),
    };
    let dataset = steps.apply(dataset).unwrap();

    // Across the bridge and back
    let sce = bridge_convert(dataset_to_observation_major(dataset.clone()), Direction::ToFeatureMajor).unwrap();
    let back = observation_major_to_dataset(
        bridge_convert(sce, Direction::ToObservationMajor).unwrap(),
    )
    .unwrap();
    assert_eq!(back, dataset);

    convert::export(&back, &output).unwrap();
    let last = convert::import(&output).unwrap();
    assert_eq!(last.storage(), StorageKind::Sparse);
    assert_eq!(last.matrix_name(), Some("counts"));
    assert!(last.obs().contains_key("cell_type"));
    assert!(last.obs().contains_key("source_name"));
    assert!(last.coerce_matrix_dense().matrix().bitwise_eq(original.matrix()));
}

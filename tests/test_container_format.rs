//! Integration tests for the .scmat ZIP container format
//!
//! These tests verify:
//! 1. Container creation with proper structure
//! 2. MimeType compliance (first entry, uncompressed)
//! 3. Parquet entries stored uncompressed in the ZIP
//! 4. Manifest contents and validator agreement

use scconvert::dataset::{AnnotatedDataset, AttributeValues};
use scconvert::matrix::{MatrixData, StorageKind};
use scconvert::reader::ContainerReader;
use scconvert::schema::{
    IndexLayout, Manifest, MANIFEST_ENTRY, MATRIX_ENTRY, OBS_ENTRY, SCCONVERT_MIMETYPE, VAR_ENTRY,
};
use scconvert::validator::validate_container;
use scconvert::writer::{export, export_with_config, CompressionType, WriterConfig};
use std::fs::File;
use std::io::Read;
use tempfile::tempdir;
use zip::ZipArchive;

fn make_dataset(n_obs: usize, n_vars: usize) -> AnnotatedDataset {
    let rows = (0..n_obs)
        .map(|i| {
            (0..n_vars)
                .map(|j| if (i + j) % 3 == 0 { (i * n_vars + j) as f64 } else { 0.0 })
                .collect()
        })
        .collect();
    let matrix = MatrixData::from_rows(rows).unwrap();
    let mut dataset = AnnotatedDataset::new(
        matrix,
        (0..n_obs).map(|i| format!("cell{}", i)).collect(),
        (0..n_vars).map(|j| format!("gene{}", j)).collect(),
    )
    .unwrap();
    dataset
        .add_obs(
            "Source.Name",
            AttributeValues::from((0..n_obs).map(|i| format!("s{}", i % 2)).collect::<Vec<_>>()),
        )
        .unwrap();
    dataset
        .add_var("mean", AttributeValues::from(vec![1.5; n_vars]))
        .unwrap();
    dataset
}

#[test]
fn test_container_format_creation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.scmat");

    let stats = export(&make_dataset(10, 8), &path).unwrap();

    assert!(stats.file_size_bytes > 0);
    assert_eq!(stats.n_obs, 10);
    assert_eq!(stats.n_vars, 8);
    assert_eq!(stats.entries_written, 80);
    assert!(path.is_file());
}

#[test]
fn test_container_mimetype_compliance() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mimetype_test.scmat");
    export(&make_dataset(3, 3), &path).unwrap();

    let mut archive = ZipArchive::new(File::open(&path).unwrap()).unwrap();

    let mut first = archive.by_index(0).unwrap();
    assert_eq!(first.name(), "mimetype");
    assert_eq!(first.compression(), zip::CompressionMethod::Stored);
    let mut content = String::new();
    first.read_to_string(&mut content).unwrap();
    assert_eq!(content, SCCONVERT_MIMETYPE);
}

#[test]
fn test_container_parquet_entries_are_stored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stored.scmat");
    export(&make_dataset(4, 5).coerce_matrix_sparse(), &path).unwrap();

    let mut archive = ZipArchive::new(File::open(&path).unwrap()).unwrap();
    for name in [MATRIX_ENTRY, OBS_ENTRY, VAR_ENTRY] {
        let entry = archive.by_name(name).unwrap();
        assert_eq!(
            entry.compression(),
            zip::CompressionMethod::Stored,
            "{} must be stored",
            name
        );
    }
    let manifest = archive.by_name(MANIFEST_ENTRY).unwrap();
    assert_eq!(manifest.compression(), zip::CompressionMethod::Deflated);
}

#[test]
fn test_manifest_describes_dataset() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("manifest.scmat");
    let dataset = make_dataset(6, 4).coerce_matrix_sparse().rename_matrix("counts").unwrap();
    export(&dataset, &path).unwrap();

    let mut archive = ZipArchive::new(File::open(&path).unwrap()).unwrap();
    let mut json = String::new();
    archive
        .by_name(MANIFEST_ENTRY)
        .unwrap()
        .read_to_string(&mut json)
        .unwrap();
    let manifest: Manifest = serde_json::from_str(&json).unwrap();

    assert_eq!(manifest.n_obs, 6);
    assert_eq!(manifest.n_vars, 4);
    assert_eq!(manifest.storage, StorageKind::Sparse);
    assert_eq!(manifest.nnz as usize, dataset.matrix().nnz());
    assert_eq!(manifest.matrix_name.as_deref(), Some("counts"));
    assert_eq!(manifest.index_layout, IndexLayout::Dedicated);
    assert_eq!(manifest.obs_columns.len(), 1);
    assert_eq!(manifest.obs_columns[0].name, "Source.Name");
    assert_eq!(manifest.obs_columns[0].column, "attr_0000");
    assert!(manifest.converter.starts_with("scconvert v"));

    let reader = ContainerReader::open(&path).unwrap();
    assert_eq!(reader.manifest().dataset_id, manifest.dataset_id);
}

#[test]
fn test_every_profile_validates() {
    let dir = tempdir().unwrap();
    let configs = [
        WriterConfig::fast_write(),
        WriterConfig::balanced(),
        WriterConfig::max_compression(),
        WriterConfig {
            compression: CompressionType::Uncompressed,
            write_statistics: false,
            use_byte_stream_split: false,
            ..WriterConfig::default()
        },
    ];
    for (i, config) in configs.iter().enumerate() {
        let path = dir.path().join(format!("profile{}.scmat", i));
        export_with_config(&make_dataset(5, 7), &path, config).unwrap();
        let report = validate_container(&path).unwrap();
        assert!(!report.has_failures(), "{}", report);
    }
}

#[test]
fn test_overwrite_replaces_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("overwrite.scmat");
    std::fs::write(&path, b"stale content").unwrap();

    export(&make_dataset(2, 2), &path).unwrap();

    let reader = ContainerReader::open(&path).unwrap();
    assert_eq!(reader.manifest().n_obs, 2);
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path() != path)
        .collect();
    assert!(leftovers.is_empty());
}

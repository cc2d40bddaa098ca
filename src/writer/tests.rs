use super::*;
use crate::dataset::{AnnotatedDataset, AttributeValues};
use crate::matrix::MatrixData;
use crate::schema::SCCONVERT_MIMETYPE;
use std::fs::File;
use std::io::Read;
use tempfile::tempdir;
use zip::ZipArchive;

fn dataset() -> AnnotatedDataset {
    let matrix = MatrixData::from_rows(vec![vec![0.0, 1.0], vec![3.5, 0.0], vec![0.0, 0.0]])
        .unwrap()
        .into_sparse();
    let mut dataset = AnnotatedDataset::new(
        matrix,
        vec!["c1".into(), "c2".into(), "c3".into()],
        vec!["TP53".into(), "ACTB".into()],
    )
    .unwrap();
    dataset
        .add_obs("batch", AttributeValues::categorical_from_labels(["a", "b", "a"]))
        .unwrap();
    dataset
        .add_var("mean", AttributeValues::from(vec![0.5, 0.25]))
        .unwrap();
    dataset
}

#[test]
fn test_writer_config_presets() {
    assert_eq!(WriterConfig::fast_write().compression, CompressionType::Snappy);
    assert_eq!(
        WriterConfig::max_compression().compression,
        CompressionType::Zstd(22)
    );
    assert_eq!(WriterConfig::balanced(), WriterConfig::default());
    assert_eq!(
        WriterConfig::default()
            .with_index_layout(IndexLayout::Attribute)
            .index_layout,
        IndexLayout::Attribute
    );
}

#[test]
fn test_export_writes_container_entries() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("out.scmat");

    let stats = export(&dataset(), &path)?;
    assert_eq!(stats.n_obs, 3);
    assert_eq!(stats.n_vars, 2);
    assert_eq!(stats.entries_written, 2);
    assert!(stats.file_size_bytes > 0);

    let mut archive = ZipArchive::new(File::open(&path)?)?;
    {
        let mut first = archive.by_index(0)?;
        assert_eq!(first.name(), "mimetype");
        assert_eq!(first.compression(), zip::CompressionMethod::Stored);
        let mut content = String::new();
        first.read_to_string(&mut content)?;
        assert_eq!(content, SCCONVERT_MIMETYPE);
    }
    for entry in [MATRIX_ENTRY, OBS_ENTRY, VAR_ENTRY] {
        let file = archive.by_name(entry)?;
        assert_eq!(file.compression(), zip::CompressionMethod::Stored);
    }

    let manifest: Manifest = serde_json::from_reader(archive.by_name(MANIFEST_ENTRY)?)?;
    assert_eq!(manifest.n_obs, 3);
    assert_eq!(manifest.nnz, 2);
    assert_eq!(manifest.obs_columns[0].name, "batch");
    assert_eq!(
        manifest.obs_columns[0].categories,
        Some(vec!["a".to_string(), "b".to_string()])
    );
    Ok(())
}

#[test]
fn test_failed_export_keeps_existing_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("keep.scmat");
    export(&dataset(), &path)?;
    let before = std::fs::read(&path)?;

    // 'rownames' collides with the attribute index layout
    let mut clashing = dataset();
    clashing.add_var("rownames", AttributeValues::from(vec!["x", "y"]))?;
    let config = WriterConfig::default().with_index_layout(IndexLayout::Attribute);
    let err = export_with_config(&clashing, &path, &config).unwrap_err();
    assert!(matches!(err, WriterError::InvalidData(_)));

    assert_eq!(std::fs::read(&path)?, before);
    let leftovers = std::fs::read_dir(dir.path())?.count();
    assert_eq!(leftovers, 1);
    Ok(())
}

#[test]
fn test_export_to_directory_path_fails_cleanly() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let target = dir.path().join("occupied");
    std::fs::create_dir(&target)?;

    let err = export(&dataset(), &target).unwrap_err();
    assert!(matches!(err, WriterError::IoError(_)));
    assert!(target.is_dir());
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}

#[test]
fn test_export_creates_parent_directories() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("nested").join("deeper").join("out.scmat");
    export(&dataset(), &path)?;
    assert!(path.is_file());
    Ok(())
}

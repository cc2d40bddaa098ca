//! # Container Writer Module
//!
//! Exports an [`AnnotatedDataset`] to a single `.scmat` container.
//!
//! ## Design Principles
//!
//! 1. **Atomic Output**: The container is assembled in a temporary file in the
//!    destination directory and renamed over the destination only once it is
//!    complete. A failed export never leaves a partial file behind.
//!
//! 2. **Bit-Exact Values**: Matrix values and float attributes are stored as
//!    Parquet DOUBLE, so every bit pattern (including `-0.0` and NaN payloads)
//!    survives.
//!
//! 3. **Self-Describing**: The manifest records shape, storage, matrix tag and
//!    attribute descriptors; every Parquet footer records its table and the
//!    format version.
//!
//! 4. **Configurable Compression**: Supports ZSTD (default), Snappy, and uncompressed.

mod config;
mod container;
mod error;
mod stats;
mod tables;

#[cfg(test)]
mod tests;

use std::path::Path;

use log::info;

pub use config::{CompressionType, WriterConfig};
pub use container::ContainerWriter;
pub use error::WriterError;
pub use stats::ExportStats;

use crate::dataset::{AnnotatedDataset, AttributeTable, AttributeValues, ROWNAMES_ATTRIBUTE};
use crate::schema::{IndexLayout, Manifest, MANIFEST_ENTRY, MATRIX_ENTRY, OBS_ENTRY, VAR_ENTRY};

/// Export a dataset to `path` with the default configuration.
///
/// Creates or atomically replaces the file at `path`.
pub fn export<P: AsRef<Path>>(
    dataset: &AnnotatedDataset,
    path: P,
) -> Result<ExportStats, WriterError> {
    export_with_config(dataset, path, &WriterConfig::default())
}

/// Export a dataset to `path` with a custom configuration.
pub fn export_with_config<P: AsRef<Path>>(
    dataset: &AnnotatedDataset,
    path: P,
    config: &WriterConfig,
) -> Result<ExportStats, WriterError> {
    let path = path.as_ref();
    dataset.validate()?;
    tables::check_index_range(dataset.matrix())?;

    let var_table = var_table_for_layout(dataset, config.index_layout)?;
    let obs_columns = tables::describe_attributes(dataset.obs());
    let var_columns = tables::describe_attributes(&var_table);

    let (n_obs, n_vars) = dataset.shape();
    let mut manifest = Manifest::new(
        n_obs as u64,
        n_vars as u64,
        dataset.storage(),
        dataset.matrix().nnz() as u64,
        config.index_layout,
        chrono::Utc::now().to_rfc3339(),
        format!("scconvert v{}", env!("CARGO_PKG_VERSION")),
    );
    manifest.matrix_name = dataset.matrix_name().map(str::to_string);
    manifest.obs_columns = obs_columns;
    manifest.var_columns = var_columns;

    info!(
        "Exporting {}x{} {} matrix to {}",
        n_obs,
        n_vars,
        dataset.storage(),
        path.display()
    );

    let mut container = ContainerWriter::create(path)?;
    container.add_json(MANIFEST_ENTRY, &manifest)?;

    let (matrix_bytes, entries_written) = tables::encode_matrix(dataset.matrix(), config)?;
    container.add_parquet(MATRIX_ENTRY, &matrix_bytes)?;

    let obs_bytes = tables::encode_attributes(
        "obs",
        Some(dataset.obs_names()),
        dataset.obs(),
        &manifest.obs_columns,
        config,
    )?;
    container.add_parquet(OBS_ENTRY, &obs_bytes)?;

    let var_index = match config.index_layout {
        IndexLayout::Dedicated => Some(dataset.var_names()),
        IndexLayout::Attribute => None,
    };
    let var_bytes = tables::encode_attributes(
        "var",
        var_index,
        &var_table,
        &manifest.var_columns,
        config,
    )?;
    container.add_parquet(VAR_ENTRY, &var_bytes)?;

    let file_size_bytes = container.finish()?;
    let stats = ExportStats {
        n_obs,
        n_vars,
        entries_written,
        storage: dataset.storage(),
        matrix_bytes: matrix_bytes.len() as u64,
        file_size_bytes,
    };
    info!("{}", stats);
    Ok(stats)
}

/// Variable attribute table as stored for the given index layout.
///
/// The attribute layout stores the identifiers as a leading `rownames`
/// attribute instead of an `_index` column.
fn var_table_for_layout(
    dataset: &AnnotatedDataset,
    layout: IndexLayout,
) -> Result<AttributeTable, WriterError> {
    match layout {
        IndexLayout::Dedicated => Ok(dataset.var().clone()),
        IndexLayout::Attribute => {
            if dataset.var().contains_key(ROWNAMES_ATTRIBUTE) {
                return Err(WriterError::InvalidData(format!(
                    "variable attribute '{}' is reserved by the attribute index layout",
                    ROWNAMES_ATTRIBUTE
                )));
            }
            let mut table = AttributeTable::with_capacity(dataset.var().len() + 1);
            table.insert(
                ROWNAMES_ATTRIBUTE.to_string(),
                AttributeValues::Strings(dataset.var_names().to_vec()),
            );
            table.extend(
                dataset
                    .var()
                    .iter()
                    .map(|(name, values)| (name.clone(), values.clone())),
            );
            Ok(table)
        }
    }
}

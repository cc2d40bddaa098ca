//! The Dataset Converter as free functions.
//!
//! Each operation takes a dataset (or path) by value and returns a new one;
//! nothing is retained between calls. [`ConversionSteps`] chains the in-memory
//! operations in a fixed order for batch use, such as the `convert` command.

use std::path::Path;

use log::info;

use crate::bridge::{self, BridgeValue, ConversionError, Direction};
use crate::dataset::{AnnotatedDataset, DatasetError};
use crate::matrix::StorageKind;
use crate::reader::{self, ReaderError};
use crate::writer::{self, ExportStats, WriterError};

/// Write `dataset` to a container at `path`, replacing any existing file.
pub fn export<P: AsRef<Path>>(dataset: &AnnotatedDataset, path: P) -> Result<ExportStats, WriterError> {
    writer::export(dataset, path)
}

/// Read a dataset back from a container.
pub fn import<P: AsRef<Path>>(path: P) -> Result<AnnotatedDataset, ReaderError> {
    reader::import(path)
}

/// Convert a boundary record to the other ecosystem's representation.
pub fn bridge_convert(value: BridgeValue, direction: Direction) -> Result<BridgeValue, ConversionError> {
    bridge::bridge_convert(value, direction)
}

/// Normalize observation attribute names: trim, lowercase, `' '` and `'.'` to `'_'`.
pub fn normalize_observation_attribute_names(
    dataset: AnnotatedDataset,
) -> Result<AnnotatedDataset, DatasetError> {
    dataset.normalize_observation_attribute_names()
}

/// Store the matrix sparsely. Values are kept bit-for-bit.
pub fn coerce_matrix_sparse(dataset: AnnotatedDataset) -> AnnotatedDataset {
    dataset.coerce_matrix_sparse()
}

/// Store the matrix densely. Values are kept bit-for-bit.
pub fn coerce_matrix_dense(dataset: AnnotatedDataset) -> AnnotatedDataset {
    dataset.coerce_matrix_dense()
}

/// Set the matrix tag.
pub fn rename_matrix(
    dataset: AnnotatedDataset,
    new_name: impl Into<String>,
) -> Result<AnnotatedDataset, DatasetError> {
    dataset.rename_matrix(new_name)
}

/// Move identifiers from a `rownames` variable attribute back into the identifier slot.
pub fn normalize_feature_ids(dataset: AnnotatedDataset) -> Result<AnnotatedDataset, DatasetError> {
    dataset.normalize_feature_ids()
}

/// A selection of in-memory operations, applied in a fixed order:
/// feature identifiers, observation attribute names, matrix tag, storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSteps {
    /// Normalize observation attribute names
    pub normalize_obs_names: bool,
    /// Move `rownames` back into the variable identifiers when the quirk is present
    pub fix_feature_ids: bool,
    /// New matrix tag
    pub matrix_name: Option<String>,
    /// Target storage kind
    pub storage: Option<StorageKind>,
}

impl ConversionSteps {
    /// True when no step is selected
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the selected steps.
    pub fn apply(&self, mut dataset: AnnotatedDataset) -> Result<AnnotatedDataset, DatasetError> {
        if self.fix_feature_ids && dataset.has_feature_id_quirk() {
            info!("Restoring variable identifiers from the 'rownames' attribute");
            dataset = dataset.normalize_feature_ids()?;
        }
        if self.normalize_obs_names {
            info!("Normalizing observation attribute names");
            dataset = dataset.normalize_observation_attribute_names()?;
        }
        if let Some(name) = &self.matrix_name {
            info!("Renaming matrix to '{}'", name);
            dataset = dataset.rename_matrix(name.clone())?;
        }
        if let Some(kind) = self.storage {
            info!("Storing matrix as {}", kind);
            dataset = dataset.with_storage(kind);
        }
        Ok(dataset)
    }
}

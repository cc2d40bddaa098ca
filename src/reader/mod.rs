//! # Container Reader Module
//!
//! Imports `.scmat` containers back into an [`AnnotatedDataset`].
//!
//! ## Identifier Placement
//!
//! Containers produced with the attribute index layout (as some foreign
//! writers do) keep the variable identifiers in a regular `rownames` attribute
//! instead of the `_index` column. Such containers import with positional
//! identifiers (`"0"`, `"1"`, ...) and the real identifiers in the `rownames`
//! attribute. [`AnnotatedDataset::normalize_feature_ids`] moves them back, or
//! set [`ImportOptions::fix_feature_ids`] to do it during import.
//!
//! ## Example
//!
//! ```rust,no_run
//! use scconvert::reader::{import_with_options, ContainerReader, ImportOptions};
//!
//! // Inspect the manifest without decoding tables
//! let reader = ContainerReader::open("data.scmat")?;
//! println!("{} x {}", reader.manifest().n_obs, reader.manifest().n_vars);
//!
//! // Full import, fixing identifier placement if needed
//! let options = ImportOptions::default().with_fix_feature_ids(true);
//! let dataset = import_with_options("data.scmat", &options)?;
//! println!("{} observations", dataset.n_obs());
//! # Ok::<(), scconvert::reader::ReaderError>(())
//! ```

mod config;
mod container;
mod error;
mod tables;
mod utils;


use std::path::Path;

pub use config::ImportOptions;
pub use container::ContainerReader;
pub use error::ReaderError;

pub(crate) use utils::footer_value;

use crate::dataset::AnnotatedDataset;

/// Import a container with default options.
pub fn import<P: AsRef<Path>>(path: P) -> Result<AnnotatedDataset, ReaderError> {
    import_with_options(path, &ImportOptions::default())
}

/// Import a container with custom options.
pub fn import_with_options<P: AsRef<Path>>(
    path: P,
    options: &ImportOptions,
) -> Result<AnnotatedDataset, ReaderError> {
    ContainerReader::open(path)?.read_dataset(options)
}

//! # scconvert - Single-Cell Dataset Converter
//!
//! `scconvert` moves annotated single-cell matrices between the two common
//! in-memory representations:
//!
//! - **observation-major** (AnnData-like): observations x variables, with `X`,
//!   `obs`, `var`, `obs_names` and `var_names`. This is the native
//!   [`AnnotatedDataset`](dataset::AnnotatedDataset).
//! - **feature-major** (SingleCellExperiment-like): features x cells, with named
//!   `assays`, `colData`, `rowData`, `colnames` and `rownames`. These only exist
//!   as schema-checked records at the [`bridge`].
//!
//! ## Key Features
//!
//! - **Self-describing container**: one `.scmat` ZIP file holding a JSON manifest
//!   and three Parquet tables (matrix, observation and variable attributes).
//!   Values round-trip bit-for-bit, including `-0.0`, NaN payloads and infinities.
//!
//! - **Atomic export**: the container is assembled in a temporary file next to the
//!   destination and renamed into place only when complete.
//!
//! - **Explicit bridge**: conversion to and from the feature-major representation
//!   goes through declared record schemas and named request/response exchanges.
//!
//! - **Explicit normalizations**: attribute-name normalization, storage coercion,
//!   matrix renaming and identifier-placement repair are separate, callable steps.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scconvert::dataset::{AnnotatedDataset, AttributeValues};
//! use scconvert::matrix::MatrixData;
//!
//! let matrix = MatrixData::from_rows(vec![vec![1.0, 0.0], vec![0.0, 5.0]])?;
//! let mut dataset = AnnotatedDataset::new(
//!     matrix,
//!     vec!["AAAC-1".into(), "AAAG-1".into()],
//!     vec!["TP53".into(), "GAPDH".into()],
//! )?;
//! dataset.add_obs("Source.Name", AttributeValues::from(vec!["s1", "s2"]))?;
//!
//! let dataset = dataset
//!     .normalize_observation_attribute_names()?
//!     .coerce_matrix_sparse()
//!     .rename_matrix("counts")?;
//!
//! scconvert::convert::export(&dataset, "pbmc.scmat")?;
//! let back = scconvert::convert::import("pbmc.scmat")?;
//! assert_eq!(back.matrix_name(), Some("counts"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Container Layout
//!
//! ```text
//! pbmc.scmat (ZIP)
//! ├── mimetype               application/vnd.scconvert (first, Stored)
//! ├── manifest.json          shape, storage, matrix tag, attribute descriptors
//! ├── matrix/matrix.parquet  obs_index, var_index, value
//! ├── obs/obs.parquet        _index + observation attributes
//! └── var/var.parquet        [_index] + variable attributes
//! ```
//!
//! The tables are plain Parquet and can be read with any Parquet tool once
//! extracted.
//!
//! ## Architecture
//!
//! - [`matrix`]: dense and CSR storage
//! - [`dataset`]: the annotated dataset, its invariants and normalizations
//! - [`schema`]: container constants, manifest and Arrow schemas
//! - [`writer`]: container export
//! - [`reader`]: container import
//! - [`bridge`]: observation-major / feature-major conversion
//! - [`metadata`]: sample sheet joins
//! - [`validator`]: container integrity checks
//! - [`convert`]: the converter operations as free functions

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod bridge;
pub mod convert;
pub mod dataset;
pub mod matrix;
pub mod metadata;
pub mod reader;
pub mod schema;
pub mod validator;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::bridge::{
        bridge_convert, BridgeRequest, BridgeResponse, BridgeValue, ConversionError, Direction,
        InProcessRuntime, Runtime,
    };
    pub use crate::convert::ConversionSteps;
    pub use crate::dataset::{
        AnnotatedDataset, AttributeKind, AttributeTable, AttributeValues, Axis, DatasetError,
    };
    pub use crate::matrix::{DenseMatrix, MatrixData, SparseMatrix, StorageKind};
    pub use crate::metadata::{annotate_observations, SampleSheet};
    pub use crate::reader::{import, import_with_options, ContainerReader, ImportOptions, ReaderError};
    pub use crate::schema::{IndexLayout, Manifest, SCCONVERT_EXTENSION, SCCONVERT_FORMAT_VERSION};
    pub use crate::validator::{validate_container, ValidationReport};
    pub use crate::writer::{export, export_with_config, CompressionType, ExportStats, WriterConfig};
}

//! # Container Validation Module
//!
//! Deep integrity validation for `.scmat` containers.
//!
//! ## Validation Checklist
//!
//! 1. **Structure**: ZIP container, `mimetype` first and uncompressed, required
//!    entries present, Parquet entries stored uncompressed
//! 2. **Manifest**: parses, supported format version, entry count consistent with
//!    shape and storage, attribute descriptors well formed
//! 3. **Schema Contract**: each table's Arrow schema, footer tags and row count
//!    agree with the manifest
//! 4. **Data Sanity**: full import succeeds; warns on non-finite values, on the
//!    identifier-placement quirk and on unnormalized observation attribute names
//!
//! Problems that make later steps meaningless (missing file, not a ZIP, missing
//! entries, unparsable manifest) end validation with an error; everything else is
//! recorded in the report.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scconvert::validator::validate_container;
//! use std::path::Path;
//!
//! match validate_container(Path::new("data.scmat")) {
//!     Ok(report) => println!("{}", report),
//!     Err(e) => eprintln!("Validation failed: {}", e),
//! }
//! ```

use std::path::Path;

use anyhow::Result;
use bytes::Bytes;

pub use report::{CheckStatus, Tally, ValidationCheck, ValidationReport, ValidationStep};

mod data;
mod manifest;
mod report;
mod schema;
mod structure;

/// Validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Error in container structure
    #[error("Structure error: {0}")]
    StructureError(String),

    /// Error in the manifest
    #[error("Manifest error: {0}")]
    ManifestError(String),
}

/// Raw entries of a structurally valid container
#[derive(Debug)]
pub(crate) struct ContainerContents {
    pub manifest: Bytes,
    pub matrix: Bytes,
    pub obs: Bytes,
    pub var: Bytes,
}

/// Main validation entry point
pub fn validate_container(path: &Path) -> Result<ValidationReport> {
    let mut report = ValidationReport::new(path.display().to_string());

    report.enter(ValidationStep::Structure);
    let contents = structure::check_structure(path, &mut report)?;

    report.enter(ValidationStep::Manifest);
    let manifest = manifest::check_manifest(&contents, &mut report)?;

    report.enter(ValidationStep::Schema);
    schema::check_schema_contract(&contents, &manifest, &mut report)?;

    report.enter(ValidationStep::Data);
    data::check_data_sanity(path, &mut report)?;

    Ok(report)
}

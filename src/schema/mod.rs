//! # Container Schema Definition
//!
//! Constants, manifest and Arrow schemas of the `.scmat` container.
//!
//! ## Container Layout
//!
//! ```text
//! {name}.scmat (ZIP archive)
//! ├── mimetype               # "application/vnd.scconvert" (Stored, first entry)
//! ├── manifest.json          # Shape, storage, matrix tag, attribute descriptors
//! ├── matrix/matrix.parquet  # Long table: obs_index, var_index, value
//! ├── obs/obs.parquet        # _index + one column per observation attribute
//! └── var/var.parquet        # [_index] + one column per variable attribute
//! ```
//!
//! ## Matrix Table
//!
//! | Column | Type | Description |
//! |--------|------|-------------|
//! | obs_index | UInt32 | Row (observation) position |
//! | var_index | UInt32 | Column (variable) position |
//! | value | Float64 | Cell value, bit-exact |
//!
//! Dense matrices store every cell; sparse matrices store their CSR entries.
//! Either way rows are sorted by `obs_index`, then `var_index`.
//!
//! ## Attribute Tables
//!
//! Attribute columns are named positionally (`attr_0000`, `attr_0001`, ...)
//! so that any attribute name survives storage. The real name is kept in the
//! Arrow field metadata and in the manifest.

mod builders;
/// Column name constants.
pub mod columns;
mod constants;
/// Manifest types.
pub mod manifest;
mod validation;

#[cfg(test)]
mod tests;

pub use builders::{
    attribute_data_type, create_attribute_schema, create_attribute_schema_arc,
    create_matrix_schema, create_matrix_schema_arc,
};
pub use columns::*;
pub use constants::*;
pub use manifest::{ColumnDescriptor, IndexLayout, Manifest};
pub use validation::{validate_attribute_schema, validate_matrix_schema, SchemaValidationError};

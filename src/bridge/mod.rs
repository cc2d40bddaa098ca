//! Conversion between observation-major and feature-major dataset records.
//!
//! Two ecosystems describe the same annotated matrix differently:
//!
//! | observation-major (`AnnData`) | feature-major (`SingleCellExperiment`) |
//! |-------------------------------|----------------------------------------|
//! | `X` (obs x var)               | `assays[<tag>]` (var x obs)            |
//! | `obs_names`                   | `colnames`                             |
//! | `var_names`                   | `rownames`                             |
//! | `obs`                         | `colData`                              |
//! | `var`                         | `rowData`                              |
//! | `matrix_name`                 | `mainAssay` (names the assay)          |
//!
//! An untagged matrix travels as the assay `"X"` with no `mainAssay`.
//!
//! Records are checked against an explicit [`RecordSchema`] before anything is
//! mapped, and the result is rebuilt through [`AnnotatedDataset`](crate::dataset::AnnotatedDataset)
//! so the converted value satisfies the same invariants as a constructed one.
//!
//! Values are exchanged with a [`Runtime`] through [`BridgeRequest`] and
//! [`BridgeResponse`]; no state survives between requests.
//!
//! # Example
//!
//! ```
//! use scconvert::bridge::{bridge_convert, dataset_to_observation_major, Direction};
//! use scconvert::dataset::AnnotatedDataset;
//! use scconvert::matrix::MatrixData;
//!
//! let matrix = MatrixData::from_rows(vec![vec![1.0, 0.0, 2.0]]).unwrap();
//! let names = vec!["g1".to_string(), "g2".to_string(), "g3".to_string()];
//! let dataset = AnnotatedDataset::new(matrix, vec!["cell1".to_string()], names).unwrap();
//!
//! let sce = bridge_convert(dataset_to_observation_major(dataset), Direction::ToFeatureMajor).unwrap();
//! assert_eq!(sce.class(), Some("SingleCellExperiment"));
//! ```

mod adapter;
mod error;
mod runtime;
pub mod schema;
mod value;


pub use adapter::{
    dataset_to_feature_major, dataset_to_observation_major, feature_major_to_dataset,
    observation_major_to_dataset,
};
pub use error::ConversionError;
pub use runtime::{
    BridgeRequest, BridgeResponse, CallHandler, Direction, InProcessRuntime, Runtime, Scope,
    CALL_TO_FEATURE_MAJOR, CALL_TO_OBSERVATION_MAJOR,
};
pub use schema::{FieldSpec, FieldType, RecordSchema, FEATURE_MAJOR, OBSERVATION_MAJOR};
pub use value::{BridgeValue, RecordFields};

const BRIDGE_INPUT: &str = "x";

/// Convert a record to the other ecosystem's representation.
pub fn bridge_convert(value: BridgeValue, direction: Direction) -> Result<BridgeValue, ConversionError> {
    bridge_convert_with(&InProcessRuntime::new(), value, direction)
}

/// Convert a record using the given runtime.
pub fn bridge_convert_with(
    runtime: &dyn Runtime,
    value: BridgeValue,
    direction: Direction,
) -> Result<BridgeValue, ConversionError> {
    if !runtime.is_available() {
        return Err(ConversionError::RuntimeUnavailable(runtime.name().to_string()));
    }
    let request = BridgeRequest::new(direction.call_name())
        .with_input(BRIDGE_INPUT, value)
        .with_output(BRIDGE_INPUT);
    runtime.execute(request)?.take(BRIDGE_INPUT)
}

//! # Sample metadata
//!
//! Joins per-sample annotation tables (TSV or CSV sample sheets) onto the
//! observation attributes of a dataset. Column names are kept exactly as they
//! appear in the sheet; running
//! [`normalize_observation_attribute_names`](crate::dataset::AnnotatedDataset::normalize_observation_attribute_names)
//! afterwards is a separate, explicit step.

mod error;
mod sample_sheet;


pub use error::MetadataError;
pub use sample_sheet::{annotate_observations, SampleSheet};

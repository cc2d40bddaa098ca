//! # Annotated Matrix Dataset
//!
//! [`AnnotatedDataset`] is the in-memory value every conversion works on: an
//! observations × variables matrix, identifiers for both axes, and an ordered
//! attribute table per axis.
//!
//! ## Invariants
//!
//! Every constructor and every operation returning a dataset checks that:
//!
//! 1. matrix rows equal the number of observation identifiers and the length
//!    of every observation attribute;
//! 2. matrix columns equal the number of variable identifiers and the length
//!    of every variable attribute;
//! 3. identifiers are unique within their axis;
//! 4. categorical codes are `-1` or index a declared category;
//! 5. the matrix tag, when set, is not empty.
//!
//! Operations consume the dataset and return a new one, so a dataset that
//! failed an operation is never observed half-modified.
//!
//! ```
//! use scconvert::dataset::{AnnotatedDataset, AttributeValues};
//! use scconvert::matrix::MatrixData;
//!
//! let matrix = MatrixData::from_rows(vec![vec![1.0, 0.0], vec![0.0, 3.0]])?;
//! let mut dataset = AnnotatedDataset::new(
//!     matrix,
//!     vec!["cell_1".into(), "cell_2".into()],
//!     vec!["GeneA".into(), "GeneB".into()],
//! )?;
//! dataset.add_obs("Source.Name", AttributeValues::from(vec!["s1", "s2"]))?;
//!
//! let dataset = dataset.normalize_observation_attribute_names()?;
//! assert!(dataset.obs().contains_key("source_name"));
//! # Ok::<(), scconvert::dataset::DatasetError>(())
//! ```

mod attributes;
mod error;
mod normalize;

#[cfg(test)]
mod tests;

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::matrix::{MatrixData, StorageKind};

pub use attributes::{AttributeKind, AttributeTable, AttributeValues};
pub use error::DatasetError;
pub use normalize::{normalize_attribute_name, FEATURE_ID_ATTRIBUTE, ROWNAMES_ATTRIBUTE};

pub(crate) use normalize::{is_positional, positional_names};

/// Matrix axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Rows: observations (cells, samples)
    Obs,
    /// Columns: variables (genes, features)
    Var,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Obs => write!(f, "observation"),
            Axis::Var => write!(f, "variable"),
        }
    }
}

/// Unvalidated components of a dataset.
///
/// Used by decoders that assemble a dataset piece by piece; turn it into an
/// [`AnnotatedDataset`] with [`AnnotatedDataset::from_parts`].
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetParts {
    /// Primary matrix (n_obs × n_vars)
    pub matrix: MatrixData,
    /// Observation identifiers
    pub obs_names: Vec<String>,
    /// Variable identifiers
    pub var_names: Vec<String>,
    /// Observation attributes
    pub obs: AttributeTable,
    /// Variable attributes
    pub var: AttributeTable,
    /// Matrix tag
    pub matrix_name: Option<String>,
}

/// A single-cell annotated matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedDataset {
    matrix: MatrixData,
    obs_names: Vec<String>,
    var_names: Vec<String>,
    obs: AttributeTable,
    var: AttributeTable,
    matrix_name: Option<String>,
}

impl AnnotatedDataset {
    /// Create a dataset with no attributes and no matrix tag.
    pub fn new(
        matrix: MatrixData,
        obs_names: Vec<String>,
        var_names: Vec<String>,
    ) -> Result<Self, DatasetError> {
        Self::from_parts(DatasetParts {
            matrix,
            obs_names,
            var_names,
            obs: AttributeTable::new(),
            var: AttributeTable::new(),
            matrix_name: None,
        })
    }

    /// Assemble a dataset from its components, checking every invariant.
    pub fn from_parts(parts: DatasetParts) -> Result<Self, DatasetError> {
        let dataset = Self {
            matrix: parts.matrix,
            obs_names: parts.obs_names,
            var_names: parts.var_names,
            obs: parts.obs,
            var: parts.var,
            matrix_name: parts.matrix_name,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Split into components.
    pub fn into_parts(self) -> DatasetParts {
        DatasetParts {
            matrix: self.matrix,
            obs_names: self.obs_names,
            var_names: self.var_names,
            obs: self.obs,
            var: self.var,
            matrix_name: self.matrix_name,
        }
    }

    /// Primary matrix
    pub fn matrix(&self) -> &MatrixData {
        &self.matrix
    }

    /// Observation identifiers
    pub fn obs_names(&self) -> &[String] {
        &self.obs_names
    }

    /// Variable identifiers
    pub fn var_names(&self) -> &[String] {
        &self.var_names
    }

    /// Observation attributes, in insertion order
    pub fn obs(&self) -> &AttributeTable {
        &self.obs
    }

    /// Variable attributes, in insertion order
    pub fn var(&self) -> &AttributeTable {
        &self.var
    }

    /// Matrix tag, if set
    pub fn matrix_name(&self) -> Option<&str> {
        self.matrix_name.as_deref()
    }

    /// Number of observations
    pub fn n_obs(&self) -> usize {
        self.obs_names.len()
    }

    /// Number of variables
    pub fn n_vars(&self) -> usize {
        self.var_names.len()
    }

    /// (n_obs, n_vars)
    pub fn shape(&self) -> (usize, usize) {
        self.matrix.shape()
    }

    /// Storage kind of the matrix
    pub fn storage(&self) -> StorageKind {
        self.matrix.storage()
    }

    /// Add an observation attribute. Fails on a length mismatch or a name already in use.
    pub fn add_obs(
        &mut self,
        name: impl Into<String>,
        values: AttributeValues,
    ) -> Result<(), DatasetError> {
        let n = self.n_obs();
        insert_attribute(&mut self.obs, Axis::Obs, n, name.into(), values)
    }

    /// Add a variable attribute. Fails on a length mismatch or a name already in use.
    pub fn add_var(
        &mut self,
        name: impl Into<String>,
        values: AttributeValues,
    ) -> Result<(), DatasetError> {
        let n = self.n_vars();
        insert_attribute(&mut self.var, Axis::Var, n, name.into(), values)
    }

    /// Check every structural invariant.
    pub fn validate(&self) -> Result<(), DatasetError> {
        let (n_rows, n_cols) = self.matrix.shape();
        check_len(Axis::Obs, "identifiers", n_rows, self.obs_names.len())?;
        check_len(Axis::Var, "identifiers", n_cols, self.var_names.len())?;
        check_unique(Axis::Obs, &self.obs_names)?;
        check_unique(Axis::Var, &self.var_names)?;
        for (name, values) in &self.obs {
            check_attribute(Axis::Obs, n_rows, name, values)?;
        }
        for (name, values) in &self.var {
            check_attribute(Axis::Var, n_cols, name, values)?;
        }
        if matches!(self.matrix_name.as_deref(), Some(name) if name.trim().is_empty()) {
            return Err(DatasetError::EmptyMatrixName);
        }
        Ok(())
    }

    /// Normalize every observation attribute name (see [`normalize_attribute_name`]).
    ///
    /// Values and order are untouched. Two names that normalize to the same
    /// string are reported as [`DatasetError::DuplicateAttribute`].
    pub fn normalize_observation_attribute_names(mut self) -> Result<Self, DatasetError> {
        let obs = std::mem::take(&mut self.obs);
        let mut renamed = AttributeTable::with_capacity(obs.len());
        for (name, values) in obs {
            let normalized = normalize_attribute_name(&name);
            if renamed.contains_key(&normalized) {
                return Err(DatasetError::DuplicateAttribute {
                    axis: Axis::Obs,
                    name: normalized,
                });
            }
            if normalized != name {
                debug!("Renamed observation attribute '{}' -> '{}'", name, normalized);
            }
            renamed.insert(normalized, values);
        }
        self.obs = renamed;
        Ok(self)
    }

    /// Store the matrix sparse. Values are kept bit-for-bit.
    pub fn coerce_matrix_sparse(self) -> Self {
        self.with_storage(StorageKind::Sparse)
    }

    /// Store the matrix dense. Values are kept bit-for-bit.
    pub fn coerce_matrix_dense(self) -> Self {
        self.with_storage(StorageKind::Dense)
    }

    /// Store the matrix with the given storage kind.
    pub fn with_storage(mut self, kind: StorageKind) -> Self {
        if self.matrix.storage() != kind {
            debug!("Coercing matrix storage {} -> {}", self.matrix.storage(), kind);
            self.matrix = self.matrix.into_storage(kind);
        }
        self
    }

    /// Set the matrix tag. Empty or whitespace-only names are rejected.
    pub fn rename_matrix(mut self, name: impl Into<String>) -> Result<Self, DatasetError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DatasetError::EmptyMatrixName);
        }
        self.matrix_name = Some(name);
        Ok(self)
    }

    /// True when the variable identifiers are positional placeholders and the
    /// real identifiers sit in a `rownames` variable attribute.
    pub fn has_feature_id_quirk(&self) -> bool {
        self.var.contains_key(ROWNAMES_ATTRIBUTE) && is_positional(&self.var_names)
    }

    /// Move the `rownames` variable attribute into the variable identifier
    /// slot and rename the attribute to `gene_ids`.
    ///
    /// Only datasets showing the quirk (see [`AnnotatedDataset::has_feature_id_quirk`])
    /// are changed; real identifiers are never replaced, even when a
    /// `rownames` attribute exists.
    pub fn normalize_feature_ids(mut self) -> Result<Self, DatasetError> {
        if !self.has_feature_id_quirk() {
            return Ok(self);
        }
        let Some(values) = self.var.get(ROWNAMES_ATTRIBUTE) else {
            return Ok(self);
        };
        let ids = values
            .as_strings()
            .ok_or_else(|| DatasetError::InvalidAttribute {
                axis: Axis::Var,
                name: ROWNAMES_ATTRIBUTE.to_string(),
                reason: format!("expected string values, found {}", values.kind()),
            })?
            .to_vec();
        check_unique(Axis::Var, &ids)?;
        if self.var.contains_key(FEATURE_ID_ATTRIBUTE) {
            return Err(DatasetError::DuplicateAttribute {
                axis: Axis::Var,
                name: FEATURE_ID_ATTRIBUTE.to_string(),
            });
        }

        let var = std::mem::take(&mut self.var);
        self.var = var
            .into_iter()
            .map(|(name, values)| {
                if name == ROWNAMES_ATTRIBUTE {
                    (FEATURE_ID_ATTRIBUTE.to_string(), values)
                } else {
                    (name, values)
                }
            })
            .collect();
        self.var_names = ids;
        debug!(
            "Moved {} variable identifiers from '{}' into the identifier slot",
            self.var_names.len(),
            ROWNAMES_ATTRIBUTE
        );
        Ok(self)
    }
}

fn insert_attribute(
    table: &mut AttributeTable,
    axis: Axis,
    expected: usize,
    name: String,
    values: AttributeValues,
) -> Result<(), DatasetError> {
    if table.contains_key(&name) {
        return Err(DatasetError::DuplicateAttribute { axis, name });
    }
    check_attribute(axis, expected, &name, &values)?;
    table.insert(name, values);
    Ok(())
}

fn check_len(axis: Axis, what: &str, expected: usize, found: usize) -> Result<(), DatasetError> {
    if expected != found {
        return Err(DatasetError::LengthMismatch {
            axis,
            what: what.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

fn check_unique(axis: Axis, names: &[String]) -> Result<(), DatasetError> {
    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(DatasetError::DuplicateIdentifier {
                axis,
                id: name.clone(),
            });
        }
    }
    Ok(())
}

fn check_attribute(
    axis: Axis,
    expected: usize,
    name: &str,
    values: &AttributeValues,
) -> Result<(), DatasetError> {
    check_len(axis, &format!("attribute '{}'", name), expected, values.len())?;
    if let Some((code, n_categories)) = values.invalid_code() {
        return Err(DatasetError::InvalidCategoryCode {
            axis,
            name: name.to_string(),
            code,
            n_categories,
        });
    }
    Ok(())
}

//! Manifest schema for the container format.
//!
//! The manifest.json entry declares the shape, storage and attribute layout,
//! so readers can plan decoding (or just report) without touching Parquet.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::constants::SCCONVERT_FORMAT_VERSION;
use crate::dataset::AttributeKind;
use crate::matrix::StorageKind;

/// Where the variable identifiers live in the variable table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexLayout {
    /// Identifiers in the dedicated `_index` column
    #[default]
    Dedicated,
    /// Identifiers stored as a regular `rownames` attribute and no `_index`
    /// column, as some foreign writers do
    Attribute,
}

impl std::fmt::Display for IndexLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexLayout::Dedicated => write!(f, "dedicated"),
            IndexLayout::Attribute => write!(f, "attribute"),
        }
    }
}

impl std::str::FromStr for IndexLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dedicated" => Ok(IndexLayout::Dedicated),
            "attribute" => Ok(IndexLayout::Attribute),
            other => Err(format!(
                "Unknown index layout '{}'. Valid options: dedicated, attribute",
                other
            )),
        }
    }
}

/// Describes one attribute column of the obs or var table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Attribute name as seen by users
    pub name: String,
    /// Positional Parquet column name
    pub column: String,
    /// Value type
    pub kind: AttributeKind,
    /// Category labels for categorical columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

/// Manifest for the container format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Format version (e.g., "1.0.0")
    pub format_version: String,
    /// Number of observations (matrix rows)
    pub n_obs: u64,
    /// Number of variables (matrix columns)
    pub n_vars: u64,
    /// Matrix storage kind
    pub storage: StorageKind,
    /// Number of stored matrix entries
    pub nnz: u64,
    /// Matrix tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix_name: Option<String>,
    /// Placement of variable identifiers
    pub index_layout: IndexLayout,
    /// Observation attribute columns, in order
    pub obs_columns: Vec<ColumnDescriptor>,
    /// Variable attribute columns, in order
    pub var_columns: Vec<ColumnDescriptor>,
    /// ISO 8601 timestamp of when the file was created
    pub created: String,
    /// Name and version of the converter that created the file
    pub converter: String,
    /// Random identifier of this container
    pub dataset_id: Uuid,
}

impl Manifest {
    /// Creates a manifest for the current format version with a fresh dataset id
    /// and no attribute columns.
    pub fn new(
        n_obs: u64,
        n_vars: u64,
        storage: StorageKind,
        nnz: u64,
        index_layout: IndexLayout,
        created: String,
        converter: String,
    ) -> Self {
        Self {
            format_version: SCCONVERT_FORMAT_VERSION.to_string(),
            n_obs,
            n_vars,
            storage,
            nnz,
            matrix_name: None,
            index_layout,
            obs_columns: Vec::new(),
            var_columns: Vec::new(),
            created,
            converter,
            dataset_id: Uuid::new_v4(),
        }
    }

    /// Major component of `format_version`.
    pub fn major_version(&self) -> Option<u32> {
        self.format_version.split('.').next()?.parse().ok()
    }

    /// Checks the declared shape and entry count and returns them as
    /// `(n_obs, n_vars, nnz)`.
    ///
    /// Matrix coordinates are stored as `uint32`, so both axes must fit in
    /// `u32`. Dense storage holds every cell; sparse storage at most every cell.
    pub fn checked_shape(&self) -> Result<(usize, usize, usize), String> {
        let limit = u64::from(u32::MAX);
        if self.n_obs > limit || self.n_vars > limit {
            return Err(format!(
                "shape {}x{} exceeds the {} row/column limit",
                self.n_obs, self.n_vars, limit
            ));
        }
        let cells = self.n_obs.checked_mul(self.n_vars).ok_or_else(|| {
            format!("shape {}x{} overflows the cell count", self.n_obs, self.n_vars)
        })?;
        let consistent = match self.storage {
            StorageKind::Dense => self.nnz == cells,
            StorageKind::Sparse => self.nnz <= cells,
        };
        if !consistent {
            return Err(format!(
                "{} entries do not fit a {}x{} {} matrix",
                self.nnz, self.n_obs, self.n_vars, self.storage
            ));
        }
        let to_usize = |n: u64| {
            usize::try_from(n).map_err(|_| format!("{} does not fit in memory on this platform", n))
        };
        Ok((to_usize(self.n_obs)?, to_usize(self.n_vars)?, to_usize(self.nnz)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> Manifest {
        Manifest::new(
            192,
            46604,
            StorageKind::Sparse,
            12345,
            IndexLayout::Dedicated,
            "2024-01-01T00:00:00Z".to_string(),
            "scconvert v0.1.0".to_string(),
        )
    }

    #[test]
    fn test_manifest_new() {
        let m = manifest();
        assert_eq!(m.format_version, SCCONVERT_FORMAT_VERSION);
        assert_eq!(m.major_version(), Some(1));
        assert!(m.matrix_name.is_none());
        assert!(m.obs_columns.is_empty());
    }

    #[test]
    fn test_manifest_serialization() {
        let mut m = manifest();
        m.matrix_name = Some("counts".to_string());
        m.index_layout = IndexLayout::Attribute;
        m.var_columns.push(ColumnDescriptor {
            name: "rownames".to_string(),
            column: "attr_0000".to_string(),
            kind: AttributeKind::String,
            categories: None,
        });

        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"index_layout\":\"attribute\""));
        assert!(json.contains("\"storage\":\"sparse\""));
        assert!(!json.contains("categories"));

        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_checked_shape() {
        let mut m = manifest();
        assert_eq!(m.checked_shape(), Ok((192, 46604, 12345)));

        m.nnz = u64::MAX / 4;
        assert!(m.checked_shape().unwrap_err().contains("do not fit"));

        m.storage = StorageKind::Dense;
        m.nnz = 192 * 46604;
        assert!(m.checked_shape().is_ok());
        m.nnz -= 1;
        assert!(m.checked_shape().is_err());

        m.n_obs = u64::MAX;
        assert!(m.checked_shape().unwrap_err().contains("limit"));

        m.n_obs = 0;
        m.nnz = 0;
        assert_eq!(m.checked_shape(), Ok((0, 46604, 0)));
    }

    #[test]
    fn test_index_layout_parse() {
        assert_eq!("Attribute".parse::<IndexLayout>().unwrap(), IndexLayout::Attribute);
        assert!("index".parse::<IndexLayout>().is_err());
        assert_eq!(IndexLayout::default(), IndexLayout::Dedicated);
    }
}

//! TOML configuration file support.
//!
//! Instead of passing many flags, defaults for `convert` can live in a file:
//!
//! ```toml
//! # scconvert.toml
//! [conversion]
//! profile = "max-compression"
//! row_group_size = 200000
//! normalize_obs_names = true
//! fix_feature_ids = true
//! matrix_name = "counts"
//! storage = "sparse"
//! ```
//!
//! Command-line flags override the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use scconvert::matrix::StorageKind;

/// Root configuration structure for scconvert.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Conversion-specific settings.
    #[serde(default)]
    pub conversion: ConversionConfig,
}

/// Configuration for the convert command.
#[derive(Debug, Default, Deserialize)]
pub struct ConversionConfig {
    /// Profile name (fast, balanced, max-compression).
    pub profile: Option<String>,

    /// ZSTD compression level (1-22).
    pub compression_level: Option<i32>,

    /// Number of matrix entries per Parquet row group.
    pub row_group_size: Option<usize>,

    /// Normalize observation attribute names.
    pub normalize_obs_names: Option<bool>,

    /// Restore variable identifiers stored as a `rownames` attribute.
    pub fix_feature_ids: Option<bool>,

    /// Matrix tag to set.
    pub matrix_name: Option<String>,

    /// Target storage (dense or sparse).
    pub storage: Option<StorageKind>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

//! Conversion profiles for common use cases.
//!
//! Profiles provide sensible defaults for compression and row group sizing,
//! hiding low-level Parquet settings from end users.

use std::fmt;
use std::str::FromStr;

use scconvert::writer::{CompressionType, WriterConfig};

/// Conversion profiles for common use cases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Profile {
    /// Prioritize speed over compression.
    ///
    /// - Compression: Snappy
    /// - Row group size: 500,000 entries
    Fast,

    /// Balance between speed and compression (default).
    ///
    /// - Compression: ZSTD level 3
    /// - Row group size: 1,000,000 entries
    #[default]
    Balanced,

    /// Maximum compression, slower conversion.
    ///
    /// - Compression: ZSTD level 22
    /// - Row group size: 4,000,000 entries
    MaxCompression,
}

impl Profile {
    /// Writer configuration for this profile.
    pub fn writer_config(&self) -> WriterConfig {
        match self {
            Profile::Fast => WriterConfig::fast_write(),
            Profile::Balanced => WriterConfig::balanced(),
            Profile::MaxCompression => WriterConfig::max_compression(),
        }
    }

    /// Writer configuration with optional overrides applied.
    pub fn writer_config_with(
        &self,
        compression_level: Option<i32>,
        row_group_size: Option<usize>,
    ) -> WriterConfig {
        let mut config = self.writer_config();
        if let Some(level) = compression_level {
            config.compression = CompressionType::Zstd(level);
        }
        if let Some(size) = row_group_size {
            config.row_group_size = size;
        }
        config
    }

    /// Returns all available profile names.
    pub fn variants() -> &'static [&'static str] {
        &["fast", "balanced", "max-compression"]
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Fast => write!(f, "fast"),
            Profile::Balanced => write!(f, "balanced"),
            Profile::MaxCompression => write!(f, "max-compression"),
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Profile::Fast),
            "balanced" | "default" => Ok(Profile::Balanced),
            "max-compression" | "maxcompression" | "max" => Ok(Profile::MaxCompression),
            _ => Err(format!(
                "Unknown profile '{}'. Valid options: {}",
                s,
                Profile::variants().join(", ")
            )),
        }
    }
}

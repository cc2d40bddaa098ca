use std::collections::HashMap;

use parquet::basic::{Compression, Encoding, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use parquet::schema::types::ColumnPath;

use crate::schema::{columns, IndexLayout};

/// Compression options for the Parquet tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// ZSTD at the given level; count matrices compress well with it
    Zstd(i32),
    /// Snappy
    Snappy,
    /// Store pages uncompressed
    Uncompressed,
}

impl Default for CompressionType {
    fn default() -> Self {
        Self::Zstd(3)
    }
}

impl CompressionType {
    /// ZSTD level 22
    pub fn max_compression() -> Self {
        Self::Zstd(22)
    }

    /// ZSTD level 3
    pub fn balanced() -> Self {
        Self::Zstd(3)
    }

    /// Snappy
    pub fn fast() -> Self {
        Self::Snappy
    }
}

/// Configuration for the container writer
#[derive(Debug, Clone, PartialEq)]
pub struct WriterConfig {
    /// Page compression for all three tables
    pub compression: CompressionType,

    /// Maximum rows per row group. For the matrix table a row is one stored entry.
    pub row_group_size: usize,

    /// Data page size in bytes
    pub data_page_size: usize,

    /// Write column chunk statistics
    pub write_statistics: bool,

    /// Use BYTE_STREAM_SPLIT encoding for the matrix value column.
    pub use_byte_stream_split: bool,

    /// Where variable identifiers are stored in the variable table
    pub index_layout: IndexLayout,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::Zstd(3),
            // 1M matrix entries per row group
            row_group_size: 1_000_000,
            // 1MB data pages
            data_page_size: 1024 * 1024,
            write_statistics: true,
            use_byte_stream_split: true,
            index_layout: IndexLayout::Dedicated,
        }
    }
}

impl WriterConfig {
    /// Smallest containers, for archiving large atlases
    pub fn max_compression() -> Self {
        Self {
            compression: CompressionType::max_compression(),
            row_group_size: 4_000_000,
            data_page_size: 2 * 1024 * 1024,
            ..Self::default()
        }
    }

    /// Quick exports of intermediate results
    pub fn fast_write() -> Self {
        Self {
            compression: CompressionType::fast(),
            row_group_size: 500_000,
            data_page_size: 512 * 1024,
            ..Self::default()
        }
    }

    /// Same as [`WriterConfig::default`]
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Same configuration with a different variable index layout
    pub fn with_index_layout(mut self, index_layout: IndexLayout) -> Self {
        self.index_layout = index_layout;
        self
    }

    /// Parquet properties for one table, with `metadata` in the footer
    pub(super) fn to_writer_properties(
        &self,
        metadata: &HashMap<String, String>,
    ) -> WriterProperties {
        let compression = match self.compression {
            CompressionType::Zstd(level) => {
                Compression::ZSTD(ZstdLevel::try_new(level).unwrap_or_default())
            }
            CompressionType::Snappy => Compression::SNAPPY,
            CompressionType::Uncompressed => Compression::UNCOMPRESSED,
        };

        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        let mut builder = WriterProperties::builder()
            .set_compression(compression)
            .set_data_page_size_limit(self.data_page_size)
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(self.row_group_size.max(1));

        // Matrix values are high cardinality; dictionary pages would only grow the file
        let value_path = ColumnPath::new(vec![columns::VALUE.to_string()]);
        builder = builder.set_column_dictionary_enabled(value_path.clone(), false);
        if self.use_byte_stream_split {
            builder = builder.set_column_encoding(value_path, Encoding::BYTE_STREAM_SPLIT);
        }

        let mut kv_metadata: Vec<KeyValue> = metadata
            .iter()
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: Some(v.clone()),
            })
            .collect();
        kv_metadata.sort_by(|a, b| a.key.cmp(&b.key));

        builder = builder.set_key_value_metadata(Some(kv_metadata));

        builder.build()
    }
}

/// Container format version - follows semantic versioning
pub const SCCONVERT_FORMAT_VERSION: &str = "1.0.0";

/// File extension for container files
pub const SCCONVERT_EXTENSION: &str = ".scmat";

/// MIME type stored as the first container entry
pub const SCCONVERT_MIMETYPE: &str = "application/vnd.scconvert";

/// Mimetype entry (Stored, always first)
pub const MIMETYPE_ENTRY: &str = "mimetype";

/// Manifest entry
pub const MANIFEST_ENTRY: &str = "manifest.json";

/// Matrix table entry
pub const MATRIX_ENTRY: &str = "matrix/matrix.parquet";

/// Observation table entry
pub const OBS_ENTRY: &str = "obs/obs.parquet";

/// Variable table entry
pub const VAR_ENTRY: &str = "var/var.parquet";

/// Metadata key for format version in Parquet footer
pub const KEY_FORMAT_VERSION: &str = "scconvert:format_version";

/// Metadata key naming the table (matrix, obs or var) in Parquet footer
pub const KEY_TABLE: &str = "scconvert:table";

/// Arrow field metadata key carrying the real attribute name
pub const FIELD_ATTRIBUTE_NAME: &str = "scconvert:attribute_name";

/// Arrow field metadata key carrying the attribute kind
pub const FIELD_ATTRIBUTE_KIND: &str = "scconvert:attribute_kind";

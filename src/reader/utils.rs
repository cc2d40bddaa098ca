use arrow::array::{
    Array, BooleanArray, Float64Array, Int32Array, Int64Array, StringArray, UInt32Array,
};
use arrow::record_batch::RecordBatch;
use parquet::file::metadata::FileMetaData;

use super::ReaderError;

fn get_typed_column<'a, T: Array + 'static>(
    batch: &'a RecordBatch,
    name: &str,
    type_name: &str,
) -> Result<&'a T, ReaderError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| ReaderError::ColumnNotFound(name.to_string()))?
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| ReaderError::InvalidFormat(format!("{} is not {}", name, type_name)))
}

/// Get a required UInt32 column by name.
pub(super) fn get_uint32_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a UInt32Array, ReaderError> {
    get_typed_column(batch, name, "UInt32")
}

/// Get a required Int32 column by name.
pub(super) fn get_int32_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a Int32Array, ReaderError> {
    get_typed_column(batch, name, "Int32")
}

/// Get a required Int64 column by name.
pub(super) fn get_int64_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a Int64Array, ReaderError> {
    get_typed_column(batch, name, "Int64")
}

/// Get a required Float64 column by name.
pub(super) fn get_float64_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a Float64Array, ReaderError> {
    get_typed_column(batch, name, "Float64")
}

/// Get a required Boolean column by name.
pub(super) fn get_boolean_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a BooleanArray, ReaderError> {
    get_typed_column(batch, name, "Boolean")
}

/// Get a required String column by name.
pub(super) fn get_string_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a StringArray, ReaderError> {
    get_typed_column(batch, name, "String")
}

/// Fail if a column that must be complete contains nulls.
pub(super) fn require_no_nulls(array: &dyn Array, name: &str) -> Result<(), ReaderError> {
    if array.null_count() > 0 {
        return Err(ReaderError::InvalidFormat(format!(
            "column {} contains {} nulls",
            name,
            array.null_count()
        )));
    }
    Ok(())
}

/// Look up a key in the Parquet footer's key-value metadata.
pub(crate) fn footer_value<'a>(metadata: &'a FileMetaData, key: &str) -> Option<&'a str> {
    metadata
        .key_value_metadata()?
        .iter()
        .find(|kv| kv.key == key)
        .and_then(|kv| kv.value.as_deref())
}

//! Parquet encoding of the matrix and attribute tables.

use std::collections::HashMap;
use std::sync::Arc;

use arrow::array::{
    ArrayRef, BooleanArray, Float64Array, Int32Array, Int64Array, StringArray, UInt32Array,
};
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use log::debug;
use parquet::arrow::ArrowWriter;

use super::{WriterConfig, WriterError};
use crate::dataset::{AttributeTable, AttributeValues};
use crate::matrix::MatrixData;
use crate::schema::{
    attribute_column_name, create_attribute_schema_arc, create_matrix_schema_arc,
    ColumnDescriptor, KEY_FORMAT_VERSION, KEY_TABLE, SCCONVERT_FORMAT_VERSION,
};

/// Footer metadata identifying a table
fn footer_metadata(table: &str) -> HashMap<String, String> {
    let mut metadata = HashMap::new();
    metadata.insert(
        KEY_FORMAT_VERSION.to_string(),
        SCCONVERT_FORMAT_VERSION.to_string(),
    );
    metadata.insert(KEY_TABLE.to_string(), table.to_string());
    metadata
}

/// Describe the columns of an attribute table, in order.
pub(super) fn describe_attributes(table: &AttributeTable) -> Vec<ColumnDescriptor> {
    table
        .iter()
        .enumerate()
        .map(|(position, (name, values))| ColumnDescriptor {
            name: name.clone(),
            column: attribute_column_name(position),
            kind: values.kind(),
            categories: values.categories().map(<[String]>::to_vec),
        })
        .collect()
}

/// Check that both matrix axes fit in the UInt32 index columns.
pub(super) fn check_index_range(matrix: &MatrixData) -> Result<(), WriterError> {
    let (n_rows, n_cols) = matrix.shape();
    if n_rows > u32::MAX as usize || n_cols > u32::MAX as usize {
        return Err(WriterError::InvalidData(format!(
            "matrix shape {}x{} exceeds the UInt32 index range",
            n_rows, n_cols
        )));
    }
    Ok(())
}

/// Buffered entries of the matrix table
struct EntryBuffer {
    obs_index: Vec<u32>,
    var_index: Vec<u32>,
    values: Vec<f64>,
}

impl EntryBuffer {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            obs_index: Vec::with_capacity(capacity),
            var_index: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn push(&mut self, row: usize, col: usize, value: f64) {
        self.obs_index.push(row as u32);
        self.var_index.push(col as u32);
        self.values.push(value);
    }

    fn take_batch(&mut self, schema: &SchemaRef) -> Result<RecordBatch, WriterError> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(UInt32Array::from(std::mem::take(&mut self.obs_index))),
            Arc::new(UInt32Array::from(std::mem::take(&mut self.var_index))),
            Arc::new(Float64Array::from(std::mem::take(&mut self.values))),
        ];
        Ok(RecordBatch::try_new(schema.clone(), columns)?)
    }
}

/// Encode the matrix as a long Parquet table, one row per stored entry.
///
/// Entries are streamed into the writer in chunks of `row_group_size`.
/// Returns the encoded bytes and the number of entries written.
pub(super) fn encode_matrix(
    matrix: &MatrixData,
    config: &WriterConfig,
) -> Result<(Vec<u8>, usize), WriterError> {
    check_index_range(matrix)?;

    let schema = create_matrix_schema_arc();
    let props = config.to_writer_properties(&footer_metadata("matrix"));
    let mut writer = ArrowWriter::try_new(Vec::new(), schema.clone(), Some(props))?;

    let chunk = config.row_group_size.max(1);
    let mut buffer = EntryBuffer::with_capacity(chunk.min(matrix.nnz()));
    let mut written = 0usize;
    for (row, col, value) in matrix.entries() {
        buffer.push(row, col, value);
        if buffer.len() == chunk {
            written += buffer.len();
            writer.write(&buffer.take_batch(&schema)?)?;
        }
    }
    if !buffer.values.is_empty() {
        written += buffer.len();
        writer.write(&buffer.take_batch(&schema)?)?;
    }

    let bytes = writer.into_inner()?;
    debug!(
        "Encoded matrix table: {} entries, {} bytes",
        written,
        bytes.len()
    );
    Ok((bytes, written))
}

/// Arrow array for one attribute column
fn attribute_array(values: &AttributeValues) -> ArrayRef {
    match values {
        AttributeValues::Strings(v) => Arc::new(StringArray::from_iter_values(v.iter())),
        AttributeValues::Floats(v) => Arc::new(Float64Array::from(v.clone())),
        AttributeValues::Integers(v) => Arc::new(Int64Array::from(v.clone())),
        AttributeValues::Booleans(v) => Arc::new(BooleanArray::from(v.clone())),
        AttributeValues::Categorical { codes, .. } => Arc::new(
            codes
                .iter()
                .map(|&code| (code >= 0).then_some(code))
                .collect::<Int32Array>(),
        ),
    }
}

/// Encode an attribute table (obs or var) as Parquet.
///
/// `index` holds the identifiers for the `_index` column; `None` leaves the
/// column out. Column order follows `table`, which must match `descriptors`.
pub(super) fn encode_attributes(
    table_name: &str,
    index: Option<&[String]>,
    table: &AttributeTable,
    descriptors: &[ColumnDescriptor],
    config: &WriterConfig,
) -> Result<Vec<u8>, WriterError> {
    if index.is_none() && table.is_empty() {
        return Err(WriterError::InvalidData(format!(
            "{} table has neither identifiers nor attributes",
            table_name
        )));
    }

    let schema = create_attribute_schema_arc(index.is_some(), descriptors);
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
    if let Some(names) = index {
        columns.push(Arc::new(StringArray::from_iter_values(names.iter())));
    }
    columns.extend(table.values().map(attribute_array));
    let batch = RecordBatch::try_new(schema.clone(), columns)?;

    let props = config.to_writer_properties(&footer_metadata(table_name));
    let mut writer = ArrowWriter::try_new(Vec::new(), schema, Some(props))?;
    writer.write(&batch)?;
    let bytes = writer.into_inner()?;
    debug!(
        "Encoded {} table: {} rows, {} attributes, {} bytes",
        table_name,
        batch.num_rows(),
        descriptors.len(),
        bytes.len()
    );
    Ok(bytes)
}

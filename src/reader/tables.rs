//! Decoding of the matrix and attribute tables.

use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use log::debug;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::utils::{
    footer_value, get_boolean_column, get_float64_column, get_int32_column, get_int64_column,
    get_string_column, get_uint32_column, require_no_nulls,
};
use super::ReaderError;
use crate::dataset::{AttributeKind, AttributeTable, AttributeValues};
use crate::matrix::{DenseMatrix, MatrixData, SparseMatrix, StorageKind};
use crate::schema::{
    columns, validate_attribute_schema, validate_matrix_schema, ColumnDescriptor, Manifest,
    KEY_TABLE,
};

/// Open a Parquet entry and check that its footer names the expected table.
fn open_table(
    bytes: Bytes,
    table: &str,
) -> Result<ParquetRecordBatchReaderBuilder<Bytes>, ReaderError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(bytes)?;
    match footer_value(builder.metadata().file_metadata(), KEY_TABLE) {
        Some(found) if found == table => Ok(builder),
        found => Err(ReaderError::InvalidFormat(format!(
            "expected {} table, footer says {:?}",
            table, found
        ))),
    }
}

/// Decode the matrix table into the storage kind recorded in the manifest.
pub(super) fn decode_matrix(
    bytes: Bytes,
    manifest: &Manifest,
    batch_size: usize,
) -> Result<MatrixData, ReaderError> {
    let (n_rows, n_cols, nnz) = manifest
        .checked_shape()
        .map_err(|e| ReaderError::InvalidFormat(format!("manifest: {}", e)))?;
    // Each entry takes at least one byte of payload
    let capacity = nnz.min(bytes.len());

    let builder = open_table(bytes, "matrix")?;
    validate_matrix_schema(builder.schema())
        .map_err(|e| ReaderError::InvalidFormat(format!("matrix table: {}", e)))?;
    let reader = builder.with_batch_size(batch_size.max(1)).build()?;

    let mut assembler = match manifest.storage {
        StorageKind::Dense => EntryAssembler::dense(n_rows, n_cols, nnz, capacity),
        StorageKind::Sparse => EntryAssembler::sparse(n_rows, n_cols, capacity),
    };

    for batch in reader {
        let batch = batch?;
        let obs_index = get_uint32_column(&batch, columns::OBS_INDEX)?;
        let var_index = get_uint32_column(&batch, columns::VAR_INDEX)?;
        let values = get_float64_column(&batch, columns::VALUE)?;
        require_no_nulls(obs_index, columns::OBS_INDEX)?;
        require_no_nulls(var_index, columns::VAR_INDEX)?;
        require_no_nulls(values, columns::VALUE)?;
        for i in 0..batch.num_rows() {
            assembler.push(
                obs_index.value(i) as usize,
                var_index.value(i) as usize,
                values.value(i),
            )?;
        }
    }

    let matrix = assembler.finish()?;
    if matrix.nnz() as u64 != manifest.nnz {
        return Err(ReaderError::InvalidFormat(format!(
            "matrix table has {} entries, manifest declares {}",
            matrix.nnz(),
            manifest.nnz
        )));
    }
    debug!(
        "Decoded {}x{} {} matrix ({} entries)",
        n_rows,
        n_cols,
        matrix.storage(),
        matrix.nnz()
    );
    Ok(matrix)
}

/// Rebuilds matrix storage from row-major sorted entries.
enum EntryAssembler {
    Dense {
        n_rows: usize,
        n_cols: usize,
        cells: usize,
        values: Vec<f64>,
    },
    Sparse {
        n_rows: usize,
        n_cols: usize,
        indptr: Vec<usize>,
        indices: Vec<usize>,
        data: Vec<f64>,
        last: Option<(usize, usize)>,
    },
}

impl EntryAssembler {
    fn dense(n_rows: usize, n_cols: usize, cells: usize, capacity: usize) -> Self {
        EntryAssembler::Dense {
            n_rows,
            n_cols,
            cells,
            values: Vec::with_capacity(capacity),
        }
    }

    fn sparse(n_rows: usize, n_cols: usize, capacity: usize) -> Self {
        EntryAssembler::Sparse {
            n_rows,
            n_cols,
            indptr: vec![0; n_rows + 1],
            indices: Vec::with_capacity(capacity),
            data: Vec::with_capacity(capacity),
            last: None,
        }
    }

    fn push(&mut self, row: usize, col: usize, value: f64) -> Result<(), ReaderError> {
        match self {
            EntryAssembler::Dense {
                n_cols,
                cells,
                values,
                ..
            } => {
                // Dense tables hold every cell in row-major order
                let position = values.len();
                let expected = (position / (*n_cols).max(1), position % (*n_cols).max(1));
                if position >= *cells || (row, col) != expected {
                    return Err(ReaderError::InvalidFormat(format!(
                        "dense matrix entry ({}, {}) out of order, expected {:?}",
                        row, col, expected
                    )));
                }
                values.push(value);
            }
            EntryAssembler::Sparse {
                n_rows,
                n_cols,
                indptr,
                indices,
                data,
                last,
            } => {
                if row >= *n_rows || col >= *n_cols {
                    return Err(ReaderError::InvalidFormat(format!(
                        "sparse matrix entry ({}, {}) outside {}x{}",
                        row, col, n_rows, n_cols
                    )));
                }
                if last.is_some_and(|previous| (row, col) <= previous) {
                    return Err(ReaderError::InvalidFormat(format!(
                        "sparse matrix entry ({}, {}) is not in row-major order",
                        row, col
                    )));
                }
                *last = Some((row, col));
                indptr[row + 1] += 1;
                indices.push(col);
                data.push(value);
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<MatrixData, ReaderError> {
        match self {
            EntryAssembler::Dense {
                n_rows,
                n_cols,
                values,
                ..
            } => {
                let matrix = DenseMatrix::new(n_rows, n_cols, values)
                    .map_err(|e| ReaderError::InvalidFormat(format!("dense matrix: {}", e)))?;
                Ok(MatrixData::Dense(matrix))
            }
            EntryAssembler::Sparse {
                n_rows,
                n_cols,
                mut indptr,
                indices,
                data,
                ..
            } => {
                for row in 0..n_rows {
                    indptr[row + 1] += indptr[row];
                }
                let matrix = SparseMatrix::from_csr(n_rows, n_cols, indptr, indices, data)
                    .map_err(|e| ReaderError::InvalidFormat(format!("sparse matrix: {}", e)))?;
                Ok(MatrixData::Sparse(matrix))
            }
        }
    }
}

/// Decoded attribute table: identifiers (when the `_index` column is present)
/// and attribute columns in manifest order.
pub(super) struct DecodedAttributes {
    pub index: Option<Vec<String>>,
    pub table: AttributeTable,
}

/// Decode an attribute table (obs or var).
pub(super) fn decode_attributes(
    bytes: Bytes,
    table_name: &str,
    with_index: bool,
    descriptors: &[ColumnDescriptor],
    expected_rows: usize,
    batch_size: usize,
) -> Result<DecodedAttributes, ReaderError> {
    let builder = open_table(bytes, table_name)?;
    validate_attribute_schema(builder.schema(), with_index, descriptors)
        .map_err(|e| ReaderError::InvalidFormat(format!("{} table: {}", table_name, e)))?;
    let schema = builder.schema().clone();
    let reader = builder.with_batch_size(batch_size.max(1)).build()?;
    let batches = reader.collect::<Result<Vec<RecordBatch>, _>>()?;
    let batch = concat_batches(&schema, &batches)?;

    if batch.num_rows() != expected_rows {
        return Err(ReaderError::InvalidFormat(format!(
            "{} table has {} rows, manifest declares {}",
            table_name,
            batch.num_rows(),
            expected_rows
        )));
    }

    let index = if with_index {
        let names = get_string_column(&batch, columns::INDEX)?;
        require_no_nulls(names, columns::INDEX)?;
        Some(names.iter().flatten().map(str::to_string).collect())
    } else {
        None
    };

    let mut table = AttributeTable::with_capacity(descriptors.len());
    for descriptor in descriptors {
        let values = decode_attribute_column(&batch, descriptor)?;
        table.insert(descriptor.name.clone(), values);
    }

    debug!(
        "Decoded {} table: {} rows, {} attributes",
        table_name,
        batch.num_rows(),
        table.len()
    );
    Ok(DecodedAttributes { index, table })
}

fn decode_attribute_column(
    batch: &RecordBatch,
    descriptor: &ColumnDescriptor,
) -> Result<AttributeValues, ReaderError> {
    let column = descriptor.column.as_str();
    let values = match descriptor.kind {
        AttributeKind::String => {
            let array = get_string_column(batch, column)?;
            require_no_nulls(array, column)?;
            AttributeValues::Strings(array.iter().flatten().map(str::to_string).collect())
        }
        AttributeKind::Float => {
            let array = get_float64_column(batch, column)?;
            require_no_nulls(array, column)?;
            AttributeValues::Floats(array.values().to_vec())
        }
        AttributeKind::Integer => {
            let array = get_int64_column(batch, column)?;
            require_no_nulls(array, column)?;
            AttributeValues::Integers(array.values().to_vec())
        }
        AttributeKind::Boolean => {
            let array = get_boolean_column(batch, column)?;
            require_no_nulls(array, column)?;
            AttributeValues::Booleans(array.iter().flatten().collect())
        }
        AttributeKind::Categorical => {
            let array = get_int32_column(batch, column)?;
            let categories = descriptor.categories.clone().ok_or_else(|| {
                ReaderError::InvalidFormat(format!(
                    "categorical attribute '{}' has no categories in the manifest",
                    descriptor.name
                ))
            })?;
            AttributeValues::Categorical {
                codes: array.iter().map(|code| code.unwrap_or(-1)).collect(),
                categories,
            }
        }
    };
    Ok(values)
}

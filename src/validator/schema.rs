use anyhow::Result;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::reader::footer_value;
use crate::schema::{
    validate_attribute_schema, validate_matrix_schema, IndexLayout, Manifest, KEY_FORMAT_VERSION,
    KEY_TABLE, SCCONVERT_FORMAT_VERSION,
};

use super::{ContainerContents, ValidationCheck, ValidationReport};

/// Step 3: Schema contract validation for the three tables
pub(crate) fn check_schema_contract(
    contents: &ContainerContents,
    manifest: &Manifest,
    report: &mut ValidationReport,
) -> Result<()> {
    check_table(&contents.matrix, "matrix", manifest.nnz, report, |schema| {
        validate_matrix_schema(schema).map_err(|e| e.to_string())
    });
    check_table(&contents.obs, "obs", manifest.n_obs, report, |schema| {
        validate_attribute_schema(schema, true, &manifest.obs_columns).map_err(|e| e.to_string())
    });
    let var_index = manifest.index_layout == IndexLayout::Dedicated;
    check_table(&contents.var, "var", manifest.n_vars, report, |schema| {
        validate_attribute_schema(schema, var_index, &manifest.var_columns)
            .map_err(|e| e.to_string())
    });
    Ok(())
}

fn check_table<F>(
    bytes: &Bytes,
    table: &str,
    expected_rows: u64,
    report: &mut ValidationReport,
    validate: F,
) where
    F: FnOnce(&arrow::datatypes::Schema) -> std::result::Result<(), String>,
{
    let builder = match ParquetRecordBatchReaderBuilder::try_new(bytes.clone()) {
        Ok(builder) => builder,
        Err(e) => {
            report.add_check(ValidationCheck::failed(
                format!("{} table is valid Parquet", table),
                e.to_string(),
            ));
            return;
        }
    };
    report.add_check(ValidationCheck::ok(format!("{} table is valid Parquet", table)));

    let file_metadata = builder.metadata().file_metadata();
    match footer_value(file_metadata, KEY_TABLE) {
        Some(found) if found == table => {
            report.add_check(ValidationCheck::ok(format!("{} footer table tag", table)));
        }
        found => report.add_check(ValidationCheck::failed(
            format!("{} footer table tag", table),
            format!("expected '{}', found {:?}", table, found),
        )),
    }
    match footer_value(file_metadata, KEY_FORMAT_VERSION) {
        Some(SCCONVERT_FORMAT_VERSION) => {}
        found => report.add_check(ValidationCheck::warning(
            format!("{} footer format version", table),
            format!("expected '{}', found {:?}", SCCONVERT_FORMAT_VERSION, found),
        )),
    }

    match validate(builder.schema().as_ref()) {
        Ok(()) => report.add_check(ValidationCheck::ok(format!("{} schema", table))),
        Err(msg) => report.add_check(ValidationCheck::failed(format!("{} schema", table), msg)),
    }

    let rows = file_metadata.num_rows().max(0) as u64;
    if rows == expected_rows {
        report.add_check(ValidationCheck::ok(format!("{} row count ({})", table, rows)));
    } else {
        report.add_check(ValidationCheck::failed(
            format!("{} row count", table),
            format!("expected {}, found {}", expected_rows, rows),
        ));
    }
}

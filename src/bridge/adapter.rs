//! Term-for-term mapping between [`AnnotatedDataset`] and the two record kinds.

use indexmap::IndexMap;
use log::warn;

use super::schema::{
    RecordSchema, DEFAULT_ASSAY, FEATURE_MAJOR, FIELD_ASSAYS, FIELD_COLNAMES, FIELD_COL_DATA,
    FIELD_MAIN_ASSAY, FIELD_MATRIX_NAME, FIELD_OBS, FIELD_OBS_NAMES, FIELD_ROWNAMES,
    FIELD_ROW_DATA, FIELD_VAR, FIELD_VAR_NAMES, FIELD_X, OBSERVATION_MAJOR,
};
use super::value::{BridgeValue, RecordFields};
use super::ConversionError;
use crate::dataset::{AnnotatedDataset, AttributeTable, DatasetParts};
use crate::matrix::MatrixData;

/// Build an observation-major record from a dataset.
pub fn dataset_to_observation_major(dataset: AnnotatedDataset) -> BridgeValue {
    let parts = dataset.into_parts();
    let mut fields = RecordFields::new();
    fields.insert(FIELD_X.to_string(), BridgeValue::Matrix(parts.matrix));
    fields.insert(FIELD_OBS_NAMES.to_string(), BridgeValue::StrVec(parts.obs_names));
    fields.insert(FIELD_VAR_NAMES.to_string(), BridgeValue::StrVec(parts.var_names));
    fields.insert(FIELD_OBS.to_string(), BridgeValue::Frame(parts.obs));
    fields.insert(FIELD_VAR.to_string(), BridgeValue::Frame(parts.var));
    if let Some(name) = parts.matrix_name {
        fields.insert(FIELD_MATRIX_NAME.to_string(), BridgeValue::Str(name));
    }
    BridgeValue::record(OBSERVATION_MAJOR.class, fields)
}

/// Build a dataset from an observation-major record.
pub fn observation_major_to_dataset(value: BridgeValue) -> Result<AnnotatedDataset, ConversionError> {
    let schema = OBSERVATION_MAJOR;
    let mut fields = schema.into_fields(value)?;

    let matrix = take_matrix(&schema, &mut fields, FIELD_X)?;
    let (n_obs, n_vars) = matrix.shape();
    let obs_names = take_strings(&schema, &mut fields, FIELD_OBS_NAMES)?;
    check_len(FIELD_OBS_NAMES, n_obs, obs_names.len())?;
    let var_names = take_strings(&schema, &mut fields, FIELD_VAR_NAMES)?;
    check_len(FIELD_VAR_NAMES, n_vars, var_names.len())?;
    let obs = take_frame(&schema, &mut fields, FIELD_OBS)?;
    let var = take_frame(&schema, &mut fields, FIELD_VAR)?;
    let matrix_name = match fields.shift_remove(FIELD_MATRIX_NAME) {
        Some(BridgeValue::Str(name)) => Some(name),
        Some(other) => return Err(mismatch(&schema, FIELD_MATRIX_NAME, "character", &other)),
        None => None,
    };

    Ok(AnnotatedDataset::from_parts(DatasetParts {
        matrix,
        obs_names,
        var_names,
        obs,
        var,
        matrix_name,
    })?)
}

/// Build a feature-major record from a dataset.
///
/// The matrix is transposed to features x observations and stored as the only
/// assay. A tagged dataset names the assay after its tag and records it in
/// `mainAssay`; an untagged one uses `"X"` and leaves `mainAssay` out.
pub fn dataset_to_feature_major(dataset: AnnotatedDataset) -> BridgeValue {
    let parts = dataset.into_parts();
    let assay_name = parts
        .matrix_name
        .clone()
        .unwrap_or_else(|| DEFAULT_ASSAY.to_string());
    let mut assays = IndexMap::new();
    assays.insert(assay_name, BridgeValue::Matrix(parts.matrix.transpose()));

    let mut fields = RecordFields::new();
    fields.insert(FIELD_ASSAYS.to_string(), BridgeValue::List(assays));
    fields.insert(FIELD_COLNAMES.to_string(), BridgeValue::StrVec(parts.obs_names));
    fields.insert(FIELD_ROWNAMES.to_string(), BridgeValue::StrVec(parts.var_names));
    fields.insert(FIELD_COL_DATA.to_string(), BridgeValue::Frame(parts.obs));
    fields.insert(FIELD_ROW_DATA.to_string(), BridgeValue::Frame(parts.var));
    if let Some(name) = parts.matrix_name {
        fields.insert(FIELD_MAIN_ASSAY.to_string(), BridgeValue::Str(name));
    }
    BridgeValue::record(FEATURE_MAJOR.class, fields)
}

/// Build a dataset from a feature-major record.
///
/// With `mainAssay` set, that assay is converted and its name becomes the
/// matrix tag. Without it the first assay is converted, and an assay named
/// `"X"` maps back to an untagged matrix. Other assays are ignored.
pub fn feature_major_to_dataset(value: BridgeValue) -> Result<AnnotatedDataset, ConversionError> {
    let schema = FEATURE_MAJOR;
    let mut fields = schema.into_fields(value)?;

    let main_assay = match fields.shift_remove(FIELD_MAIN_ASSAY) {
        Some(BridgeValue::Str(name)) => Some(name),
        Some(other) => return Err(mismatch(&schema, FIELD_MAIN_ASSAY, "character", &other)),
        None => None,
    };
    let (assay_name, assay) = take_assay(&schema, &mut fields, main_assay.as_deref())?;
    let (n_vars, n_obs) = assay.shape();
    let obs_names = take_strings(&schema, &mut fields, FIELD_COLNAMES)?;
    check_len(FIELD_COLNAMES, n_obs, obs_names.len())?;
    let var_names = take_strings(&schema, &mut fields, FIELD_ROWNAMES)?;
    check_len(FIELD_ROWNAMES, n_vars, var_names.len())?;
    let obs = take_frame(&schema, &mut fields, FIELD_COL_DATA)?;
    let var = take_frame(&schema, &mut fields, FIELD_ROW_DATA)?;

    let matrix_name = match main_assay {
        Some(_) => Some(assay_name),
        None => (assay_name != DEFAULT_ASSAY).then_some(assay_name),
    };
    Ok(AnnotatedDataset::from_parts(DatasetParts {
        matrix: assay.transpose(),
        obs_names,
        var_names,
        obs,
        var,
        matrix_name,
    })?)
}

/// Remove the assay list and keep the assay named `wanted`, or the first one.
fn take_assay(
    schema: &RecordSchema,
    fields: &mut RecordFields,
    wanted: Option<&str>,
) -> Result<(String, MatrixData), ConversionError> {
    let mut assays = match fields.shift_remove(FIELD_ASSAYS) {
        Some(BridgeValue::List(assays)) => assays,
        Some(other) => return Err(mismatch(schema, FIELD_ASSAYS, "list", &other)),
        None => return Err(missing(schema, FIELD_ASSAYS)),
    };
    let selected = match wanted {
        Some(name) => assays
            .shift_remove_entry(name)
            .ok_or_else(|| missing(schema, &format!("{}.{}", FIELD_ASSAYS, name)))?,
        None => assays
            .shift_remove_index(0)
            .ok_or_else(|| missing(schema, FIELD_ASSAYS))?,
    };
    if !assays.is_empty() {
        let ignored: Vec<&str> = assays.keys().map(String::as_str).collect();
        warn!("Converting assay '{}' only; ignoring {:?}", selected.0, ignored);
    }
    match selected {
        (name, BridgeValue::Matrix(matrix)) => Ok((name, matrix)),
        (_, other) => Err(mismatch(schema, FIELD_ASSAYS, "matrix", &other)),
    }
}

fn take_matrix(
    schema: &RecordSchema,
    fields: &mut RecordFields,
    name: &str,
) -> Result<MatrixData, ConversionError> {
    match fields.shift_remove(name) {
        Some(BridgeValue::Matrix(matrix)) => Ok(matrix),
        Some(other) => Err(mismatch(schema, name, "matrix", &other)),
        None => Err(missing(schema, name)),
    }
}

fn take_strings(
    schema: &RecordSchema,
    fields: &mut RecordFields,
    name: &str,
) -> Result<Vec<String>, ConversionError> {
    match fields.shift_remove(name) {
        Some(BridgeValue::StrVec(values)) => Ok(values),
        Some(other) => Err(mismatch(schema, name, "character vector", &other)),
        None => Err(missing(schema, name)),
    }
}

fn take_frame(
    schema: &RecordSchema,
    fields: &mut RecordFields,
    name: &str,
) -> Result<AttributeTable, ConversionError> {
    match fields.shift_remove(name) {
        Some(BridgeValue::Frame(table)) => Ok(table),
        Some(other) => Err(mismatch(schema, name, "data frame", &other)),
        None => Err(missing(schema, name)),
    }
}

fn check_len(field: &str, expected: usize, found: usize) -> Result<(), ConversionError> {
    if expected != found {
        return Err(ConversionError::LengthMismatch {
            field: field.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

fn missing(schema: &RecordSchema, field: &str) -> ConversionError {
    ConversionError::MissingField {
        record: schema.class.to_string(),
        field: field.to_string(),
    }
}

fn mismatch(schema: &RecordSchema, field: &str, expected: &str, found: &BridgeValue) -> ConversionError {
    ConversionError::TypeMismatch {
        context: format!("{}.{}", schema.class, field),
        expected: expected.to_string(),
        found: found.type_name(),
    }
}

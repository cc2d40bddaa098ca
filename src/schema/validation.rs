use arrow::datatypes::{DataType, Schema};

use super::builders::attribute_data_type;
use super::columns;
use super::constants::FIELD_ATTRIBUTE_NAME;
use super::manifest::ColumnDescriptor;

/// Validates that a schema is a valid matrix table schema.
pub fn validate_matrix_schema(schema: &Schema) -> Result<(), SchemaValidationError> {
    let required_columns = [
        (columns::OBS_INDEX, DataType::UInt32),
        (columns::VAR_INDEX, DataType::UInt32),
        (columns::VALUE, DataType::Float64),
    ];
    for (name, expected_type) in required_columns {
        check_column(schema, name, &expected_type)?;
    }
    Ok(())
}

/// Validates an attribute table schema against the manifest's column descriptors.
///
/// Every described column must be present with the expected type and carry
/// the matching attribute name in its field metadata.
pub fn validate_attribute_schema(
    schema: &Schema,
    with_index: bool,
    descriptors: &[ColumnDescriptor],
) -> Result<(), SchemaValidationError> {
    if with_index {
        check_column(schema, columns::INDEX, &DataType::Utf8)?;
    } else if schema.field_with_name(columns::INDEX).is_ok() {
        return Err(SchemaValidationError::UnexpectedColumn(
            columns::INDEX.to_string(),
        ));
    }

    for descriptor in descriptors {
        check_column(
            schema,
            &descriptor.column,
            &attribute_data_type(descriptor.kind),
        )?;
        let field = schema
            .field_with_name(&descriptor.column)
            .map_err(|_| SchemaValidationError::MissingColumn(descriptor.column.clone()))?;
        match field.metadata().get(FIELD_ATTRIBUTE_NAME) {
            Some(name) if *name == descriptor.name => {}
            other => {
                return Err(SchemaValidationError::NameMismatch {
                    column: descriptor.column.clone(),
                    expected: descriptor.name.clone(),
                    found: other.cloned().unwrap_or_default(),
                })
            }
        }
    }
    Ok(())
}

fn check_column(
    schema: &Schema,
    name: &str,
    expected_type: &DataType,
) -> Result<(), SchemaValidationError> {
    match schema.field_with_name(name) {
        Ok(field) if field.data_type() == expected_type => Ok(()),
        Ok(field) => Err(SchemaValidationError::TypeMismatch {
            column: name.to_string(),
            expected: format!("{:?}", expected_type),
            found: format!("{:?}", field.data_type()),
        }),
        Err(_) => Err(SchemaValidationError::MissingColumn(name.to_string())),
    }
}

/// Errors that can occur during schema validation
#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    /// A required column is missing from the schema
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A column is present that the layout does not allow
    #[error("Unexpected column: {0}")]
    UnexpectedColumn(String),

    /// A column has an incorrect data type
    #[error("Type mismatch for column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Name of the column with the type mismatch
        column: String,
        /// Expected data type
        expected: String,
        /// Actual data type found
        found: String,
    },

    /// Field metadata names a different attribute than the manifest
    #[error("Column '{column}' holds attribute '{found}', manifest says '{expected}'")]
    NameMismatch {
        /// Parquet column name
        column: String,
        /// Attribute name from the manifest
        expected: String,
        /// Attribute name from the field metadata
        found: String,
    },
}

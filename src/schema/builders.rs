use std::collections::HashMap;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaBuilder, SchemaRef};

use super::columns;
use super::constants::{FIELD_ATTRIBUTE_KIND, FIELD_ATTRIBUTE_NAME};
use super::manifest::ColumnDescriptor;
use crate::dataset::AttributeKind;

/// Arrow type used to store an attribute kind.
pub fn attribute_data_type(kind: AttributeKind) -> DataType {
    match kind {
        AttributeKind::String => DataType::Utf8,
        AttributeKind::Float => DataType::Float64,
        AttributeKind::Integer => DataType::Int64,
        AttributeKind::Boolean => DataType::Boolean,
        // Codes; null marks a missing value
        AttributeKind::Categorical => DataType::Int32,
    }
}

/// Creates an attribute Field annotated with the attribute's real name and kind
fn attribute_field(descriptor: &ColumnDescriptor) -> Field {
    let mut metadata = HashMap::new();
    metadata.insert(FIELD_ATTRIBUTE_NAME.to_string(), descriptor.name.clone());
    metadata.insert(FIELD_ATTRIBUTE_KIND.to_string(), descriptor.kind.to_string());
    let nullable = descriptor.kind == AttributeKind::Categorical;
    Field::new(
        &descriptor.column,
        attribute_data_type(descriptor.kind),
        nullable,
    )
    .with_metadata(metadata)
}

/// Creates the Arrow schema of the matrix table.
///
/// The matrix is stored in "long" form: one row per stored entry, sorted by
/// `obs_index` then `var_index`.
///
/// ```
/// use scconvert::schema::create_matrix_schema;
///
/// let schema = create_matrix_schema();
/// assert_eq!(schema.fields().len(), 3);
/// ```
pub fn create_matrix_schema() -> Schema {
    let mut builder = SchemaBuilder::new();
    builder.push(Field::new(columns::OBS_INDEX, DataType::UInt32, false));
    builder.push(Field::new(columns::VAR_INDEX, DataType::UInt32, false));
    builder.push(Field::new(columns::VALUE, DataType::Float64, false));
    builder.finish()
}

/// Creates the matrix schema wrapped in an Arc
pub fn create_matrix_schema_arc() -> SchemaRef {
    Arc::new(create_matrix_schema())
}

/// Creates the Arrow schema of an attribute table (obs or var).
///
/// With `with_index` the first column is the `_index` identifier column;
/// attribute columns follow in descriptor order.
pub fn create_attribute_schema(with_index: bool, descriptors: &[ColumnDescriptor]) -> Schema {
    let mut builder = SchemaBuilder::new();
    if with_index {
        builder.push(Field::new(columns::INDEX, DataType::Utf8, false));
    }
    for descriptor in descriptors {
        builder.push(attribute_field(descriptor));
    }
    builder.finish()
}

/// Creates an attribute table schema wrapped in an Arc
pub fn create_attribute_schema_arc(
    with_index: bool,
    descriptors: &[ColumnDescriptor],
) -> SchemaRef {
    Arc::new(create_attribute_schema(with_index, descriptors))
}

use super::*;
use crate::dataset::AttributeKind;
use arrow::datatypes::{DataType, Field, Schema};

fn descriptors() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor {
            name: "Source.Name".to_string(),
            column: attribute_column_name(0),
            kind: AttributeKind::String,
            categories: None,
        },
        ColumnDescriptor {
            name: "cluster".to_string(),
            column: attribute_column_name(1),
            kind: AttributeKind::Categorical,
            categories: Some(vec!["a".to_string(), "b".to_string()]),
        },
    ]
}

#[test]
fn test_matrix_schema() {
    let schema = create_matrix_schema();
    assert!(validate_matrix_schema(&schema).is_ok());
    let value = schema.field_with_name(columns::VALUE).unwrap();
    assert_eq!(value.data_type(), &DataType::Float64);
    assert!(!value.is_nullable());
}

#[test]
fn test_matrix_schema_type_mismatch() {
    let schema = Schema::new(vec![
        Field::new(columns::OBS_INDEX, DataType::UInt32, false),
        Field::new(columns::VAR_INDEX, DataType::UInt32, false),
        Field::new(columns::VALUE, DataType::Float32, false),
    ]);
    let err = validate_matrix_schema(&schema).unwrap_err();
    assert!(matches!(err, SchemaValidationError::TypeMismatch { .. }));
}

#[test]
fn test_attribute_schema_metadata() {
    let schema = create_attribute_schema(true, &descriptors());
    assert_eq!(schema.fields().len(), 3);
    assert_eq!(schema.field(0).name(), columns::INDEX);

    let field = schema.field_with_name("attr_0000").unwrap();
    assert_eq!(
        field.metadata().get(FIELD_ATTRIBUTE_NAME).map(String::as_str),
        Some("Source.Name")
    );
    let cluster = schema.field_with_name("attr_0001").unwrap();
    assert_eq!(cluster.data_type(), &DataType::Int32);
    assert!(cluster.is_nullable());

    assert!(validate_attribute_schema(&schema, true, &descriptors()).is_ok());
}

#[test]
fn test_attribute_schema_layout_mismatch() {
    let with_index = create_attribute_schema(true, &descriptors());
    let err = validate_attribute_schema(&with_index, false, &descriptors()).unwrap_err();
    assert!(matches!(err, SchemaValidationError::UnexpectedColumn(_)));

    let without_index = create_attribute_schema(false, &descriptors());
    let err = validate_attribute_schema(&without_index, true, &descriptors()).unwrap_err();
    assert!(matches!(err, SchemaValidationError::MissingColumn(_)));
}

#[test]
fn test_attribute_schema_name_mismatch() {
    let schema = create_attribute_schema(false, &descriptors());
    let mut renamed = descriptors();
    renamed[0].name = "source_name".to_string();
    let err = validate_attribute_schema(&schema, false, &renamed).unwrap_err();
    assert!(matches!(err, SchemaValidationError::NameMismatch { .. }));
}

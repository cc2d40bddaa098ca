//! Record schemas for the two dataset representations.
//!
//! Conversion never guesses from the shape of a value: a record is accepted
//! only when its class and every field match a [`RecordSchema`].

use super::value::{BridgeValue, RecordFields};
use super::ConversionError;

/// Observation-major matrix field
pub const FIELD_X: &str = "X";
/// Observation identifiers
pub const FIELD_OBS_NAMES: &str = "obs_names";
/// Variable identifiers
pub const FIELD_VAR_NAMES: &str = "var_names";
/// Observation attributes
pub const FIELD_OBS: &str = "obs";
/// Variable attributes
pub const FIELD_VAR: &str = "var";
/// Matrix tag
pub const FIELD_MATRIX_NAME: &str = "matrix_name";

/// Named feature-major matrices
pub const FIELD_ASSAYS: &str = "assays";
/// Cell (column) identifiers
pub const FIELD_COLNAMES: &str = "colnames";
/// Feature (row) identifiers
pub const FIELD_ROWNAMES: &str = "rownames";
/// Cell attributes
pub const FIELD_COL_DATA: &str = "colData";
/// Feature attributes
pub const FIELD_ROW_DATA: &str = "rowData";
/// Assay holding the tagged matrix; absent for untagged datasets
pub const FIELD_MAIN_ASSAY: &str = "mainAssay";

/// Assay name used when the observation-major side has no matrix tag
pub const DEFAULT_ASSAY: &str = "X";

/// Expected type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// A numeric matrix
    Matrix,
    /// A character vector
    Strings,
    /// A data frame
    Frame,
    /// A non-empty named list of matrices
    MatrixList,
    /// A character scalar
    Str,
}

impl FieldType {
    /// True when `value` has this type
    pub fn matches(&self, value: &BridgeValue) -> bool {
        match (self, value) {
            (FieldType::Matrix, BridgeValue::Matrix(_)) => true,
            (FieldType::Strings, BridgeValue::StrVec(_)) => true,
            (FieldType::Frame, BridgeValue::Frame(_)) => true,
            (FieldType::MatrixList, BridgeValue::List(items)) => {
                !items.is_empty() && items.values().all(|v| matches!(v, BridgeValue::Matrix(_)))
            }
            (FieldType::Str, BridgeValue::Str(_)) => true,
            _ => false,
        }
    }

    /// Type description used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Matrix => "matrix",
            FieldType::Strings => "character vector",
            FieldType::Frame => "data frame",
            FieldType::MatrixList => "non-empty list of matrices",
            FieldType::Str => "character",
        }
    }
}

/// One declared field of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name
    pub name: &'static str,
    /// Expected type
    pub field_type: FieldType,
    /// Whether the field must be present
    pub required: bool,
}

impl FieldSpec {
    const fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: true,
        }
    }

    const fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: false,
        }
    }
}

/// Declared shape of a record class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSchema {
    /// Record class name
    pub class: &'static str,
    /// Declared fields
    pub fields: &'static [FieldSpec],
}

/// Observation-major (AnnData-like) record
pub const OBSERVATION_MAJOR: RecordSchema = RecordSchema {
    class: "AnnData",
    fields: &[
        FieldSpec::required(FIELD_X, FieldType::Matrix),
        FieldSpec::required(FIELD_OBS_NAMES, FieldType::Strings),
        FieldSpec::required(FIELD_VAR_NAMES, FieldType::Strings),
        FieldSpec::required(FIELD_OBS, FieldType::Frame),
        FieldSpec::required(FIELD_VAR, FieldType::Frame),
        FieldSpec::optional(FIELD_MATRIX_NAME, FieldType::Str),
    ],
};

/// Feature-major (SingleCellExperiment-like) record
pub const FEATURE_MAJOR: RecordSchema = RecordSchema {
    class: "SingleCellExperiment",
    fields: &[
        FieldSpec::required(FIELD_ASSAYS, FieldType::MatrixList),
        FieldSpec::required(FIELD_COLNAMES, FieldType::Strings),
        FieldSpec::required(FIELD_ROWNAMES, FieldType::Strings),
        FieldSpec::required(FIELD_COL_DATA, FieldType::Frame),
        FieldSpec::required(FIELD_ROW_DATA, FieldType::Frame),
        FieldSpec::optional(FIELD_MAIN_ASSAY, FieldType::Str),
    ],
};

impl RecordSchema {
    /// Declared field by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check class, required fields, field types and undeclared fields.
    pub fn validate(&self, value: &BridgeValue) -> Result<(), ConversionError> {
        let fields = self.record_fields(value)?;
        self.check_fields(fields)
    }

    /// Validate and take ownership of the record's fields.
    pub fn into_fields(&self, value: BridgeValue) -> Result<RecordFields, ConversionError> {
        self.validate(&value)?;
        match value {
            BridgeValue::Record { fields, .. } => Ok(fields),
            other => Err(self.not_a_record(&other)),
        }
    }

    fn record_fields<'a>(&self, value: &'a BridgeValue) -> Result<&'a RecordFields, ConversionError> {
        match value {
            BridgeValue::Record { class, fields } if class == self.class => Ok(fields),
            other => Err(self.not_a_record(other)),
        }
    }

    fn not_a_record(&self, value: &BridgeValue) -> ConversionError {
        ConversionError::TypeMismatch {
            context: "bridge input".to_string(),
            expected: format!("{} record", self.class),
            found: value.type_name(),
        }
    }

    fn check_fields(&self, fields: &RecordFields) -> Result<(), ConversionError> {
        for spec in self.fields {
            match fields.get(spec.name) {
                Some(value) if !spec.field_type.matches(value) => {
                    return Err(ConversionError::TypeMismatch {
                        context: format!("{}.{}", self.class, spec.name),
                        expected: spec.field_type.name().to_string(),
                        found: value.type_name(),
                    });
                }
                None if spec.required => {
                    return Err(ConversionError::MissingField {
                        record: self.class.to_string(),
                        field: spec.name.to_string(),
                    });
                }
                _ => {}
            }
        }
        if let Some(name) = fields.keys().find(|name| self.field(name).is_none()) {
            return Err(ConversionError::UnknownField {
                record: self.class.to_string(),
                field: name.clone(),
            });
        }
        Ok(())
    }
}

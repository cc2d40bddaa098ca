use indexmap::IndexMap;

use crate::dataset::AttributeTable;
use crate::matrix::MatrixData;

/// Named fields of a record, in order.
pub type RecordFields = IndexMap<String, BridgeValue>;

/// A value crossing the bridge.
///
/// Mirrors the handful of shapes the two ecosystems exchange: scalars,
/// character vectors, matrices, data frames, named lists and classed records.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeValue {
    /// Missing value
    Null,
    /// Logical scalar
    Bool(bool),
    /// Integer scalar
    Int(i64),
    /// Double scalar
    Float(f64),
    /// Character scalar
    Str(String),
    /// Character vector
    StrVec(Vec<String>),
    /// Numeric matrix, dense or sparse
    Matrix(MatrixData),
    /// Data frame: ordered named columns of equal length
    Frame(AttributeTable),
    /// Named list
    List(IndexMap<String, BridgeValue>),
    /// Classed record with named fields
    Record {
        /// Class name, e.g. `AnnData`
        class: String,
        /// Fields
        fields: RecordFields,
    },
}

impl BridgeValue {
    /// Build a record value.
    pub fn record(class: impl Into<String>, fields: RecordFields) -> Self {
        BridgeValue::Record {
            class: class.into(),
            fields,
        }
    }

    /// Short type description used in error messages
    pub fn type_name(&self) -> String {
        match self {
            BridgeValue::Null => "null".to_string(),
            BridgeValue::Bool(_) => "logical".to_string(),
            BridgeValue::Int(_) => "integer".to_string(),
            BridgeValue::Float(_) => "double".to_string(),
            BridgeValue::Str(_) => "character".to_string(),
            BridgeValue::StrVec(_) => "character vector".to_string(),
            BridgeValue::Matrix(m) => format!("{} matrix", m.storage()),
            BridgeValue::Frame(_) => "data frame".to_string(),
            BridgeValue::List(_) => "list".to_string(),
            BridgeValue::Record { class, .. } => format!("{} record", class),
        }
    }

    /// Record class, if this is a record
    pub fn class(&self) -> Option<&str> {
        match self {
            BridgeValue::Record { class, .. } => Some(class),
            _ => None,
        }
    }

    /// Record field by name, if this is a record
    pub fn field(&self, name: &str) -> Option<&BridgeValue> {
        match self {
            BridgeValue::Record { fields, .. } => fields.get(name),
            _ => None,
        }
    }
}

impl From<MatrixData> for BridgeValue {
    fn from(m: MatrixData) -> Self {
        BridgeValue::Matrix(m)
    }
}

impl From<Vec<String>> for BridgeValue {
    fn from(v: Vec<String>) -> Self {
        BridgeValue::StrVec(v)
    }
}

impl From<AttributeTable> for BridgeValue {
    fn from(t: AttributeTable) -> Self {
        BridgeValue::Frame(t)
    }
}

impl From<&str> for BridgeValue {
    fn from(s: &str) -> Self {
        BridgeValue::Str(s.to_string())
    }
}

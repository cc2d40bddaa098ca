use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping of attribute name to per-element values for one axis.
pub type AttributeTable = IndexMap<String, AttributeValues>;

/// Value type of an attribute column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    /// UTF-8 strings
    String,
    /// 64-bit floats
    Float,
    /// 64-bit signed integers
    Integer,
    /// Booleans
    Boolean,
    /// Integer codes into a list of category labels
    Categorical,
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AttributeKind::String => "string",
            AttributeKind::Float => "float",
            AttributeKind::Integer => "integer",
            AttributeKind::Boolean => "boolean",
            AttributeKind::Categorical => "categorical",
        };
        f.write_str(name)
    }
}

/// One attribute column: a value per observation or per variable.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValues {
    /// String values
    Strings(Vec<String>),
    /// Float values
    Floats(Vec<f64>),
    /// Integer values
    Integers(Vec<i64>),
    /// Boolean values
    Booleans(Vec<bool>),
    /// Categorical values; a code of `-1` marks a missing value
    Categorical {
        /// Index into `categories` per element
        codes: Vec<i32>,
        /// Category labels
        categories: Vec<String>,
    },
}

impl AttributeValues {
    /// Build a categorical column from labels, with categories in order of first appearance.
    pub fn categorical_from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lookup: IndexMap<String, i32> = IndexMap::new();
        let mut codes = Vec::new();
        for label in labels {
            let label = label.as_ref();
            let next = lookup.len() as i32;
            let code = *lookup.entry(label.to_string()).or_insert(next);
            codes.push(code);
        }
        AttributeValues::Categorical {
            codes,
            categories: lookup.into_keys().collect(),
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            AttributeValues::Strings(v) => v.len(),
            AttributeValues::Floats(v) => v.len(),
            AttributeValues::Integers(v) => v.len(),
            AttributeValues::Booleans(v) => v.len(),
            AttributeValues::Categorical { codes, .. } => codes.len(),
        }
    }

    /// True when the column has no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value type of this column
    pub fn kind(&self) -> AttributeKind {
        match self {
            AttributeValues::Strings(_) => AttributeKind::String,
            AttributeValues::Floats(_) => AttributeKind::Float,
            AttributeValues::Integers(_) => AttributeKind::Integer,
            AttributeValues::Booleans(_) => AttributeKind::Boolean,
            AttributeValues::Categorical { .. } => AttributeKind::Categorical,
        }
    }

    /// String values, if this is a string column
    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            AttributeValues::Strings(v) => Some(v),
            _ => None,
        }
    }

    /// Category labels, if this is a categorical column
    pub fn categories(&self) -> Option<&[String]> {
        match self {
            AttributeValues::Categorical { categories, .. } => Some(categories),
            _ => None,
        }
    }

    /// First code that is neither -1 nor a valid category index.
    pub(crate) fn invalid_code(&self) -> Option<(i32, usize)> {
        match self {
            AttributeValues::Categorical { codes, categories } => codes
                .iter()
                .copied()
                .find(|&c| c < -1 || (c >= 0 && c as usize >= categories.len()))
                .map(|c| (c, categories.len())),
            _ => None,
        }
    }

    /// Compare by value, treating float cells by bit pattern.
    pub fn bitwise_eq(&self, other: &AttributeValues) -> bool {
        match (self, other) {
            (AttributeValues::Floats(a), AttributeValues::Floats(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
            }
            _ => self == other,
        }
    }
}

impl From<Vec<String>> for AttributeValues {
    fn from(v: Vec<String>) -> Self {
        AttributeValues::Strings(v)
    }
}

impl From<Vec<&str>> for AttributeValues {
    fn from(v: Vec<&str>) -> Self {
        AttributeValues::Strings(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<f64>> for AttributeValues {
    fn from(v: Vec<f64>) -> Self {
        AttributeValues::Floats(v)
    }
}

impl From<Vec<i64>> for AttributeValues {
    fn from(v: Vec<i64>) -> Self {
        AttributeValues::Integers(v)
    }
}

impl From<Vec<bool>> for AttributeValues {
    fn from(v: Vec<bool>) -> Self {
        AttributeValues::Booleans(v)
    }
}

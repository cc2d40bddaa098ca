/// Column names as constants for type safety
/// Row (observation) position of a matrix entry
pub const OBS_INDEX: &str = "obs_index";
/// Column (variable) position of a matrix entry
pub const VAR_INDEX: &str = "var_index";
/// Matrix entry value
pub const VALUE: &str = "value";
/// Identifier column of the obs and var tables
pub const INDEX: &str = "_index";

/// Positional name of the Parquet column holding the attribute at `position`.
///
/// ```
/// assert_eq!(scconvert::schema::attribute_column_name(7), "attr_0007");
/// ```
pub fn attribute_column_name(position: usize) -> String {
    format!("attr_{:04}", position)
}

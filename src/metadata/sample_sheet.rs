use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, info};

use super::MetadataError;
use crate::dataset::{AnnotatedDataset, AttributeValues};

/// A per-sample annotation table: one header row, one row per sample.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleSheet {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SampleSheet {
    /// Read a sample sheet, comma-separated for `.csv` files and tab-separated otherwise.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, MetadataError> {
        let path = path.as_ref();
        let delimiter = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => b',',
            _ => b'\t',
        };
        let file = File::open(path)?;
        let sheet = Self::from_reader(BufReader::new(file), delimiter)?;
        debug!(
            "Read sample sheet {} ({} rows, {} columns)",
            path.display(),
            sheet.len(),
            sheet.headers.len()
        );
        Ok(sheet)
    }

    /// Parse a sample sheet from a reader.
    ///
    /// Header names are kept verbatim; short rows are padded with empty strings.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, MetadataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() {
            return Err(MetadataError::InvalidFormat("empty header row".to_string()));
        }

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            if record.len() > headers.len() {
                return Err(MetadataError::InvalidFormat(format!(
                    "row {} has {} fields, header has {}",
                    rows.len() + 1,
                    record.len(),
                    headers.len()
                )));
            }
            let mut row: Vec<String> = record.iter().map(|v| v.trim().to_string()).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Column names, in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of sample rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the sheet has no sample rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, if present
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Add every non-key sample sheet column as a string observation attribute.
///
/// Rows are aligned by matching `key_column` against the observation
/// identifiers. An observation without a row is an error unless
/// `allow_missing` is set, in which case its values are empty strings.
pub fn annotate_observations(
    mut dataset: AnnotatedDataset,
    sheet: &SampleSheet,
    key_column: &str,
    allow_missing: bool,
) -> Result<AnnotatedDataset, MetadataError> {
    let key_idx = sheet
        .column_index(key_column)
        .ok_or_else(|| MetadataError::MissingColumn(key_column.to_string()))?;

    let mut by_key: HashMap<&str, usize> = HashMap::with_capacity(sheet.len());
    for (i, row) in sheet.rows.iter().enumerate() {
        if by_key.insert(row[key_idx].as_str(), i).is_some() {
            return Err(MetadataError::InvalidFormat(format!(
                "duplicate key '{}' in column '{}'",
                row[key_idx], key_column
            )));
        }
    }

    let mut matched = Vec::with_capacity(dataset.n_obs());
    for name in dataset.obs_names() {
        match by_key.get(name.as_str()) {
            Some(&row) => matched.push(Some(row)),
            None if allow_missing => matched.push(None),
            None => return Err(MetadataError::UnmatchedSample(name.clone())),
        }
    }
    let n_matched = matched.iter().filter(|m| m.is_some()).count();

    for (col, header) in sheet.headers.iter().enumerate() {
        if col == key_idx {
            continue;
        }
        let values: Vec<String> = matched
            .iter()
            .map(|m| m.map(|row| sheet.rows[row][col].clone()).unwrap_or_default())
            .collect();
        dataset.add_obs(header.clone(), AttributeValues::Strings(values))?;
    }

    info!(
        "Annotated {}/{} observations with {} sample sheet columns",
        n_matched,
        dataset.n_obs(),
        sheet.headers.len() - 1
    );
    Ok(dataset)
}

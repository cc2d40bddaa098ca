use std::path::Path;

use anyhow::Result;

use crate::dataset::{normalize_attribute_name, AnnotatedDataset};
use crate::reader::{ContainerReader, ImportOptions};

use super::{ValidationCheck, ValidationReport};

/// Step 4: Data sanity validation
///
/// Runs a full import; the dataset constructor enforces every structural
/// invariant, so a successful import is the core check.
pub(crate) fn check_data_sanity(path: &Path, report: &mut ValidationReport) -> Result<()> {
    let dataset = match ContainerReader::open(path)
        .and_then(|mut reader| reader.read_dataset(&ImportOptions::default()))
    {
        Ok(dataset) => dataset,
        Err(e) => {
            report.add_check(ValidationCheck::failed("Dataset imports", e.to_string()));
            return Ok(());
        }
    };
    report.add_check(ValidationCheck::ok(format!(
        "Dataset imports ({}x{}, {})",
        dataset.n_obs(),
        dataset.n_vars(),
        dataset.storage()
    )));

    check_values(&dataset, report);
    check_identifiers(&dataset, report);
    check_attribute_names(&dataset, report);
    Ok(())
}

fn check_values(dataset: &AnnotatedDataset, report: &mut ValidationReport) {
    let non_finite = dataset
        .matrix()
        .entries()
        .filter(|(_, _, v)| !v.is_finite())
        .count();
    if non_finite == 0 {
        report.add_check(ValidationCheck::ok("Matrix values are finite"));
    } else {
        report.add_check(ValidationCheck::warning(
            "Matrix values are finite",
            format!("{} NaN or infinite values", non_finite),
        ));
    }
}

fn check_identifiers(dataset: &AnnotatedDataset, report: &mut ValidationReport) {
    if dataset.has_feature_id_quirk() {
        report.add_check(ValidationCheck::warning(
            "Variable identifiers",
            "identifiers are positional and the real ones are in the 'rownames' attribute; \
             import with fix_feature_ids to restore them",
        ));
    } else {
        report.add_check(ValidationCheck::ok("Variable identifiers"));
    }
}

fn check_attribute_names(dataset: &AnnotatedDataset, report: &mut ValidationReport) {
    let raw: Vec<&str> = dataset
        .obs()
        .keys()
        .filter(|name| normalize_attribute_name(name) != **name)
        .map(String::as_str)
        .collect();
    if raw.is_empty() {
        report.add_check(ValidationCheck::ok("Observation attribute names normalized"));
    } else {
        report.add_check(ValidationCheck::warning(
            "Observation attribute names normalized",
            format!("not normalized: {}", raw.join(", ")),
        ));
    }
}

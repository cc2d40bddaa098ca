use anyhow::Result;

use crate::dataset::AttributeKind;
use crate::schema::{
    attribute_column_name, ColumnDescriptor, IndexLayout, Manifest, SCCONVERT_FORMAT_VERSION,
};

use super::{ContainerContents, ValidationCheck, ValidationError, ValidationReport};

/// Step 2: Manifest integrity validation
pub(crate) fn check_manifest(
    contents: &ContainerContents,
    report: &mut ValidationReport,
) -> Result<Manifest> {
    let manifest: Manifest = match serde_json::from_slice(&contents.manifest) {
        Ok(manifest) => manifest,
        Err(e) => {
            report.add_check(ValidationCheck::failed("manifest.json parses", e.to_string()));
            anyhow::bail!(ValidationError::ManifestError(e.to_string()));
        }
    };
    report.add_check(ValidationCheck::ok("manifest.json parses"));

    let supported = SCCONVERT_FORMAT_VERSION.split('.').next();
    if manifest.format_version.split('.').next() == supported {
        report.add_check(ValidationCheck::ok(format!(
            "Format version {}",
            manifest.format_version
        )));
    } else {
        report.add_check(ValidationCheck::failed(
            "Format version",
            format!(
                "Unsupported version {}, expected {}",
                manifest.format_version, SCCONVERT_FORMAT_VERSION
            ),
        ));
    }

    check_nnz(&manifest, report);
    check_descriptors("obs", &manifest.obs_columns, report);
    check_descriptors("var", &manifest.var_columns, report);

    if manifest.index_layout == IndexLayout::Attribute {
        report.add_check(ValidationCheck::warning(
            "Index layout",
            "variable identifiers are stored as a 'rownames' attribute",
        ));
    } else {
        report.add_check(ValidationCheck::ok("Index layout: dedicated"));
    }

    Ok(manifest)
}

fn check_nnz(manifest: &Manifest, report: &mut ValidationReport) {
    let name = format!(
        "Shape {}x{}, {} entries ({})",
        manifest.n_obs, manifest.n_vars, manifest.nnz, manifest.storage
    );
    match manifest.checked_shape() {
        Ok(_) => report.add_check(ValidationCheck::ok(name)),
        Err(e) => report.add_check(ValidationCheck::failed(name, e)),
    }
}

fn check_descriptors(table: &str, descriptors: &[ColumnDescriptor], report: &mut ValidationReport) {
    let name = format!("{} column descriptors", table);
    for (pos, descriptor) in descriptors.iter().enumerate() {
        let expected = attribute_column_name(pos);
        if descriptor.column != expected {
            report.add_check(ValidationCheck::failed(
                name,
                format!(
                    "attribute '{}' is stored in '{}', expected '{}'",
                    descriptor.name, descriptor.column, expected
                ),
            ));
            return;
        }
        let is_categorical = descriptor.kind == AttributeKind::Categorical;
        if is_categorical != descriptor.categories.is_some() {
            report.add_check(ValidationCheck::failed(
                name,
                format!(
                    "attribute '{}' of kind {} has inconsistent categories",
                    descriptor.name, descriptor.kind
                ),
            ));
            return;
        }
    }

    let mut seen = std::collections::HashSet::new();
    if let Some(dup) = descriptors.iter().find(|d| !seen.insert(d.name.as_str())) {
        report.add_check(ValidationCheck::failed(
            name,
            format!("duplicate attribute name '{}'", dup.name),
        ));
        return;
    }
    report.add_check(ValidationCheck::ok(format!("{} ({})", name, descriptors.len())));
}

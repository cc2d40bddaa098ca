use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::Result;
use bytes::Bytes;
use zip::{CompressionMethod, ZipArchive};

use crate::schema::{
    MANIFEST_ENTRY, MATRIX_ENTRY, MIMETYPE_ENTRY, OBS_ENTRY, SCCONVERT_MIMETYPE, VAR_ENTRY,
};

use super::{ContainerContents, ValidationCheck, ValidationError, ValidationReport};

/// Step 1: Structure validation
pub(crate) fn check_structure(path: &Path, report: &mut ValidationReport) -> Result<ContainerContents> {
    if !path.exists() {
        report.add_check(ValidationCheck::failed(
            "Path exists",
            format!("Path does not exist: {}", path.display()),
        ));
        anyhow::bail!(ValidationError::StructureError("Path does not exist".to_string()));
    }
    report.add_check(ValidationCheck::ok("Path exists"));

    if !path.is_file() {
        report.add_check(ValidationCheck::failed("Regular file", "Path is not a file"));
        anyhow::bail!(ValidationError::StructureError("Path is not a file".to_string()));
    }

    let file = File::open(path)?;
    let mut archive = match ZipArchive::new(BufReader::new(file)) {
        Ok(archive) => archive,
        Err(e) => {
            report.add_check(ValidationCheck::failed("ZIP container", e.to_string()));
            anyhow::bail!(ValidationError::StructureError(format!("Not a ZIP container: {}", e)));
        }
    };
    report.add_check(ValidationCheck::ok("ZIP container"));

    if archive.len() == 0 {
        report.add_check(ValidationCheck::failed("ZIP structure", "Empty ZIP archive"));
        anyhow::bail!(ValidationError::StructureError("Empty ZIP archive".to_string()));
    }

    check_mimetype(&mut archive, report)?;

    // Manifest should be deflated, tables must be stored
    let manifest = read_required(&mut archive, MANIFEST_ENTRY, CompressionMethod::Deflated, false, report)?;
    let matrix = read_required(&mut archive, MATRIX_ENTRY, CompressionMethod::Stored, true, report)?;
    let obs = read_required(&mut archive, OBS_ENTRY, CompressionMethod::Stored, true, report)?;
    let var = read_required(&mut archive, VAR_ENTRY, CompressionMethod::Stored, true, report)?;

    let known = [MIMETYPE_ENTRY, MANIFEST_ENTRY, MATRIX_ENTRY, OBS_ENTRY, VAR_ENTRY];
    let extra: Vec<&str> = archive.file_names().filter(|n| !known.contains(n)).collect();
    if !extra.is_empty() {
        report.add_check(ValidationCheck::warning(
            "No unexpected entries",
            format!("Ignored entries: {}", extra.join(", ")),
        ));
    }

    match (manifest, matrix, obs, var) {
        (Some(manifest), Some(matrix), Some(obs), Some(var)) => Ok(ContainerContents {
            manifest,
            matrix,
            obs,
            var,
        }),
        _ => anyhow::bail!(ValidationError::StructureError(
            "Missing required entries".to_string()
        )),
    }
}

/// The first entry must be an uncompressed mimetype with the container MIME type
fn check_mimetype(
    archive: &mut ZipArchive<BufReader<File>>,
    report: &mut ValidationReport,
) -> Result<()> {
    let mut first_entry = archive.by_index(0)?;
    if first_entry.name() != MIMETYPE_ENTRY {
        report.add_check(ValidationCheck::failed(
            "mimetype entry",
            format!("First entry must be 'mimetype', found: {}", first_entry.name()),
        ));
        return Ok(());
    }
    report.add_check(ValidationCheck::ok("mimetype is first entry"));

    if first_entry.compression() != CompressionMethod::Stored {
        report.add_check(ValidationCheck::failed(
            "mimetype compression",
            "mimetype entry must be uncompressed (Stored)",
        ));
    } else {
        report.add_check(ValidationCheck::ok("mimetype is uncompressed"));
    }

    let mut content = String::new();
    first_entry.read_to_string(&mut content)?;
    if content != SCCONVERT_MIMETYPE {
        report.add_check(ValidationCheck::failed(
            "mimetype content",
            format!("Expected '{}', found: '{}'", SCCONVERT_MIMETYPE, content),
        ));
    } else {
        report.add_check(ValidationCheck::ok(format!("mimetype = {}", SCCONVERT_MIMETYPE)));
    }
    Ok(())
}

/// Read a required entry, recording presence and compression checks.
///
/// A wrong compression method is a failure when `strict`, a warning otherwise.
fn read_required(
    archive: &mut ZipArchive<BufReader<File>>,
    name: &str,
    expected: CompressionMethod,
    strict: bool,
    report: &mut ValidationReport,
) -> Result<Option<Bytes>> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(_) => {
            report.add_check(ValidationCheck::failed(
                format!("{} exists", name),
                format!("Missing {} in container", name),
            ));
            return Ok(None);
        }
    };
    report.add_check(ValidationCheck::ok(format!("{} exists", name)));

    let check_name = format!("{} compression", name);
    if entry.compression() == expected {
        report.add_check(ValidationCheck::ok(check_name));
    } else {
        let message = format!("expected {:?}, found {:?}", expected, entry.compression());
        if strict {
            report.add_check(ValidationCheck::failed(check_name, message));
        } else {
            report.add_check(ValidationCheck::warning(check_name, message));
        }
    }

    let mut buffer = Vec::new();
    entry.read_to_end(&mut buffer)?;
    Ok(Some(Bytes::from(buffer)))
}

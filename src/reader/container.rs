use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use log::{debug, info, warn};
use zip::ZipArchive;

use super::tables::{decode_attributes, decode_matrix};
use super::{ImportOptions, ReaderError};
use crate::dataset::{positional_names, AnnotatedDataset, DatasetParts};
use crate::schema::{
    IndexLayout, Manifest, MANIFEST_ENTRY, MATRIX_ENTRY, MIMETYPE_ENTRY, OBS_ENTRY,
    SCCONVERT_FORMAT_VERSION, SCCONVERT_MIMETYPE, VAR_ENTRY,
};

/// An opened `.scmat` container.
///
/// Opening checks the mimetype entry and parses the manifest; tables are only
/// decoded by [`ContainerReader::read_dataset`].
pub struct ContainerReader {
    path: PathBuf,
    archive: ZipArchive<BufReader<File>>,
    manifest: Manifest,
}

impl ContainerReader {
    /// Open a container and parse its manifest.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ReaderError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(ReaderError::NotFound(path));
        }

        let file = File::open(&path)?;
        let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|e| {
            ReaderError::InvalidFormat(format!("{} is not a ZIP container: {}", path.display(), e))
        })?;

        check_mimetype(&mut archive)?;

        let manifest_bytes = read_entry_bytes(&mut archive, MANIFEST_ENTRY)?;
        let manifest: Manifest = serde_json::from_slice(&manifest_bytes)?;
        let supported_major = SCCONVERT_FORMAT_VERSION.split('.').next();
        if manifest.format_version.split('.').next() != supported_major {
            return Err(ReaderError::UnsupportedVersion(manifest.format_version));
        }
        manifest
            .checked_shape()
            .map_err(|e| ReaderError::InvalidFormat(format!("manifest: {}", e)))?;
        debug!(
            "Opened {} (format {}, {}x{}, {})",
            path.display(),
            manifest.format_version,
            manifest.n_obs,
            manifest.n_vars,
            manifest.storage
        );

        Ok(Self {
            path,
            archive,
            manifest,
        })
    }

    /// Container path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parsed manifest
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Names of all entries, in archive order
    pub fn entry_names(&self) -> Vec<String> {
        self.archive.file_names().map(str::to_string).collect()
    }

    /// Read one entry fully into memory.
    pub fn read_entry(&mut self, name: &str) -> Result<Bytes, ReaderError> {
        read_entry_bytes(&mut self.archive, name)
    }

    /// Decode every table and assemble the dataset.
    ///
    /// Containers written with the attribute index layout come back with
    /// positional variable identifiers and the real identifiers in a
    /// `rownames` variable attribute, unless `options.fix_feature_ids` is set.
    pub fn read_dataset(&mut self, options: &ImportOptions) -> Result<AnnotatedDataset, ReaderError> {
        let manifest = self.manifest.clone();
        let (n_obs, n_vars, _) = manifest
            .checked_shape()
            .map_err(|e| ReaderError::InvalidFormat(format!("manifest: {}", e)))?;

        // Attribute tables first: their row counts confirm the declared shape
        // before the matrix buffers are sized from it.
        let obs_bytes = self.read_entry(OBS_ENTRY)?;
        let obs = decode_attributes(
            obs_bytes,
            "obs",
            true,
            &manifest.obs_columns,
            n_obs,
            options.batch_size,
        )?;

        let dedicated = manifest.index_layout == IndexLayout::Dedicated;
        let var_bytes = self.read_entry(VAR_ENTRY)?;
        let var = decode_attributes(
            var_bytes,
            "var",
            dedicated,
            &manifest.var_columns,
            n_vars,
            options.batch_size,
        )?;

        let matrix_bytes = self.read_entry(MATRIX_ENTRY)?;
        let matrix = decode_matrix(matrix_bytes, &manifest, options.batch_size)?;

        let var_names = match var.index {
            Some(names) => names,
            None => {
                warn!(
                    "{}: variable identifiers are stored as an attribute; \
                     using positional identifiers",
                    self.path.display()
                );
                positional_names(n_vars)
            }
        };

        let dataset = AnnotatedDataset::from_parts(DatasetParts {
            matrix,
            obs_names: obs.index.unwrap_or_default(),
            var_names,
            obs: obs.table,
            var: var.table,
            matrix_name: manifest.matrix_name.clone(),
        })?;

        let dataset = if options.fix_feature_ids && dataset.has_feature_id_quirk() {
            info!("Moving variable identifiers back into the identifier slot");
            dataset.normalize_feature_ids()?
        } else {
            dataset
        };

        info!(
            "Imported {}x{} {} matrix from {}",
            n_obs,
            n_vars,
            dataset.storage(),
            self.path.display()
        );
        Ok(dataset)
    }
}

/// The first entry must be an uncompressed `mimetype` holding the container MIME type.
fn check_mimetype(archive: &mut ZipArchive<BufReader<File>>) -> Result<(), ReaderError> {
    if archive.len() == 0 {
        return Err(ReaderError::InvalidFormat("empty ZIP archive".to_string()));
    }
    let mut entry = archive.by_index(0)?;
    if entry.name() != MIMETYPE_ENTRY {
        return Err(ReaderError::InvalidFormat(format!(
            "first entry is '{}', expected '{}'",
            entry.name(),
            MIMETYPE_ENTRY
        )));
    }
    let mut content = String::new();
    entry.read_to_string(&mut content)?;
    if content.trim() != SCCONVERT_MIMETYPE {
        return Err(ReaderError::InvalidFormat(format!(
            "mimetype is '{}', expected '{}'",
            content.trim(),
            SCCONVERT_MIMETYPE
        )));
    }
    Ok(())
}

fn read_entry_bytes(
    archive: &mut ZipArchive<BufReader<File>>,
    name: &str,
) -> Result<Bytes, ReaderError> {
    let mut entry = archive
        .by_name(name)
        .map_err(|_| ReaderError::MissingEntry(name.to_string()))?;
    let mut buffer = Vec::new();
    entry.read_to_end(&mut buffer)?;
    Ok(Bytes::from(buffer))
}

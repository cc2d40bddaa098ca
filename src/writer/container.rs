use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::WriterError;
use crate::schema::{MIMETYPE_ENTRY, SCCONVERT_MIMETYPE};

/// Assembles a container in a temporary file next to its destination.
///
/// Nothing is visible at the destination until [`ContainerWriter::finish`]
/// renames the temporary file over it. Dropping the writer, or any error
/// before that rename, removes the temporary file and leaves the destination
/// untouched.
pub struct ContainerWriter {
    output_path: PathBuf,
    temp_file: NamedTempFile,
    zip_writer: ZipWriter<BufWriter<File>>,
}

impl ContainerWriter {
    /// Start a container that will be persisted at `path`.
    ///
    /// The mimetype entry is written immediately (Stored, first entry).
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, WriterError> {
        let output_path = path.as_ref().to_path_buf();

        if output_path.as_os_str().is_empty() {
            return Err(WriterError::InvalidData("Empty output path".to_string()));
        }

        // Create parent directories if needed
        let parent = match output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                if !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
                parent.to_path_buf()
            }
            _ => PathBuf::from("."),
        };

        // Same directory as the destination, so the final rename never crosses filesystems
        let temp_file = NamedTempFile::new_in(&parent)?;
        let file = temp_file.reopen()?;
        let mut zip_writer = ZipWriter::new(BufWriter::new(file));

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .unix_permissions(0o644);
        zip_writer.start_file(MIMETYPE_ENTRY, options)?;
        zip_writer.write_all(SCCONVERT_MIMETYPE.as_bytes())?;

        Ok(Self {
            output_path,
            temp_file,
            zip_writer,
        })
    }

    /// Add a pretty-printed JSON entry (Deflate compressed).
    pub fn add_json<T: Serialize>(&mut self, name: &str, value: &T) -> Result<(), WriterError> {
        let json = serde_json::to_string_pretty(value)?;
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);
        self.zip_writer.start_file(name, options)?;
        self.zip_writer.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Add a Parquet entry. Parquet entries MUST be Stored so they stay seekable.
    pub fn add_parquet(&mut self, name: &str, bytes: &[u8]) -> Result<(), WriterError> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .unix_permissions(0o644)
            .large_file(bytes.len() as u64 >= u32::MAX as u64);
        self.zip_writer.start_file(name, options)?;
        self.zip_writer.write_all(bytes)?;
        Ok(())
    }

    /// Destination path
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Finalize the archive and atomically move it to the destination.
    ///
    /// Returns the final file size in bytes.
    pub fn finish(self) -> Result<u64, WriterError> {
        let Self {
            output_path,
            temp_file,
            zip_writer,
        } = self;

        let buf_writer = zip_writer.finish()?;
        let file = buf_writer.into_inner().map_err(|e| {
            WriterError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to flush ZIP buffer: {}", e.error()),
            ))
        })?;
        file.sync_all()?;
        drop(file);

        temp_file
            .persist(&output_path)
            .map_err(|e| WriterError::IoError(e.error))?;

        Ok(fs::metadata(&output_path)?.len())
    }
}

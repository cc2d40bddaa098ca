use std::fmt;

use crate::matrix::StorageKind;

/// Statistics from a completed export
#[derive(Debug, Clone)]
pub struct ExportStats {
    /// Number of observations written
    pub n_obs: usize,
    /// Number of variables written
    pub n_vars: usize,
    /// Number of matrix entries written
    pub entries_written: usize,
    /// Matrix storage kind
    pub storage: StorageKind,
    /// Size of the encoded matrix table in bytes
    pub matrix_bytes: u64,
    /// Total container size in bytes
    pub file_size_bytes: u64,
}

impl fmt::Display for ExportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {}x{} {} matrix ({} entries), {} bytes total",
            self.n_obs, self.n_vars, self.storage, self.entries_written, self.file_size_bytes
        )
    }
}

/// Options for importing a container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Batch size for reading records
    pub batch_size: usize,
    /// Move variable identifiers stored as a `rownames` attribute back into
    /// the identifier slot after import
    pub fix_feature_ids: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            batch_size: 65536,
            fix_feature_ids: false,
        }
    }
}

impl ImportOptions {
    /// Same options with `fix_feature_ids` set
    pub fn with_fix_feature_ids(mut self, fix: bool) -> Self {
        self.fix_feature_ids = fix;
        self
    }
}

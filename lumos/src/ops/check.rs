//! Check operation - config and registry validation summary.

use std::path::{Path, PathBuf};

use lumos_config::Registry;

/// Summary of a validated config and registry pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub config_path: PathBuf,
    pub facades: usize,
    pub methods: usize,
    pub models: usize,
    pub columns: usize,
}

/// Execute the check operation.
///
/// Parsing already validated both files, so this only gathers the summary.
pub fn check(config_path: &Path, registry: &Registry) -> CheckReport {
    CheckReport {
        config_path: config_path.to_path_buf(),
        facades: registry.facades.len(),
        methods: registry.method_count(),
        models: registry.models.len(),
        columns: registry.column_count(),
    }
}

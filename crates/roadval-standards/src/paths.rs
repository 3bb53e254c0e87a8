//! Schema file resolution.

use std::path::{Path, PathBuf};

/// Environment variable pointing at an override schema file.
pub const SCHEMAS_ENV_VAR: &str = "ROADVAL_SCHEMAS";

/// Resolves the schema override to load, if any.
///
/// Resolution order:
/// 1. an explicit path (the CLI `--schemas` flag)
/// 2. `ROADVAL_SCHEMAS` environment variable
///
/// `None` means the built-in schemas are used.
pub fn schemas_override(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    std::env::var_os(SCHEMAS_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

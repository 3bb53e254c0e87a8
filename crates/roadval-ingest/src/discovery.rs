//! File discovery for export folders.

use std::path::{Path, PathBuf};

use roadval_standards::SchemaRegistry;
use tracing::warn;

use crate::error::{IngestError, Result};

/// Lists all CSV files in a directory, sorted by file name.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// CSV files matched to registered tables.
#[derive(Debug, Default)]
pub struct Discovery {
    /// `(table name, path)` in registry order.
    pub matched: Vec<(String, PathBuf)>,
    pub unknown: Vec<PathBuf>,
}

/// Matches CSV file stems to registry table names, ignoring case.
///
/// A second file for an already matched table is treated as unknown.
pub fn discover_tables(dir: &Path, registry: &SchemaRegistry) -> Result<Discovery> {
    let mut matched: Vec<(String, PathBuf)> = Vec::new();
    let mut unknown = Vec::new();

    for path in list_csv_files(dir)? {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        match registry.find_ignore_case(stem) {
            Some(schema) if !matched.iter().any(|(name, _)| name == &schema.name) => {
                matched.push((schema.name.clone(), path));
            }
            Some(schema) => {
                warn!(
                    table = %schema.name,
                    path = %path.display(),
                    "duplicate export for table, ignoring"
                );
                unknown.push(path);
            }
            None => unknown.push(path),
        }
    }

    let order: Vec<&str> = registry.names().collect();
    matched.sort_by_key(|(name, _)| order.iter().position(|n| n == name));

    Ok(Discovery { matched, unknown })
}

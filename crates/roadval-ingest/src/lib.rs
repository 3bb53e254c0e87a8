//! Loading survey tables from an export folder.
//!
//! Every table arrives as CSV, is read with polars with all columns as text,
//! and is converted into a [`roadval_model::Table`]. Type coercion is left
//! to the validators so the original cell text survives into reports.

pub mod discovery;
pub mod error;
pub mod frame;
pub mod reader;

pub use discovery::{Discovery, discover_tables, list_csv_files};
pub use error::{IngestError, Result};
pub use frame::{table_from_dataframe, value_from_any};
pub use reader::{MAX_CSV_FILE_SIZE, read_csv_frame, read_table};

use std::path::{Path, PathBuf};

use roadval_model::Table;
use roadval_standards::SchemaRegistry;
use tracing::{debug, info_span, warn};

/// A registered table whose file could not be read.
#[derive(Debug)]
pub struct UnreadableTable {
    pub table: String,
    pub path: PathBuf,
    pub error: IngestError,
}

/// Tables read from one export folder.
#[derive(Debug, Default)]
pub struct LoadedTables {
    /// In registry order.
    pub tables: Vec<Table>,
    /// Matched files that failed to read; the other tables are unaffected.
    pub unreadable: Vec<UnreadableTable>,
    /// CSV files that match no registered table.
    pub unknown_files: Vec<PathBuf>,
}

impl LoadedTables {
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// `(table, reason)` for every unreadable file.
    pub fn unreadable_reasons(&self) -> Vec<(String, String)> {
        self.unreadable
            .iter()
            .map(|u| (u.table.clone(), u.error.to_string()))
            .collect()
    }
}

/// Discovers and reads every registered table present in `dir`.
///
/// Only folder-level problems are errors. A file that fails to read is
/// collected in [`LoadedTables::unreadable`].
pub fn load_tables(dir: &Path, registry: &SchemaRegistry) -> Result<LoadedTables> {
    let span = info_span!("load_tables", dir = %dir.display());
    let _guard = span.enter();

    let discovery = discover_tables(dir, registry)?;
    let mut tables = Vec::with_capacity(discovery.matched.len());
    let mut unreadable = Vec::new();
    for (name, path) in discovery.matched {
        match read_table(&name, &path) {
            Ok(table) => {
                debug!(
                    table = %name,
                    rows = table.len(),
                    columns = table.columns.len(),
                    "read table"
                );
                tables.push(table);
            }
            Err(error) => {
                warn!(table = %name, path = %path.display(), %error, "table file unreadable");
                unreadable.push(UnreadableTable {
                    table: name,
                    path,
                    error,
                });
            }
        }
    }
    Ok(LoadedTables {
        tables,
        unreadable,
        unknown_files: discovery.unknown,
    })
}

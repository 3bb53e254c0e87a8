#![deny(unsafe_code)]

use roadval_model::TableSchema;
use serde::{Deserialize, Serialize};

pub const MANIFEST_SCHEMA: &str = "roadval.table-schemas";
pub const MANIFEST_SCHEMA_VERSION: u32 = 1;

/// Top-level layout of a schema TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaFile {
    pub manifest: ManifestHeader,
    #[serde(default, rename = "table")]
    pub tables: Vec<TableSchema>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub schema: String,
    pub schema_version: u32,
}

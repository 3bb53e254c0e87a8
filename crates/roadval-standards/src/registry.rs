#![deny(unsafe_code)]

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use roadval_model::columns::{
    CHAINAGE_FROM, CHAINAGE_RB, CHAINAGE_TO, CONTINUITY_GROUP, GPS_EAST, GPS_NORTH, LINK_NO,
    PROVINCE_CODE, REFERENCE_TABLE,
};
use roadval_model::{FieldKind, TableSchema};
use tracing::debug;

use crate::error::{Result, StandardsError};
use crate::hash::sha256_hex;
use crate::manifest::{MANIFEST_SCHEMA, MANIFEST_SCHEMA_VERSION, SchemaFile};
use crate::paths::schemas_override;

const BUILTIN_SCHEMAS: &str = include_str!("../schemas/road_tables.toml");

/// Where the loaded schemas came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    Builtin,
    File(PathBuf),
}

impl fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => f.write_str("built-in"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Immutable set of table schemas, in declaration order.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    tables: Vec<TableSchema>,
    source: SchemaSource,
    sha256: String,
}

impl SchemaRegistry {
    /// Schemas compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_SCHEMAS, SchemaSource::Builtin)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
        Self::from_toml_str(&contents, SchemaSource::File(path.to_path_buf()))
    }

    /// Loads the override file when one is configured, otherwise the built-in schemas.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match schemas_override(explicit) {
            Some(path) => Self::load_file(&path),
            None => Self::builtin(),
        }
    }

    pub fn from_toml_str(contents: &str, source: SchemaSource) -> Result<Self> {
        let file: SchemaFile = toml::from_str(contents).map_err(|e| StandardsError::Toml {
            origin: source.to_string(),
            source: e,
        })?;
        validate_file(&file)?;
        debug!(
            source = %source,
            tables = file.tables.len(),
            "loaded table schemas"
        );
        Ok(Self {
            tables: file.tables,
            source,
            sha256: sha256_hex(contents.as_bytes()),
        })
    }

    pub fn get(&self, table: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|t| t.name == table)
    }

    /// Case-insensitive lookup, for matching exported file names.
    pub fn find_ignore_case(&self, table: &str) -> Option<&TableSchema> {
        self.tables
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(table))
    }

    pub fn require(&self, table: &str) -> Result<&TableSchema> {
        self.get(table).ok_or_else(|| StandardsError::UnknownTable {
            table: table.to_string(),
        })
    }

    pub fn tables(&self) -> &[TableSchema] {
        &self.tables
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn source(&self) -> &SchemaSource {
        &self.source
    }

    /// SHA-256 of the schema source text.
    pub fn sha256(&self) -> &str {
        &self.sha256
    }
}

fn validate_file(file: &SchemaFile) -> Result<()> {
    if file.manifest.schema != MANIFEST_SCHEMA {
        return Err(StandardsError::InvalidManifest {
            message: format!("unsupported schema: {}", file.manifest.schema),
        });
    }
    if file.manifest.schema_version != MANIFEST_SCHEMA_VERSION {
        return Err(StandardsError::InvalidManifest {
            message: format!(
                "unsupported schema_version: {}",
                file.manifest.schema_version
            ),
        });
    }
    if file.tables.is_empty() {
        return Err(StandardsError::InvalidManifest {
            message: "no [[table]] entries".to_string(),
        });
    }

    let mut names: BTreeSet<String> = BTreeSet::new();
    for table in &file.tables {
        if !names.insert(table.name.to_ascii_lowercase()) {
            return Err(StandardsError::DuplicateTable {
                table: table.name.clone(),
            });
        }
        validate_table(table)?;
    }

    let needs_reference = file.tables.iter().any(|t| {
        t.policy.link_reference || t.policy.official_length_check || t.policy.first_two_digits_check
    });
    if needs_reference {
        let reference = file
            .tables
            .iter()
            .find(|t| t.name == REFERENCE_TABLE)
            .ok_or_else(|| StandardsError::InvalidManifest {
                message: format!("cross-table rules need a {REFERENCE_TABLE} table schema"),
            })?;
        if !reference.known_columns().contains(&LINK_NO) {
            return Err(StandardsError::table(
                REFERENCE_TABLE,
                format!("reference table must declare {LINK_NO}"),
            ));
        }
    }
    Ok(())
}

fn validate_table(table: &TableSchema) -> Result<()> {
    let name = table.name.as_str();
    if name.trim().is_empty() {
        return Err(StandardsError::InvalidManifest {
            message: "table with empty name".to_string(),
        });
    }

    let mut required: BTreeSet<&str> = BTreeSet::new();
    for column in &table.required {
        if !required.insert(column) {
            return Err(StandardsError::table(
                name,
                format!("required column {column} listed twice"),
            ));
        }
    }

    let mut fields: BTreeSet<&str> = BTreeSet::new();
    for field in &table.fields {
        if !fields.insert(&field.name) {
            return Err(StandardsError::table(
                name,
                format!("field {} defined twice", field.name),
            ));
        }
        if let Some([min, max]) = field.range {
            if min.is_nan() || max.is_nan() || min > max {
                return Err(StandardsError::table(
                    name,
                    format!("field {} has invalid range [{min}, {max}]", field.name),
                ));
            }
        }
        if field.kind != FieldKind::Number && (field.range.is_some() || field.calendar_year) {
            return Err(StandardsError::table(
                name,
                format!("field {} declares numeric constraints on a non-number", field.name),
            ));
        }
        if field
            .valid_values
            .as_ref()
            .is_some_and(Vec::is_empty)
        {
            return Err(StandardsError::table(
                name,
                format!("field {} has an empty valid_values list", field.name),
            ));
        }
        if field.max_length == Some(0) {
            return Err(StandardsError::table(
                name,
                format!("field {} has max_length 0", field.name),
            ));
        }
    }

    let known = table.known_columns();
    let policy = &table.policy;
    let mut needed: Vec<&str> = Vec::new();
    if policy.link_reference || policy.unique_link_no {
        needed.push(LINK_NO);
    }
    if policy.link_no_format {
        needed.extend([LINK_NO, PROVINCE_CODE]);
    }
    if policy.gps_nonzero {
        needed.extend(GPS_NORTH);
        needed.extend(GPS_EAST);
    }
    if policy.official_length_check || policy.first_two_digits_check {
        needed.extend([LINK_NO, CHAINAGE_RB]);
    }
    if policy.chainage_continuity {
        needed.extend(CONTINUITY_GROUP);
        needed.extend([LINK_NO, CHAINAGE_FROM, CHAINAGE_TO]);
    }
    if let Some(column) = needed.into_iter().find(|col| !known.contains(col)) {
        return Err(StandardsError::table(
            name,
            format!("policy needs column {column}, which the schema does not declare"),
        ));
    }
    Ok(())
}

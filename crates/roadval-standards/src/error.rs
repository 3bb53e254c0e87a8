#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema TOML from {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid schema file: {message}")]
    InvalidManifest { message: String },

    #[error("duplicate table schema: {table}")]
    DuplicateTable { table: String },

    #[error("table {table}: {message}")]
    InvalidTable { table: String, message: String },

    #[error("unknown table: {table}")]
    UnknownTable { table: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn table(table: &str, message: impl Into<String>) -> Self {
        Self::InvalidTable {
            table: table.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StandardsError>;

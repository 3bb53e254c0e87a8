//! CSV table reading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::*;
use roadval_model::Table;

use crate::error::{IngestError, Result};
use crate::frame::table_from_dataframe;

/// Maximum file size for CSV loading (500 MB).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

const UTF8_BOM: char = '\u{feff}';

pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::open(path, e))?;
    if metadata.len() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Rejects UTF-16 exports; UTF-8 with or without BOM is accepted.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }
    Ok(())
}

/// Reads a CSV export with every column as a string column.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    check_file_size(path, MAX_CSV_FILE_SIZE)?;
    validate_encoding(path)?;

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let bom_column = df
        .get_column_names()
        .first()
        .filter(|name| name.starts_with(UTF8_BOM))
        .map(|name| name.to_string());
    if let Some(name) = bom_column {
        let cleaned = name.trim_start_matches(UTF8_BOM).to_string();
        df.rename(&name, cleaned.into())?;
    }

    Ok(df)
}

/// Reads a CSV export into a [`Table`] named `name`.
pub fn read_table(name: &str, path: &Path) -> Result<Table> {
    let df = read_csv_frame(path)?;
    table_from_dataframe(name, &df)
}

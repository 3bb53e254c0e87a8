//! Records and materialized tables.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::value::Value;

static NULL: Value = Value::Null;

/// One input row. Columns not present read as [`Value::Null`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub cells: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> &Value {
        self.cells.get(column).unwrap_or(&NULL)
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Builder-style [`Record::set`].
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(column, value);
        self
    }

    /// Values in the given column order, cloned for report context.
    pub fn values_for(&self, columns: &[String]) -> Vec<Value> {
        columns.iter().map(|col| self.get(col).clone()).collect()
    }
}

/// A fully materialized table: ordered column names plus records in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
}

impl Table {
    /// Creates an empty table. Column names must be unique.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Result<Self> {
        let name = name.into();
        let mut seen = BTreeSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(ModelError::DuplicateColumn {
                    table: name,
                    column: column.clone(),
                });
            }
        }
        Ok(Self {
            name,
            columns,
            rows: Vec::new(),
        })
    }

    /// Builds a table from positional rows aligned with `columns`.
    pub fn from_rows(
        name: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    ) -> Result<Self> {
        let mut table = Self::new(name, columns)?;
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != table.columns.len() {
                return Err(ModelError::RowWidth {
                    table: table.name.clone(),
                    ordinal: idx + 1,
                    expected: table.columns.len(),
                    actual: row.len(),
                });
            }
            let cells = table.columns.iter().cloned().zip(row).collect();
            table.rows.push(Record { cells });
        }
        Ok(table)
    }

    pub fn push(&mut self, record: Record) {
        self.rows.push(record);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Required columns absent from this table, in the order given.
    pub fn missing_columns<'a>(&self, required: &'a [String]) -> Vec<&'a str> {
        required
            .iter()
            .filter(|col| !self.has_column(col))
            .map(String::as_str)
            .collect()
    }

    /// Iterates records with their 1-based ordinal.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Record)> {
        self.rows.iter().enumerate().map(|(idx, row)| (idx + 1, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn rejects_duplicate_columns() {
        let err = Table::new("Link", cols(&["Link_No", "Link_No"])).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateColumn { .. }));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Table::from_rows(
            "Link",
            cols(&["Link_No", "Link_Name"]),
            vec![vec![Value::text("1")]],
        )
        .unwrap_err();
        assert!(err.to_string().contains("has 1 values, expected 2"));
    }

    #[test]
    fn missing_columns_keep_required_order() {
        let table = Table::new("Link", cols(&["Link_Name"])).unwrap();
        let required = cols(&["Province_Code", "Link_Name", "Link_No"]);
        assert_eq!(
            table.missing_columns(&required),
            vec!["Province_Code", "Link_No"]
        );
    }

    #[test]
    fn absent_cells_read_as_null() {
        let record = Record::new().with("Link_No", "110512345678");
        assert_eq!(record.get("Link_No"), &Value::text("110512345678"));
        assert_eq!(record.get("Link_Name"), &Value::Null);
        assert_eq!(
            record.values_for(&cols(&["Link_Name", "Link_No"])),
            vec![Value::Null, Value::text("110512345678")]
        );
    }

    #[test]
    fn numbered_is_one_based() {
        let table = Table::from_rows(
            "Link",
            cols(&["Link_No"]),
            vec![vec![Value::text("a")], vec![Value::text("b")]],
        )
        .unwrap();
        let ordinals: Vec<usize> = table.numbered().map(|(n, _)| n).collect();
        assert_eq!(ordinals, vec![1, 2]);
    }
}

//! Findings, per-table error reports, and the run summary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::value::Value;

/// Position of a finding: a 1-based record number or a table-level sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Ordinal {
    Record(usize),
    /// Schema-level failure (`N/A`).
    NotApplicable,
    EmptyDb,
    EmptyTable,
    NoErrors,
}

impl Ordinal {
    /// Sentinels are not counted as findings in the run summary.
    pub fn is_sentinel(self) -> bool {
        matches!(self, Self::EmptyDb | Self::EmptyTable | Self::NoErrors)
    }

    pub fn label(self) -> std::borrow::Cow<'static, str> {
        match self {
            Self::Record(n) => n.to_string().into(),
            Self::NotApplicable => "N/A".into(),
            Self::EmptyDb => "EMPTY_DB".into(),
            Self::EmptyTable => "EMPTY_TABLE".into(),
            Self::NoErrors => "NO_ERRORS".into(),
        }
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Ordinal {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N/A" => Ok(Self::NotApplicable),
            "EMPTY_DB" => Ok(Self::EmptyDb),
            "EMPTY_TABLE" => Ok(Self::EmptyTable),
            "NO_ERRORS" => Ok(Self::NoErrors),
            other => match other.parse::<usize>() {
                Ok(n) if n > 0 => Ok(Self::Record(n)),
                _ => Err(ModelError::InvalidOrdinal(other.to_string())),
            },
        }
    }
}

impl From<Ordinal> for String {
    fn from(value: Ordinal) -> Self {
        value.label().into_owned()
    }
}

impl TryFrom<String> for Ordinal {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One reported problem with the record context it was found on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub ordinal: Ordinal,
    /// Column values aligned with [`ErrorReport::columns`]; blank for sentinels.
    pub values: Vec<Value>,
    pub message: String,
}

impl Finding {
    pub fn new(ordinal: Ordinal, values: Vec<Value>, message: impl Into<String>) -> Self {
        Self {
            ordinal,
            values,
            message: message.into(),
        }
    }

    /// Table-level finding with every column blank.
    pub fn table_level(ordinal: Ordinal, width: usize, message: impl Into<String>) -> Self {
        Self::new(ordinal, vec![Value::Null; width], message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportOutcome {
    /// No findings; the report holds only the success sentinel.
    Clean,
    Findings,
    /// Required columns are missing; no records were scanned.
    SchemaFailure,
    /// Empty input with the empty check enabled.
    Empty,
    /// Validation is switched off for this table.
    Disabled,
}

/// A rule that failed internally and was skipped for this table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegradedRule {
    pub rule: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub table: String,
    pub columns: Vec<String>,
    /// Input records in the validated table.
    #[serde(default)]
    pub records: usize,
    pub outcome: ReportOutcome,
    pub findings: Vec<Finding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded_rules: Vec<DegradedRule>,
}

impl ErrorReport {
    /// Findings that are not sentinels.
    pub fn finding_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| !f.ordinal.is_sentinel())
            .count()
    }

    pub fn is_schema_failure(&self) -> bool {
        self.outcome == ReportOutcome::SchemaFailure
    }

    /// Findings attached to one record, in report order.
    pub fn findings_for(&self, record: usize) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(move |f| f.ordinal == Ordinal::Record(record))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCount {
    pub table: String,
    pub findings: usize,
}

/// Non-sentinel finding counts per table, in run order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub tables: Vec<TableCount>,
}

impl RunSummary {
    pub fn from_reports<'a>(reports: impl IntoIterator<Item = &'a ErrorReport>) -> Self {
        let tables = reports
            .into_iter()
            .map(|report| TableCount {
                table: report.table.clone(),
                findings: report.finding_count(),
            })
            .collect();
        Self { tables }
    }

    pub fn get(&self, table: &str) -> Option<usize> {
        self.tables
            .iter()
            .find(|t| t.table == table)
            .map(|t| t.findings)
    }

    pub fn total(&self) -> usize {
        self.tables.iter().map(|t| t.findings).sum()
    }
}

//! Run-level JSON summary.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use roadval_model::{DegradedRule, ReportOutcome};
use roadval_validate::RunResult;
use serde::Serialize;
use tracing::info;

use crate::error::{ReportError, Result};

pub const REPORT_SCHEMA: &str = "roadval.validation-report";
pub const REPORT_SCHEMA_VERSION: u32 = 1;
pub const REPORT_FILE_NAME: &str = "validation_report.json";

#[derive(Debug, Clone, Serialize)]
pub struct RunPayload {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    /// Fingerprint of the schema source the run was validated against.
    pub schema_sha256: String,
    pub tables: Vec<TableEntry>,
    pub total_findings: usize,
    pub failed_tables: Vec<FailedTable>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableEntry {
    pub table: String,
    pub outcome: ReportOutcome,
    pub records: usize,
    pub findings: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub degraded_rules: Vec<DegradedRule>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedTable {
    pub table: String,
    pub reason: String,
}

pub fn run_payload(result: &RunResult, schema_sha256: &str) -> RunPayload {
    let tables = result
        .reports
        .iter()
        .map(|report| TableEntry {
            table: report.table.clone(),
            outcome: report.outcome,
            records: report.records,
            findings: report.finding_count(),
            degraded_rules: report.degraded_rules.clone(),
        })
        .collect();
    let failed_tables = result
        .failures
        .iter()
        .map(|failure| FailedTable {
            table: failure.table().to_string(),
            reason: failure.to_string(),
        })
        .collect();

    RunPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        schema_sha256: schema_sha256.to_string(),
        tables,
        total_findings: result.total_findings(),
        failed_tables,
    }
}

/// Writes `validation_report.json` into `output_dir`.
pub fn write_run_json(output_dir: &Path, payload: &RunPayload) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|e| ReportError::io(output_dir, e))?;
    let path = output_dir.join(REPORT_FILE_NAME);
    let json = serde_json::to_string_pretty(payload)?;
    fs::write(&path, format!("{json}\n")).map_err(|e| ReportError::io(&path, e))?;
    info!(path = %path.display(), tables = payload.tables.len(), "run report written");
    Ok(path)
}

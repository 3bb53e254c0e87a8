//! One validation run: schemas, ingest, validate, write reports.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use roadval_ingest::load_tables;
use roadval_model::Value;
use roadval_report::{run_payload, write_reports_csv, write_run_json};
use roadval_standards::SchemaRegistry;
use roadval_validate::{RunOptions, RunResult, validate_loaded};
use tracing::{Level, info, info_span, trace, warn};

use crate::logging::redact_value;

/// Which report files to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Json,
    Both,
}

impl ReportFormat {
    fn csv(self) -> bool {
        matches!(self, Self::Csv | Self::Both)
    }

    fn json(self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }
}

#[derive(Debug, Clone)]
pub struct ValidationRequest {
    pub input_dir: PathBuf,
    /// Defaults to `<input_dir>/validation`.
    pub output_dir: Option<PathBuf>,
    pub format: ReportFormat,
    pub dry_run: bool,
    pub schemas: Option<PathBuf>,
    pub current_year: Option<i32>,
}

impl ValidationRequest {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: None,
            format: ReportFormat::Both,
            dry_run: false,
            schemas: None,
            current_year: None,
        }
    }

    fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&self.input_dir))
    }
}

#[derive(Debug)]
pub struct ValidationOutcome {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub schema_source: String,
    pub result: RunResult,
    pub unknown_files: Vec<PathBuf>,
    pub csv_reports: Vec<PathBuf>,
    pub json_report: Option<PathBuf>,
}

impl ValidationOutcome {
    /// 0 when clean, 1 when findings were reported, 2 when any table failed.
    pub fn exit_code(&self) -> i32 {
        if self.result.has_failures() {
            2
        } else if self.result.total_findings() > 0 {
            1
        } else {
            0
        }
    }
}

pub fn run_validation(request: &ValidationRequest) -> Result<ValidationOutcome> {
    let span = info_span!("validate", input = %request.input_dir.display());
    let _guard = span.enter();
    let started = Instant::now();

    let registry = SchemaRegistry::resolve(request.schemas.as_deref()).context("load schemas")?;
    info!(
        source = %registry.source(),
        tables = registry.len(),
        sha256 = registry.sha256(),
        "schemas loaded"
    );

    let loaded = load_tables(&request.input_dir, &registry)
        .with_context(|| format!("load tables from {}", request.input_dir.display()))?;
    for path in &loaded.unknown_files {
        warn!(path = %path.display(), "ignoring file with no registered table");
    }
    if !loaded.unreadable.is_empty() {
        warn!(count = loaded.unreadable.len(), "some table files could not be read");
    }

    let options = match request.current_year {
        Some(year) => RunOptions::default().with_current_year(year),
        None => RunOptions::default(),
    };
    let result = validate_loaded(
        &loaded.tables,
        &loaded.unreadable_reasons(),
        &registry,
        &options,
    );
    trace_findings(&result);

    let output_dir = request.resolved_output_dir();
    let mut csv_reports = Vec::new();
    let mut json_report = None;
    if request.dry_run {
        info!("dry run, no reports written");
    } else {
        if request.format.csv() {
            csv_reports = write_reports_csv(&output_dir, &result.reports)
                .with_context(|| format!("write CSV reports to {}", output_dir.display()))?;
        }
        if request.format.json() {
            let payload = run_payload(&result, registry.sha256());
            json_report = Some(
                write_run_json(&output_dir, &payload)
                    .with_context(|| format!("write run report to {}", output_dir.display()))?,
            );
        }
    }

    info!(
        findings = result.total_findings(),
        failures = result.failures.len(),
        duration_ms = started.elapsed().as_millis(),
        "run complete"
    );
    Ok(ValidationOutcome {
        input_dir: request.input_dir.clone(),
        output_dir,
        schema_source: registry.source().to_string(),
        result,
        unknown_files: loaded.unknown_files,
        csv_reports,
        json_report,
    })
}

fn trace_findings(result: &RunResult) {
    if !tracing::enabled!(Level::TRACE) {
        return;
    }
    for report in &result.reports {
        for finding in &report.findings {
            let values = finding
                .values
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join("|");
            trace!(
                table = %report.table,
                record = %finding.ordinal,
                values = redact_value(&values),
                message = %finding.message,
                "finding"
            );
        }
    }
}

/// Default output folder for `input_dir`.
pub fn default_output_dir(input_dir: &Path) -> PathBuf {
    input_dir.join("validation")
}

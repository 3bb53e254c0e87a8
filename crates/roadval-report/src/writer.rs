//! Per-table CSV reports.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use roadval_model::{ErrorReport, Value};
use tracing::{debug, info};

use crate::error::{ReportError, Result};
use crate::frame::{MESSAGE_COLUMN, RECORD_COLUMN, check_columns};

/// `<table>_validation.csv`
pub fn report_file_name(table: &str) -> String {
    format!("{table}_validation.csv")
}

fn write_report<W: Write>(writer: W, report: &ErrorReport) -> std::result::Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(report.columns.len() + 2);
    header.push(RECORD_COLUMN);
    header.extend(report.columns.iter().map(String::as_str));
    header.push(MESSAGE_COLUMN);
    out.write_record(&header)?;

    for finding in &report.findings {
        let mut row = Vec::with_capacity(header.len());
        row.push(finding.ordinal.to_string());
        for idx in 0..report.columns.len() {
            row.push(finding.values.get(idx).map(Value::to_string).unwrap_or_default());
        }
        row.push(finding.message.clone());
        out.write_record(&row)?;
    }
    out.flush()?;
    Ok(())
}

fn csv_error(path: &Path, source: csv::Error) -> ReportError {
    ReportError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

/// Renders a report as CSV text.
pub fn render_report_csv(report: &ErrorReport) -> Result<String> {
    check_columns(report)?;
    let mut buffer = Vec::new();
    write_report(&mut buffer, report).map_err(|e| csv_error(Path::new("<memory>"), e))?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Writes `<table>_validation.csv` into `output_dir`, creating it if needed.
pub fn write_report_csv(output_dir: &Path, report: &ErrorReport) -> Result<PathBuf> {
    check_columns(report)?;
    fs::create_dir_all(output_dir).map_err(|e| ReportError::io(output_dir, e))?;
    let path = output_dir.join(report_file_name(&report.table));
    let file = File::create(&path).map_err(|e| ReportError::io(&path, e))?;
    write_report(file, report).map_err(|e| csv_error(&path, e))?;
    debug!(table = %report.table, path = %path.display(), rows = report.findings.len(), "report written");
    Ok(path)
}

/// Writes one CSV per report and returns the paths in report order.
pub fn write_reports_csv(output_dir: &Path, reports: &[ErrorReport]) -> Result<Vec<PathBuf>> {
    let paths = reports
        .iter()
        .map(|report| write_report_csv(output_dir, report))
        .collect::<Result<Vec<_>>>()?;
    info!(files = paths.len(), dir = %output_dir.display(), "csv reports written");
    Ok(paths)
}

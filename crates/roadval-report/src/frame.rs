//! [`ErrorReport`] to polars `DataFrame`.

use polars::prelude::*;
use roadval_model::{ErrorReport, Value};

use crate::error::{ReportError, Result};

pub const RECORD_COLUMN: &str = "Record_No";
pub const MESSAGE_COLUMN: &str = "Validation_Message";

fn cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

pub(crate) fn check_columns(report: &ErrorReport) -> Result<()> {
    match report
        .columns
        .iter()
        .find(|c| c.as_str() == RECORD_COLUMN || c.as_str() == MESSAGE_COLUMN)
    {
        Some(column) => Err(ReportError::ReservedColumn {
            table: report.table.clone(),
            column: column.clone(),
        }),
        None => Ok(()),
    }
}

/// One row per finding: ordinal, original values, message.
pub fn report_to_dataframe(report: &ErrorReport) -> Result<DataFrame> {
    check_columns(report)?;

    let mut columns: Vec<Column> = Vec::with_capacity(report.columns.len() + 2);
    let ordinals: Vec<String> = report
        .findings
        .iter()
        .map(|f| f.ordinal.to_string())
        .collect();
    columns.push(Series::new(RECORD_COLUMN.into(), ordinals).into_column());

    for (idx, name) in report.columns.iter().enumerate() {
        let values: Vec<Option<String>> = report
            .findings
            .iter()
            .map(|f| f.values.get(idx).and_then(cell))
            .collect();
        columns.push(Series::new(name.as_str().into(), values).into_column());
    }

    let messages: Vec<&str> = report
        .findings
        .iter()
        .map(|f| f.message.as_str())
        .collect();
    columns.push(Series::new(MESSAGE_COLUMN.into(), messages).into_column());

    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadval_model::{Finding, Ordinal, ReportOutcome};

    fn report(columns: &[&str], findings: Vec<Finding>) -> ErrorReport {
        ErrorReport {
            table: "Link".to_string(),
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            records: findings.len(),
            outcome: ReportOutcome::Findings,
            findings,
            degraded_rules: Vec::new(),
        }
    }

    #[test]
    fn frame_has_record_columns_and_message() {
        let df = report_to_dataframe(&report(
            &["Link_No", "Link_Length_Official"],
            vec![Finding::new(
                Ordinal::Record(3),
                vec![Value::text("110512345678"), Value::Number(2.0)],
                "Link_Length_Official is required",
            )],
        ))
        .unwrap();

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(
            names,
            vec!["Record_No", "Link_No", "Link_Length_Official", "Validation_Message"]
        );
        assert_eq!(df.height(), 1);
        let official = df.column("Link_Length_Official").unwrap().str().unwrap();
        assert_eq!(official.get(0), Some("2"));
    }

    #[test]
    fn sentinel_values_are_null() {
        let df = report_to_dataframe(&report(
            &["Link_No"],
            vec![Finding::table_level(Ordinal::NoErrors, 1, "SUCCESS")],
        ))
        .unwrap();
        let link = df.column("Link_No").unwrap();
        assert_eq!(link.null_count(), 1);
        let record = df.column("Record_No").unwrap().str().unwrap();
        assert_eq!(record.get(0), Some("NO_ERRORS"));
    }

    #[test]
    fn reserved_column_names_are_rejected() {
        let err = report_to_dataframe(&report(&["Validation_Message"], Vec::new())).unwrap_err();
        assert!(matches!(err, ReportError::ReservedColumn { .. }));
    }
}

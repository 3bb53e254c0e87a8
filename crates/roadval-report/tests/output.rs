//! Report files produced from real validation runs.

use std::fs;

use roadval_model::{Finding, Ordinal, Table, Value};
use roadval_report::{
    REPORT_FILE_NAME, ReportError, render_report_csv, report_to_dataframe, run_payload,
    write_reports_csv, write_run_json,
};
use roadval_standards::SchemaRegistry;
use roadval_validate::{RunOptions, RunResult, validate_run};

const LINK_NO: &str = "110512345678";

fn table(name: &str, columns: &[&str], rows: &[&[&str]]) -> Table {
    Table::from_rows(
        name,
        columns.iter().map(|c| (*c).to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|v| Value::text(*v)).collect())
            .collect(),
    )
    .unwrap()
}

fn run() -> (RunResult, SchemaRegistry) {
    let link = table(
        "Link",
        &[
            "Province_Code",
            "Kabupaten_Code",
            "Link_No",
            "Link_Code",
            "Link_Name",
            "Link_Length_Official",
            "Link_Length_Actual",
        ],
        &[&["11", "05", LINK_NO, "001", "Jalan Raya", "2.0", "2.1"]],
    );
    let traffic = table(
        "TrafficVolume",
        &["Year", "Province_Code", "Kabupaten_Code", "Link_No", "AADT_Car"],
        &[
            &["2023", "11", "05", LINK_NO, "1500"],
            &["2023", "11", "05", LINK_NO, "-3"],
        ],
    );
    let registry = SchemaRegistry::builtin().unwrap();
    let options = RunOptions::default().with_current_year(2024);
    (validate_run(&[link, traffic], &registry, &options), registry)
}

#[test]
fn traffic_volume_csv_keeps_ordinals_and_values() {
    let (result, _) = run();
    let csv = render_report_csv(result.report("TrafficVolume").unwrap()).unwrap();
    insta::assert_snapshot!(csv.trim_end(), @r"
Record_No,Year,Province_Code,Kabupaten_Code,Link_No,AADT_Car,Validation_Message
1,2023,11,05,110512345678,1500,Link_No '110512345678' is duplicated - only one record per link is allowed
2,2023,11,05,110512345678,-3,Link_No '110512345678' is duplicated - only one record per link is allowed
2,2023,11,05,110512345678,-3,AADT_Car: Value must be between 0 and inf
");
}

#[test]
fn clean_table_renders_sentinel_row() {
    let (result, _) = run();
    let csv = render_report_csv(result.report("Link").unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Record_No,Province_Code,Kabupaten_Code,Link_No,Link_Code,Link_Name,\
             Link_Length_Official,Link_Length_Actual,Validation_Message",
            "NO_ERRORS,,,,,,,,SUCCESS: No validation errors found in Link table",
        ]
    );
}

#[test]
fn messages_with_commas_are_quoted() {
    let report = roadval_model::ErrorReport {
        table: "Alignment".to_string(),
        columns: vec!["Link_No".to_string(), "Chainage".to_string()],
        records: 4,
        outcome: roadval_model::ReportOutcome::SchemaFailure,
        findings: vec![Finding::table_level(
            Ordinal::NotApplicable,
            2,
            "Required columns missing: Chainage, Link_No",
        )],
        degraded_rules: Vec::new(),
    };
    let csv = render_report_csv(&report).unwrap();
    assert_eq!(
        csv.lines().nth(1),
        Some(r#"N/A,,,"Required columns missing: Chainage, Link_No""#)
    );
}

#[test]
fn csv_files_are_named_after_tables() {
    let (result, _) = run();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("reports");

    let paths = write_reports_csv(&out, &result.reports).unwrap();
    let names: Vec<String> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "Link_validation.csv",
            "BridgeInventory_validation.csv",
            "TrafficVolume_validation.csv",
        ]
    );
    let written = fs::read_to_string(&paths[2]).unwrap();
    assert_eq!(
        written,
        render_report_csv(result.report("TrafficVolume").unwrap()).unwrap()
    );
}

#[test]
fn dataframe_matches_csv_shape() {
    let (result, _) = run();
    let df = report_to_dataframe(result.report("TrafficVolume").unwrap()).unwrap();
    assert_eq!(df.height(), 3);
    assert_eq!(df.width(), 7);
    let messages = df.column("Validation_Message").unwrap().str().unwrap();
    assert_eq!(
        messages.get(2),
        Some("AADT_Car: Value must be between 0 and inf")
    );
}

#[test]
fn run_json_lists_tables_and_failures() {
    let (result, registry) = run();
    let dir = tempfile::tempdir().unwrap();
    let payload = run_payload(&result, registry.sha256());
    let path = write_run_json(dir.path(), &payload).unwrap();
    assert_eq!(path.file_name().unwrap(), REPORT_FILE_NAME);

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.ends_with("}\n"));
    let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(json["schema"], "roadval.validation-report");
    assert_eq!(json["schema_version"], 1);
    assert_eq!(json["schema_sha256"], registry.sha256());
    assert_eq!(json["total_findings"], 3);

    let tables = json["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 3);
    assert_eq!(tables[0]["table"], "Link");
    assert_eq!(tables[0]["outcome"], "clean");
    assert_eq!(tables[1]["table"], "BridgeInventory");
    assert_eq!(tables[1]["outcome"], "disabled");
    assert_eq!(tables[2]["table"], "TrafficVolume");
    assert_eq!(tables[2]["outcome"], "findings");
    assert_eq!(tables[2]["records"], 2);
    assert_eq!(tables[2]["findings"], 3);

    let failed = json["failed_tables"].as_array().unwrap();
    // Every absent table except the disabled BridgeInventory.
    assert_eq!(failed.len(), registry.len() - 3);
    assert!(
        failed
            .iter()
            .any(|f| f["table"] == "Alignment" && f["reason"] == "Alignment: table not supplied")
    );
}

#[test]
fn reserved_column_is_an_error() {
    let (result, _) = run();
    let mut report = result.report("Link").unwrap().clone();
    report.columns[0] = "Record_No".to_string();
    assert!(matches!(
        render_report_csv(&report),
        Err(ReportError::ReservedColumn { .. })
    ));
}

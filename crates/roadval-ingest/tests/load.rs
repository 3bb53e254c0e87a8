use roadval_ingest::{IngestError, load_tables};
use roadval_model::Value;
use roadval_standards::SchemaRegistry;
use tempfile::TempDir;

#[test]
fn loads_registered_tables_from_folder() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("Link.csv"),
        "Province_Code,Kabupaten_Code,Link_No\n11,05,110512345678\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("TrafficVolume.csv"),
        "Year,Link_No\n2023,110512345678\n2023,110512345678\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("scratch.csv"), "A\n1\n").unwrap();

    let registry = SchemaRegistry::builtin().unwrap();
    let loaded = load_tables(dir.path(), &registry).unwrap();

    assert_eq!(loaded.tables.len(), 2);
    assert_eq!(loaded.unknown_files.len(), 1);
    let link = loaded.get("Link").unwrap();
    assert_eq!(link.rows[0].get("Kabupaten_Code"), &Value::text("05"));
    assert_eq!(loaded.get("TrafficVolume").unwrap().len(), 2);
    assert!(loaded.get("Alignment").is_none());
}

#[test]
fn unreadable_table_does_not_stop_the_others() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("Link.csv"),
        "Province_Code,Link_No\n11,110512345678\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("TrafficVolume.csv"), "").unwrap();
    std::fs::write(dir.path().join("Alignment.csv"), [0xFF, 0xFE, b'A', 0]).unwrap();
    let registry = SchemaRegistry::builtin().unwrap();

    let loaded = load_tables(dir.path(), &registry).unwrap();

    assert_eq!(loaded.tables.len(), 1);
    assert!(loaded.get("Link").is_some());
    let failed: Vec<&str> = loaded.unreadable.iter().map(|u| u.table.as_str()).collect();
    assert_eq!(failed, vec!["Alignment", "TrafficVolume"]);
    assert!(matches!(
        loaded.unreadable[1].error,
        IngestError::EmptyCsv { .. }
    ));
    let reasons = loaded.unreadable_reasons();
    assert!(reasons[0].1.contains("UTF-16 LE"));
}

#[test]
fn missing_folder_is_an_error() {
    let dir = TempDir::new().unwrap();
    let registry = SchemaRegistry::builtin().unwrap();
    let err = load_tables(&dir.path().join("absent"), &registry).unwrap_err();
    assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
}

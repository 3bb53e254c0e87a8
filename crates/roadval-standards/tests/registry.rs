use std::io::Write;

use roadval_model::{EmptyCheck, FieldKind};
use roadval_standards::{SchemaRegistry, SchemaSource, StandardsError};

const ALL_TABLES: [&str; 16] = [
    "Link",
    "Alignment",
    "RoadCondition",
    "RoadInventory",
    "BridgeInventory",
    "CulvertCondition",
    "CulvertInventory",
    "RetainingWallCondition",
    "RetainingWallInventory",
    "TrafficVolume",
    "CODE_AN_UnitCostsPER",
    "CODE_AN_UnitCostsPERUnpaved",
    "CODE_AN_UnitCostsREH",
    "CODE_AN_UnitCostsRIGID",
    "CODE_AN_UnitCostsRM",
    "CODE_AN_UnitCostsWidening",
];

#[test]
fn builtin_registry_has_every_table_in_order() {
    let registry = SchemaRegistry::builtin().expect("builtin schemas");
    let names: Vec<&str> = registry.names().collect();
    assert_eq!(names, ALL_TABLES);
    assert_eq!(registry.source(), &SchemaSource::Builtin);
}

#[test]
fn builtin_policies_match_table_roles() {
    let registry = SchemaRegistry::builtin().expect("builtin schemas");

    let traffic = registry.require("TrafficVolume").unwrap();
    assert!(traffic.policy.unique_link_no);
    assert_eq!(traffic.policy.empty_check, EmptyCheck::EmptyDb);
    assert!(traffic.field("Year").unwrap().calendar_year);

    let alignment = registry.require("Alignment").unwrap();
    assert!(alignment.policy.official_length_check);
    assert!(!alignment.policy.first_two_digits_check);
    assert_eq!(alignment.required, vec!["Link_No".to_string()]);

    let bridge = registry.require("BridgeInventory").unwrap();
    assert!(!bridge.policy.enabled);

    let road = registry.require("RoadCondition").unwrap();
    assert!(road.policy.chainage_continuity);
    assert_eq!(
        road.field("Roughness").unwrap().kind,
        FieldKind::LenientYesNo
    );

    let rigid = registry.require("CODE_AN_UnitCostsRIGID").unwrap();
    assert_eq!(rigid.policy.empty_check, EmptyCheck::Off);
    assert!(!rigid.policy.link_reference);
    assert_eq!(
        rigid.field("PerUnitCost").unwrap().range,
        Some([0.0, f64::INFINITY])
    );

    let wall = registry.require("RetainingWallCondition").unwrap();
    assert_eq!(wall.field("Year").unwrap().range, Some([1900.0, 2100.0]));
}

#[test]
fn traffic_volume_counts_each_vehicle_class() {
    let registry = SchemaRegistry::builtin().expect("builtin schemas");
    let traffic = registry.require("TrafficVolume").unwrap();

    for name in [
        "AADT_MicroTruck",
        "AADT_Small_Bus",
        "AADT_Large_Bus",
        "AADT_Small_Truck",
        "AADT_Medium_Truck",
        "AADT_Large_Truck",
        "AADT_Truck_Trailer",
        "AADT_Semi_Trailer",
    ] {
        let field = traffic.field(name).unwrap();
        assert_eq!(field.kind, FieldKind::Number, "{name}");
        assert_eq!(field.range, Some([0.0, f64::INFINITY]), "{name}");
    }
}

#[test]
fn hemisphere_is_free_text_and_road_condition_has_no_surveyor() {
    let registry = SchemaRegistry::builtin().expect("builtin schemas");
    let alignment = registry.require("Alignment").unwrap();
    let hemisphere = alignment.field("Hemis_NS").unwrap();
    assert_eq!(hemisphere.kind, FieldKind::Text);
    assert!(hemisphere.valid_values.is_none());
    assert!(hemisphere.max_length.is_none());

    let road = registry.require("RoadCondition").unwrap();
    assert!(road.field("SurveyBy").is_none());
}

#[test]
fn lookup_ignores_case() {
    let registry = SchemaRegistry::builtin().unwrap();
    assert_eq!(
        registry.find_ignore_case("trafficvolume").unwrap().name,
        "TrafficVolume"
    );
    assert!(matches!(
        registry.require("Bridges"),
        Err(StandardsError::UnknownTable { .. })
    ));
}

#[test]
fn override_file_replaces_builtin() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "[manifest]\nschema = \"roadval.table-schemas\"\nschema_version = 1\n\n\
         [[table]]\nname = \"Link\"\nrequired = [\"Link_No\"]\n"
    )
    .unwrap();

    let registry = SchemaRegistry::resolve(Some(file.path())).unwrap();
    assert_eq!(registry.len(), 1);
    assert_eq!(
        registry.source(),
        &SchemaSource::File(file.path().to_path_buf())
    );
    assert_ne!(
        registry.sha256(),
        SchemaRegistry::builtin().unwrap().sha256()
    );
}

#[test]
fn missing_override_file_is_an_io_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = SchemaRegistry::load_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, StandardsError::Io { .. }));
}

//! Loads capacity and catalog files from disk and runs a full selection.

use std::fs;

use approx::assert_relative_eq;
use tempfile::TempDir;
use walkin_selector::{
    domain::{
        recommend, BoxType, CapacityLookupError, PricingParams, SelectionError, SelectionRequest,
        TableOrigin,
    },
    infra::{
        catalog::CatalogError,
        sources::{load_sources, LoadedSources},
    },
};

const CAPACITY_CSV: &str = "\
boxType,boxSize,requiredBTU
cooler,8x10,9650
cooler,10x10,11200
cooler,8x40,28000
freezer,8x10,14500
";

const ACME_CSV: &str = "\
boxType,referModelNumber,horsePower,evapCoil,qtyEvapCoil,referSysTotalCost,btu448A
cooler,AC010,1,ADR112AENM,1,\"3,426\",9888
cooler,AC015,1.5,ADR140AENM,1,\"3,746\",13981
cooler,AC030,3,ADR140AENM,2,\"7,900\",30000
freezer,AF020,2,LED140BENM,1,\"6,210\",15000
";

const BOREAL_CSV: &str = "\
box_type,condensing_unit_model,horsepower,evaporator_model,evaporator_quantity,rated_btu,vendor_cost
cooler,BR-1,1,ADR112BENM,1,9900,3300
cooler,BR-3,3,ADR150BENM,2,27000,8100
freezer,BR-F,2,ADR140AENM,1,20000,4000
";

fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("btu.csv"), CAPACITY_CSV).unwrap();
    let catalogs = dir.path().join("catalogs");
    fs::create_dir(&catalogs).unwrap();
    fs::write(catalogs.join("Acme_Refrigeration.csv"), ACME_CSV).unwrap();
    fs::write(catalogs.join("Boreal.csv"), BOREAL_CSV).unwrap();
    dir
}

fn load_fixture(dir: &TempDir) -> LoadedSources {
    let table = dir.path().join("btu.csv");
    let catalogs = dir.path().join("catalogs");
    load_sources(Some(table.as_path()), Some(catalogs.as_path())).unwrap()
}

#[test]
fn cheapest_vendor_is_recommended() {
    let dir = fixture();
    let loaded = load_fixture(&dir);
    assert!(matches!(loaded.origin, TableOrigin::File(_)));
    assert!(loaded.warnings.is_empty());
    assert_eq!(loaded.catalogs.len(), 2);

    let request = SelectionRequest::new(BoxType::Cooler, 8.0, 10.0);
    let result = recommend(
        &loaded.table,
        &request,
        &loaded.catalogs,
        &PricingParams::default(),
    )
    .unwrap();

    assert_eq!(result.sizing.required_btu, 9_650);
    assert!(result.sizing.is_exact_match);
    assert_eq!(result.vendor_options.len(), 2);

    let acme = result.option_for("Acme Refrigeration").unwrap();
    assert_eq!(acme.offering.condensing_unit_model, "AC010");
    // 3426 * 1.25 = 4282.50, nearest 50 is 4300.
    assert_relative_eq!(acme.customer_price, 4_300.0);

    let boreal = result.option_for("Boreal").unwrap();
    // 3300 * 1.25 = 4125, exactly halfway, rounds away from zero.
    assert_relative_eq!(boreal.customer_price, 4_150.0);

    let pick = result.recommended.as_ref().unwrap();
    assert_eq!(pick.vendor, "Boreal");
    assert_relative_eq!(pick.delta_to_next.unwrap(), 150.0);
}

#[test]
fn long_box_needs_two_coils() {
    let dir = fixture();
    let loaded = load_fixture(&dir);

    let request = SelectionRequest::new(BoxType::Cooler, 8.0, 35.0);
    let result = recommend(
        &loaded.table,
        &request,
        &loaded.catalogs,
        &PricingParams::default(),
    )
    .unwrap();

    assert_eq!(result.sizing.box_size_used, "8x40");
    assert!(!result.sizing.is_exact_match);
    assert_eq!(result.sizing.required_evaporator_quantity, 2);
    assert!(result.sizing.dual_coil_reason.is_some());
    assert!(result
        .vendor_options
        .iter()
        .all(|option| option.evaporator_quantity() == 2));
    // Acme's 30000 BTU dual-coil system is the only one rated for 28000.
    assert_eq!(result.vendor_options.len(), 1);
    let pick = result.recommended.unwrap();
    assert_eq!(pick.vendor, "Acme Refrigeration");
    assert_eq!(pick.delta_to_next, None);
}

#[test]
fn freezer_ignores_cooler_coils() {
    let dir = fixture();
    let loaded = load_fixture(&dir);

    let request = SelectionRequest::new(BoxType::Freezer, 10.0, 8.0);
    let result = recommend(
        &loaded.table,
        &request,
        &loaded.catalogs,
        &PricingParams::default(),
    )
    .unwrap();

    assert_eq!(result.sizing.box_size_used, "8x10");
    // Boreal lists an ADR coil against a freezer, which never qualifies.
    assert!(result.option_for("Boreal").is_none());
    assert_eq!(
        result.recommended.map(|pick| pick.vendor),
        Some("Acme Refrigeration".to_string())
    );
}

#[test]
fn oversized_box_is_rejected() {
    let dir = fixture();
    let loaded = load_fixture(&dir);

    let request = SelectionRequest::new(BoxType::Cooler, 50.0, 50.0);
    let err = recommend(
        &loaded.table,
        &request,
        &loaded.catalogs,
        &PricingParams::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SelectionError::Capacity(CapacityLookupError::ExceedsTable { .. })
    ));
}

#[test]
fn empty_catalog_dir_still_sizes_with_bundled_table() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_sources(None, Some(dir.path())).unwrap();
    assert_eq!(loaded.origin, TableOrigin::Bundled);
    assert!(loaded.catalogs.is_empty());
    assert_eq!(loaded.warnings.len(), 1);

    let request = SelectionRequest::new(BoxType::Cooler, 8.0, 10.0);
    let result = recommend(
        &loaded.table,
        &request,
        &loaded.catalogs,
        &PricingParams::default(),
    )
    .unwrap();
    assert_eq!(result.sizing.required_btu, 10_560);
    assert!(result.vendor_options.is_empty());
    assert!(result.recommended.is_none());
}

#[test]
fn colliding_vendor_files_fail_to_load() {
    let dir = fixture();
    let catalogs = dir.path().join("catalogs");
    fs::write(catalogs.join("Boreal_.csv"), BOREAL_CSV).unwrap();

    let table = dir.path().join("btu.csv");
    let err = load_sources(Some(table.as_path()), Some(catalogs.as_path())).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateVendor { ref vendor, .. } if vendor == "Boreal"));
}

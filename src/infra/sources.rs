//! Locates and loads the capacity table and vendor catalogs for a session.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use tracing::{info, warn};

use crate::{
    domain::{CapacityTable, TableOrigin, VendorCatalog},
    infra::catalog::{load_capacity_table, load_catalog_dir, parse_capacity_table, CatalogError},
    util::assets,
};

const APP_DIRNAME: &str = "walkin-selector";
const CATALOG_DIRNAME: &str = "catalogs";

/// Default vendor catalog directory (in the app data directory).
pub fn default_catalog_dir() -> PathBuf {
    static PATH: OnceLock<PathBuf> = OnceLock::new();
    PATH.get_or_init(|| {
        let dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIRNAME)
            .join(CATALOG_DIRNAME);

        // Ensure directory exists so users have somewhere to drop files
        let _ = fs::create_dir_all(&dir);

        dir
    })
    .clone()
}

/// The standard BTU requirements table shipped with the app.
pub fn bundled_capacity_table() -> Result<CapacityTable, CatalogError> {
    parse_capacity_table(assets::bundled_capacity_table_csv().as_ref())
}

#[derive(Debug)]
pub struct LoadedSources {
    pub table: CapacityTable,
    pub origin: TableOrigin,
    pub catalogs: Vec<VendorCatalog>,
    /// Non-fatal problems worth surfacing to the user.
    pub warnings: Vec<String>,
}

/// Loads a fresh snapshot of every input the selector needs.
///
/// A configured capacity table must load; without one the bundled table is
/// used. An empty catalog directory is a warning, not an error, so sizing
/// still works before any vendor files are added.
pub fn load_sources(
    table_path: Option<&Path>,
    catalog_dir: Option<&Path>,
) -> Result<LoadedSources, CatalogError> {
    let (table, origin) = match table_path {
        Some(path) => (load_capacity_table(path)?, TableOrigin::File(path.to_path_buf())),
        None => (bundled_capacity_table()?, TableOrigin::Bundled),
    };

    let dir = catalog_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(default_catalog_dir);

    let mut warnings = Vec::new();
    let catalogs = match load_catalog_dir(&dir) {
        Ok(catalogs) => catalogs,
        Err(err @ CatalogError::EmptyDirectory(_)) => {
            warn!("{err}");
            warnings.push(err.to_string());
            Vec::new()
        }
        Err(err) => return Err(err),
    };

    info!(
        capacity_rows = table.len(),
        vendors = catalogs.len(),
        "sources loaded"
    );

    Ok(LoadedSources {
        table,
        origin,
        catalogs,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BoxType;

    #[test]
    fn bundled_table_covers_both_box_types() {
        let table = bundled_capacity_table().unwrap();
        assert!(table.count_for(BoxType::Cooler) > 0);
        assert!(table.count_for(BoxType::Freezer) > 0);
        let found = table.resolve(BoxType::Cooler, 8.0, 10.0).unwrap();
        assert!(found.is_exact_match);
    }

    #[test]
    fn empty_catalog_dir_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_sources(None, Some(dir.path())).unwrap();
        assert_eq!(loaded.origin, TableOrigin::Bundled);
        assert!(loaded.catalogs.is_empty());
        assert_eq!(loaded.warnings.len(), 1);
    }

    #[test]
    fn configured_table_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        let err = load_sources(Some(missing.as_path()), Some(dir.path())).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn configured_table_replaces_bundled() {
        let dir = tempfile::tempdir().unwrap();
        let table_path = dir.path().join("btu.csv");
        fs::write(&table_path, "boxType,boxSize,requiredBTU\nfreezer,8x10,12400\n").unwrap();
        let catalogs = dir.path().join("catalogs");
        fs::create_dir(&catalogs).unwrap();
        fs::write(
            catalogs.join("Turbo_Air.csv"),
            "boxType,horsePower,referModelNumber,evapCoil,qtyEvapCoil,referSysTotalCost,btu448A\n\
             freezer,1.5,TS015XR404A2-T,LED072BENM,1,\"4,105\",12900\n",
        )
        .unwrap();

        let loaded = load_sources(Some(table_path.as_path()), Some(catalogs.as_path())).unwrap();
        assert_eq!(loaded.origin, TableOrigin::File(table_path.clone()));
        assert_eq!(loaded.table.len(), 1);
        assert_eq!(loaded.catalogs[0].vendor, "Turbo Air");
        assert!(loaded.warnings.is_empty());
    }
}

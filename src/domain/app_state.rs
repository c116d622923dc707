use std::{
    collections::HashMap,
    path::PathBuf,
    sync::Arc,
    time::SystemTime,
};

use serde::{Deserialize, Serialize};

use super::{
    capacity::CapacityTable,
    entities::{BoxType, PricingParams, Recommendation, VendorCatalog},
};

/// Where the loaded capacity table came from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TableOrigin {
    #[default]
    Bundled,
    File(PathBuf),
}

impl TableOrigin {
    pub fn label(&self) -> String {
        match self {
            TableOrigin::Bundled => "Bundled standard table".to_string(),
            TableOrigin::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub pricing: PricingParams,
    /// Immutable snapshot; reloading swaps the whole `Arc`.
    pub capacity_table: Arc<CapacityTable>,
    pub table_origin: TableOrigin,
    pub catalogs: Arc<Vec<VendorCatalog>>,
    pub capacity_table_path: Option<PathBuf>,
    pub catalog_dir: Option<PathBuf>,
    pub last_box_type: BoxType,
    pub last_recommendation: Option<Recommendation>,
    pub sources: SourceTimestamps,
}

impl AppState {
    pub fn apply_persisted(&mut self, persisted: PersistedState) {
        self.pricing = persisted.pricing;
        self.capacity_table_path = persisted.capacity_table_path;
        self.catalog_dir = persisted.catalog_dir;
        self.last_box_type = persisted.last_box_type;
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            pricing: self.pricing.clone(),
            capacity_table_path: self.capacity_table_path.clone(),
            catalog_dir: self.catalog_dir.clone(),
            last_box_type: self.last_box_type,
        }
    }

    pub fn replace_sources(
        &mut self,
        table: CapacityTable,
        origin: TableOrigin,
        catalogs: Vec<VendorCatalog>,
        loaded_at: SystemTime,
    ) {
        self.capacity_table = Arc::new(table);
        self.table_origin = origin;
        self.sources.clear();
        self.sources.record_load(DataSource::CapacityTable, loaded_at);
        for catalog in &catalogs {
            self.sources
                .record_load(DataSource::Catalog(catalog.vendor.clone()), loaded_at);
        }
        self.catalogs = Arc::new(catalogs);
        // A result computed against the old snapshot no longer applies.
        self.last_recommendation = None;
    }

    pub fn offering_count(&self) -> usize {
        self.catalogs.iter().map(VendorCatalog::len).sum()
    }
}

#[derive(Clone, Debug, Default)]
pub struct SourceTimestamps {
    entries: HashMap<DataSource, SystemTime>,
}

impl SourceTimestamps {
    pub fn record_load(&mut self, source: DataSource, loaded_at: SystemTime) {
        self.entries.insert(source, loaded_at);
    }

    pub fn loaded_at(&self, source: &DataSource) -> Option<SystemTime> {
        self.entries.get(source).copied()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DataSource, &SystemTime)> {
        self.entries.iter()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DataSource {
    CapacityTable,
    Catalog(String),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub pricing: PricingParams,
    #[serde(default)]
    pub capacity_table_path: Option<PathBuf>,
    #[serde(default)]
    pub catalog_dir: Option<PathBuf>,
    #[serde(default)]
    pub last_box_type: BoxType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CapacityEntry;

    #[test]
    fn persisted_state_fills_missing_fields() {
        let json = r#"{ "pricing": { "markup_factor": 1.3, "rounding_unit": 25.0 } }"#;
        let parsed: PersistedState = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.pricing.markup_factor, 1.3);
        assert_eq!(parsed.catalog_dir, None);
        assert_eq!(parsed.last_box_type, BoxType::Cooler);

        let empty: PersistedState = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, PersistedState::default());
    }

    #[test]
    fn persisted_round_trip_through_state() {
        let mut state = AppState::default();
        state.apply_persisted(PersistedState {
            pricing: PricingParams {
                markup_factor: 1.4,
                rounding_unit: 10.0,
            },
            capacity_table_path: Some(PathBuf::from("/tmp/btu.csv")),
            catalog_dir: Some(PathBuf::from("/tmp/catalogs")),
            last_box_type: BoxType::Freezer,
        });
        let snapshot = state.to_persisted();
        assert_eq!(snapshot.pricing.markup_factor, 1.4);
        assert_eq!(snapshot.last_box_type, BoxType::Freezer);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: PersistedState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn replacing_sources_resets_result_and_timestamps() {
        let mut state = AppState::default();
        let now = SystemTime::now();
        state.replace_sources(
            CapacityTable::from_entries([CapacityEntry {
                box_type: BoxType::Cooler,
                width: 8,
                depth: 10,
                required_btu: 9_650,
            }]),
            TableOrigin::Bundled,
            vec![VendorCatalog::new("Turbo Air", Vec::new())],
            now,
        );
        assert_eq!(state.capacity_table.len(), 1);
        assert_eq!(state.sources.iter().count(), 2);
        assert_eq!(
            state
                .sources
                .loaded_at(&DataSource::Catalog("Turbo Air".to_string())),
            Some(now)
        );
        assert!(state.last_recommendation.is_none());
    }
}

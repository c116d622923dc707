//! BTU requirements table and the resolver that maps a box onto it.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::entities::{size_label, BoxType, CapacityEntry};

#[derive(Clone, Debug, PartialEq, Error)]
pub enum CapacityLookupError {
    #[error(
        "{box_type} box {width}x{depth} exceeds the standard capacity table; manual sizing required"
    )]
    ExceedsTable {
        box_type: BoxType,
        width: f64,
        depth: f64,
    },
    #[error("box dimensions must be positive numbers, got {width}x{depth}")]
    InvalidDimensions { width: f64, depth: f64 },
}

/// Outcome of a table lookup, before the coil rule is applied.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedCapacity {
    pub required_btu: u32,
    pub width: u32,
    pub depth: u32,
    pub box_size_used: String,
    pub is_exact_match: bool,
}

impl ResolvedCapacity {
    fn from_entry(entry: &CapacityEntry, is_exact_match: bool) -> Self {
        Self {
            required_btu: entry.required_btu,
            width: entry.width,
            depth: entry.depth,
            box_size_used: entry.size_label(),
            is_exact_match,
        }
    }
}

type SizeKey = (BoxType, u32, u32);

/// Immutable snapshot of the BTU requirements table.
#[derive(Clone, Debug, Default)]
pub struct CapacityTable {
    entries: Vec<CapacityEntry>,
    index: HashMap<SizeKey, usize>,
}

impl CapacityTable {
    /// Builds a table; a repeated (type, width, depth) key keeps the first row.
    pub fn from_entries(entries: impl IntoIterator<Item = CapacityEntry>) -> Self {
        let mut table = Self::default();
        for entry in entries {
            let key = (entry.box_type, entry.width, entry.depth);
            if let Some(&existing) = table.index.get(&key) {
                warn!(
                    size = %entry.size_label(),
                    box_type = %entry.box_type,
                    kept_btu = table.entries[existing].required_btu,
                    dropped_btu = entry.required_btu,
                    "duplicate capacity row ignored"
                );
                continue;
            }
            table.index.insert(key, table.entries.len());
            table.entries.push(entry);
        }
        table
    }

    pub fn entries(&self) -> &[CapacityEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_for(&self, box_type: BoxType) -> usize {
        self.entries_for(box_type).count()
    }

    pub fn get(&self, box_type: BoxType, width: u32, depth: u32) -> Option<&CapacityEntry> {
        self.index
            .get(&(box_type, width, depth))
            .map(|&idx| &self.entries[idx])
    }

    fn entries_for(&self, box_type: BoxType) -> impl Iterator<Item = &CapacityEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.box_type == box_type)
    }

    /// Finds the required BTU for a box.
    ///
    /// Lookup order:
    /// 1. exact `WxD` key (dimensions truncated to whole feet)
    /// 2. transposed `DxW` key, since orientation does not change the load
    /// 3. the smallest-area entry that is at least as large on both axes,
    ///    narrower width first on equal area (non-exact)
    pub fn resolve(
        &self,
        box_type: BoxType,
        width: f64,
        depth: f64,
    ) -> Result<ResolvedCapacity, CapacityLookupError> {
        if !(width.is_finite() && depth.is_finite() && width > 0.0 && depth > 0.0) {
            return Err(CapacityLookupError::InvalidDimensions { width, depth });
        }

        let nominal_width = width.trunc() as u32;
        let nominal_depth = depth.trunc() as u32;

        if let Some(entry) = self.get(box_type, nominal_width, nominal_depth) {
            debug!(size = %entry.size_label(), "exact capacity match");
            return Ok(ResolvedCapacity::from_entry(entry, true));
        }

        if let Some(entry) = self.get(box_type, nominal_depth, nominal_width) {
            debug!(size = %entry.size_label(), "transposed capacity match");
            return Ok(ResolvedCapacity::from_entry(entry, true));
        }

        let next_size = self
            .entries_for(box_type)
            .filter(|entry| f64::from(entry.width) >= width && f64::from(entry.depth) >= depth)
            .min_by_key(|entry| (entry.area(), entry.width));

        match next_size {
            Some(entry) => {
                debug!(
                    requested = %size_label(nominal_width, nominal_depth),
                    used = %entry.size_label(),
                    "no exact capacity row, rounded up"
                );
                Ok(ResolvedCapacity::from_entry(entry, false))
            }
            None => Err(CapacityLookupError::ExceedsTable {
                box_type,
                width,
                depth,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(box_type: BoxType, width: u32, depth: u32, required_btu: u32) -> CapacityEntry {
        CapacityEntry {
            box_type,
            width,
            depth,
            required_btu,
        }
    }

    fn sample_table() -> CapacityTable {
        CapacityTable::from_entries([
            entry(BoxType::Cooler, 6, 8, 6_100),
            entry(BoxType::Cooler, 8, 10, 9_650),
            entry(BoxType::Cooler, 8, 12, 10_900),
            entry(BoxType::Cooler, 10, 10, 11_200),
            entry(BoxType::Cooler, 10, 12, 12_700),
            entry(BoxType::Cooler, 12, 20, 19_800),
            entry(BoxType::Cooler, 40, 20, 51_000),
            entry(BoxType::Freezer, 8, 10, 12_400),
            entry(BoxType::Freezer, 10, 12, 15_900),
        ])
    }

    #[test]
    fn every_entry_resolves_exactly() {
        let table = sample_table();
        for row in table.entries() {
            let found = table
                .resolve(row.box_type, f64::from(row.width), f64::from(row.depth))
                .unwrap();
            assert_eq!(found.required_btu, row.required_btu);
            assert!(found.is_exact_match);
            assert_eq!(found.box_size_used, row.size_label());
        }
    }

    #[test]
    fn every_entry_resolves_transposed() {
        let table = sample_table();
        for row in table.entries() {
            let found = table
                .resolve(row.box_type, f64::from(row.depth), f64::from(row.width))
                .unwrap();
            assert_eq!(found.required_btu, row.required_btu);
            assert!(found.is_exact_match);
        }
    }

    #[test]
    fn transposed_hit_reports_table_key() {
        let table = sample_table();
        let found = table.resolve(BoxType::Cooler, 10.0, 8.0).unwrap();
        assert_eq!(found.box_size_used, "8x10");
        assert_eq!(found.required_btu, 9_650);
    }

    #[test]
    fn fractional_dimensions_truncate_for_exact_key() {
        let table = sample_table();
        let found = table.resolve(BoxType::Cooler, 8.5, 10.0).unwrap();
        assert!(found.is_exact_match);
        assert_eq!(found.box_size_used, "8x10");
    }

    #[test]
    fn rounds_up_to_smallest_enclosing_area() {
        let table = sample_table();
        // 9x11 fits inside 10x12 (120), 12x20 (240) and 40x20 (800); nothing smaller.
        let found = table.resolve(BoxType::Cooler, 9.0, 11.0).unwrap();
        assert!(!found.is_exact_match);
        assert_eq!(found.box_size_used, "10x12");
        assert_eq!(found.required_btu, 12_700);
    }

    #[test]
    fn both_axes_must_fit_not_just_area() {
        let table = sample_table();
        // 7x19 has a smaller area than 10x10, but only 12x20 covers the depth.
        let found = table.resolve(BoxType::Cooler, 7.0, 19.0).unwrap();
        assert_eq!(found.box_size_used, "12x20");
        assert!(!found.is_exact_match);
    }

    #[test]
    fn equal_area_prefers_narrower_width() {
        let table = CapacityTable::from_entries([
            entry(BoxType::Cooler, 12, 10, 13_000),
            entry(BoxType::Cooler, 10, 12, 12_700),
        ]);
        let found = table.resolve(BoxType::Cooler, 9.0, 9.0).unwrap();
        assert_eq!(found.box_size_used, "10x12");
        assert_eq!(found.required_btu, 12_700);
    }

    #[test]
    fn box_type_is_respected() {
        let table = sample_table();
        let found = table.resolve(BoxType::Freezer, 8.0, 10.0).unwrap();
        assert_eq!(found.required_btu, 12_400);
        let err = table.resolve(BoxType::Freezer, 12.0, 20.0).unwrap_err();
        assert!(matches!(err, CapacityLookupError::ExceedsTable { .. }));
    }

    #[test]
    fn oversized_box_is_an_error() {
        let table = sample_table();
        let err = table.resolve(BoxType::Cooler, 41.0, 10.0).unwrap_err();
        assert_eq!(
            err,
            CapacityLookupError::ExceedsTable {
                box_type: BoxType::Cooler,
                width: 41.0,
                depth: 10.0,
            }
        );
        assert!(err.to_string().contains("manual sizing required"));
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        let table = sample_table();
        assert!(matches!(
            table.resolve(BoxType::Cooler, 0.0, 10.0),
            Err(CapacityLookupError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            table.resolve(BoxType::Cooler, f64::NAN, 10.0),
            Err(CapacityLookupError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn duplicate_rows_keep_first() {
        let table = CapacityTable::from_entries([
            entry(BoxType::Cooler, 8, 10, 9_650),
            entry(BoxType::Cooler, 8, 10, 99_999),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get(BoxType::Cooler, 8, 10).map(|e| e.required_btu),
            Some(9_650)
        );
    }

    #[test]
    fn empty_table_exceeds() {
        let table = CapacityTable::default();
        assert!(matches!(
            table.resolve(BoxType::Cooler, 8.0, 10.0),
            Err(CapacityLookupError::ExceedsTable { .. })
        ));
    }
}

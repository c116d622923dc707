//! Per-vendor equipment matching.

use tracing::trace;

use super::entities::{BoxType, EquipmentOffering};

/// Evaporator product families. Coils from one family are not interchangeable
/// with the other's box type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvaporatorFamily {
    StandardCapacity,
    LowTemperature,
}

impl EvaporatorFamily {
    pub fn for_box(box_type: BoxType) -> Self {
        match box_type {
            BoxType::Cooler => EvaporatorFamily::StandardCapacity,
            BoxType::Freezer => EvaporatorFamily::LowTemperature,
        }
    }

    /// Model-number prefixes that identify this family.
    pub fn model_prefixes(&self) -> &'static [&'static str] {
        match self {
            EvaporatorFamily::StandardCapacity => &["ADR"],
            EvaporatorFamily::LowTemperature => &["LED"],
        }
    }

    pub fn matches(&self, evaporator_model: &str) -> bool {
        let model = evaporator_model.trim().as_bytes();
        self.model_prefixes().iter().any(|prefix| {
            model.len() >= prefix.len()
                && model[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
        })
    }
}

/// Picks the tightest-fitting offering for a requirement, or `None`.
///
/// Offerings must match the box type, the box type's evaporator family and
/// the exact coil count, and must not be rated below `required_btu`. The
/// survivor with the lowest rating wins; equal ratings go to the cheaper
/// system, then to catalog order.
pub fn select_best(
    offerings: &[EquipmentOffering],
    box_type: BoxType,
    required_btu: u32,
    required_evaporator_quantity: u32,
) -> Option<&EquipmentOffering> {
    let family = EvaporatorFamily::for_box(box_type);

    let mut candidates: Vec<&EquipmentOffering> = offerings
        .iter()
        .filter(|offering| offering.box_type == box_type)
        .collect();
    trace!(stage = "box_type", remaining = candidates.len(), "filter stage");

    candidates.retain(|offering| family.matches(&offering.evaporator_model));
    trace!(stage = "evaporator_family", remaining = candidates.len(), "filter stage");

    candidates.retain(|offering| offering.evaporator_quantity == required_evaporator_quantity);
    trace!(stage = "evaporator_quantity", remaining = candidates.len(), "filter stage");

    // Never under-size.
    candidates.retain(|offering| offering.rated_btu >= required_btu);
    trace!(stage = "capacity", remaining = candidates.len(), "filter stage");

    candidates.into_iter().min_by(|a, b| {
        a.rated_btu
            .cmp(&b.rated_btu)
            .then_with(|| a.vendor_cost.total_cmp(&b.vendor_cost))
    })
}

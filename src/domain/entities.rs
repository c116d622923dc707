use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Walk-in box category. Drives which capacity rows and evaporator families apply.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum BoxType {
    #[default]
    Cooler,
    Freezer,
}

impl BoxType {
    pub const ALL: [BoxType; 2] = [BoxType::Cooler, BoxType::Freezer];

    /// Lowercase key used by capacity tables and vendor catalogs.
    pub fn key(&self) -> &'static str {
        match self {
            BoxType::Cooler => "cooler",
            BoxType::Freezer => "freezer",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BoxType::Cooler => "Cooler",
            BoxType::Freezer => "Freezer",
        }
    }
}

impl fmt::Display for BoxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown box type `{0}` (expected cooler or freezer)")]
pub struct ParseBoxTypeError(pub String);

impl FromStr for BoxType {
    type Err = ParseBoxTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("cooler") {
            Ok(BoxType::Cooler)
        } else if trimmed.eq_ignore_ascii_case("freezer") {
            Ok(BoxType::Freezer)
        } else {
            Err(ParseBoxTypeError(trimmed.to_string()))
        }
    }
}

impl TryFrom<String> for BoxType {
    type Error = ParseBoxTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One row of the BTU requirements table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityEntry {
    pub box_type: BoxType,
    /// Nominal width in feet.
    pub width: u32,
    /// Nominal depth in feet.
    pub depth: u32,
    pub required_btu: u32,
}

impl CapacityEntry {
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.depth)
    }

    pub fn size_label(&self) -> String {
        size_label(self.width, self.depth)
    }
}

/// Renders a nominal `WxD` size key.
pub fn size_label(width: u32, depth: u32) -> String {
    format!("{width}x{depth}")
}

/// One purchasable condensing unit + evaporator configuration from a vendor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquipmentOffering {
    pub box_type: BoxType,
    pub condensing_unit_model: String,
    pub horsepower: f64,
    pub evaporator_model: String,
    pub evaporator_quantity: u32,
    /// Capacity under the reference refrigerant condition (R-448A).
    pub rated_btu: u32,
    pub vendor_cost: f64,
}

/// A vendor name and the offerings it publishes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VendorCatalog {
    pub vendor: String,
    pub offerings: Vec<EquipmentOffering>,
}

impl VendorCatalog {
    pub fn new(vendor: impl Into<String>, offerings: Vec<EquipmentOffering>) -> Self {
        Self {
            vendor: vendor.into(),
            offerings,
        }
    }

    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }

    pub fn count_for(&self, box_type: BoxType) -> usize {
        self.offerings
            .iter()
            .filter(|offering| offering.box_type == box_type)
            .count()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub box_type: BoxType,
    pub external_width: f64,
    pub external_depth: f64,
}

impl SelectionRequest {
    pub fn new(box_type: BoxType, external_width: f64, external_depth: f64) -> Self {
        Self {
            box_type,
            external_width,
            external_depth,
        }
    }

    /// Truncated `WxD` label of the requested box itself.
    pub fn box_size_label(&self) -> String {
        size_label(
            self.external_width.trunc() as u32,
            self.external_depth.trunc() as u32,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SizingResult {
    pub required_btu: u32,
    /// The table key actually matched, e.g. `10x8` for a transposed hit.
    pub box_size_used: String,
    /// False whenever the value came from rounding up to a larger entry.
    pub is_exact_match: bool,
    pub required_evaporator_quantity: u32,
    pub dual_coil_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EquipmentSelection {
    pub vendor: String,
    pub offering: EquipmentOffering,
    pub vendor_cost: f64,
    pub customer_price: f64,
    pub markup_amount: f64,
    pub oversizing_percent: f64,
    pub meets_requirement: bool,
}

impl EquipmentSelection {
    pub fn rated_btu(&self) -> u32 {
        self.offering.rated_btu
    }

    pub fn evaporator_quantity(&self) -> u32 {
        self.offering.evaporator_quantity
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecommendedVendor {
    pub vendor: String,
    pub customer_price: f64,
    /// Price gap to the next-cheapest vendor; absent when only one vendor matched.
    pub delta_to_next: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Recommendation {
    pub request: SelectionRequest,
    pub sizing: SizingResult,
    /// Vendors with a valid offering, in the order their catalogs were supplied.
    pub vendor_options: Vec<EquipmentSelection>,
    pub recommended: Option<RecommendedVendor>,
}

impl Recommendation {
    pub fn option_for(&self, vendor: &str) -> Option<&EquipmentSelection> {
        self.vendor_options
            .iter()
            .find(|selection| selection.vendor == vendor)
    }

    pub fn recommended_option(&self) -> Option<&EquipmentSelection> {
        self.recommended
            .as_ref()
            .and_then(|pick| self.option_for(&pick.vendor))
    }

    pub fn is_recommended(&self, vendor: &str) -> bool {
        self.recommended
            .as_ref()
            .map(|pick| pick.vendor == vendor)
            .unwrap_or(false)
    }
}

/// Markup configuration applied to every vendor cost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingParams {
    pub markup_factor: f64,
    pub rounding_unit: f64,
}

impl Default for PricingParams {
    fn default() -> Self {
        Self {
            markup_factor: 1.25,
            rounding_unit: 50.0,
        }
    }
}

impl PricingParams {
    pub fn validate(&self) -> Result<(), PricingError> {
        if !self.markup_factor.is_finite() || self.markup_factor <= 0.0 {
            return Err(PricingError::InvalidMarkup(self.markup_factor));
        }
        if !self.rounding_unit.is_finite() || self.rounding_unit <= 0.0 {
            return Err(PricingError::InvalidRoundingUnit(self.rounding_unit));
        }
        Ok(())
    }

    /// Markup expressed as a whole percentage, e.g. `25` for 1.25.
    pub fn markup_percent(&self) -> f64 {
        (self.markup_factor - 1.0) * 100.0
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("markup factor must be a positive number, got {0}")]
    InvalidMarkup(f64),
    #[error("rounding unit must be a positive number, got {0}")]
    InvalidRoundingUnit(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_type_parses_any_case() {
        assert_eq!("Cooler".parse::<BoxType>(), Ok(BoxType::Cooler));
        assert_eq!(" FREEZER ".parse::<BoxType>(), Ok(BoxType::Freezer));
        assert!("chiller".parse::<BoxType>().is_err());
    }

    #[test]
    fn box_type_serializes_lowercase() {
        let json = serde_json::to_string(&BoxType::Freezer).unwrap();
        assert_eq!(json, "\"freezer\"");
        let back: BoxType = serde_json::from_str("\"Cooler\"").unwrap();
        assert_eq!(back, BoxType::Cooler);
    }

    #[test]
    fn request_label_truncates() {
        let request = SelectionRequest::new(BoxType::Cooler, 8.9, 10.2);
        assert_eq!(request.box_size_label(), "8x10");
    }

    #[test]
    fn pricing_params_reject_nonsense() {
        assert!(PricingParams::default().validate().is_ok());
        let bad = PricingParams {
            markup_factor: 0.0,
            ..PricingParams::default()
        };
        assert_eq!(bad.validate(), Err(PricingError::InvalidMarkup(0.0)));
        let bad_unit = PricingParams {
            rounding_unit: f64::NAN,
            ..PricingParams::default()
        };
        assert!(matches!(
            bad_unit.validate(),
            Err(PricingError::InvalidRoundingUnit(_))
        ));
    }
}

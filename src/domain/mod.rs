//! Equipment sizing, matching and vendor comparison live here.

pub mod app_state;
pub mod capacity;
pub mod entities;
pub mod matcher;
pub mod recommendation;
pub mod sizing;

pub use app_state::{AppState, DataSource, PersistedState, SourceTimestamps, TableOrigin};
pub use capacity::{CapacityLookupError, CapacityTable, ResolvedCapacity};
pub use entities::{
    size_label, BoxType, CapacityEntry, EquipmentOffering, EquipmentSelection, ParseBoxTypeError,
    PricingError, PricingParams, Recommendation, RecommendedVendor, SelectionRequest, SizingResult,
    VendorCatalog,
};
pub use matcher::{select_best, EvaporatorFamily};
pub use recommendation::{
    pick_recommended, price_selection, recommend, round_to_nearest, SelectionError,
};
pub use sizing::{dual_coil_reason, required_evaporator_quantity, size_box, DUAL_COIL_THRESHOLD_FT};

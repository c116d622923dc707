//! Cross-vendor pricing and ranking.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::{
    capacity::{CapacityLookupError, CapacityTable},
    entities::{
        EquipmentOffering, EquipmentSelection, PricingError, PricingParams, Recommendation,
        RecommendedVendor, SelectionRequest, SizingResult, VendorCatalog,
    },
    matcher::select_best,
    sizing::size_box,
};

#[derive(Clone, Debug, PartialEq, Error)]
pub enum SelectionError {
    #[error(transparent)]
    Capacity(#[from] CapacityLookupError),
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Rounds half away from zero to the nearest multiple of `unit`.
///
/// The amount is first snapped to whole cents so a product such as
/// `1500.0 * 1.15` (1724.9999999999998) counts as the midpoint it represents.
pub fn round_to_nearest(amount: f64, unit: f64) -> f64 {
    let cents = (amount * 100.0).round() / 100.0;
    (cents / unit).round() * unit
}

pub fn price_selection(
    vendor: &str,
    offering: &EquipmentOffering,
    sizing: &SizingResult,
    pricing: &PricingParams,
) -> EquipmentSelection {
    let vendor_cost = offering.vendor_cost;
    let customer_price =
        round_to_nearest(vendor_cost * pricing.markup_factor, pricing.rounding_unit);
    let required = f64::from(sizing.required_btu);
    let oversizing_percent = (f64::from(offering.rated_btu) - required) / required * 100.0;

    EquipmentSelection {
        vendor: vendor.to_string(),
        offering: offering.clone(),
        vendor_cost,
        customer_price,
        markup_amount: customer_price - vendor_cost,
        oversizing_percent,
        meets_requirement: offering.rated_btu >= sizing.required_btu,
    }
}

/// Sizes the box, matches every vendor catalog and picks the cheapest result.
///
/// A catalog with no suitable system is left out; if none match, the
/// recommendation carries no pick. Lookup failures abort the whole run.
/// When two catalogs share a vendor name only the first is used.
pub fn recommend(
    table: &CapacityTable,
    request: &SelectionRequest,
    catalogs: &[VendorCatalog],
    pricing: &PricingParams,
) -> Result<Recommendation, SelectionError> {
    pricing.validate()?;
    let sizing = size_box(table, request)?;
    debug!(
        required_btu = sizing.required_btu,
        evaporators = sizing.required_evaporator_quantity,
        exact = sizing.is_exact_match,
        "sized box"
    );

    let mut seen_vendors = HashSet::new();
    let vendor_options: Vec<EquipmentSelection> = catalogs
        .iter()
        .filter(|catalog| {
            let first = seen_vendors.insert(catalog.vendor.as_str());
            if !first {
                warn!(vendor = %catalog.vendor, "ignoring repeated vendor catalog");
            }
            first
        })
        .filter_map(|catalog| {
            let matched = select_best(
                &catalog.offerings,
                request.box_type,
                sizing.required_btu,
                sizing.required_evaporator_quantity,
            );
            if matched.is_none() {
                debug!(vendor = %catalog.vendor, "no matching system");
            }
            matched.map(|offering| price_selection(&catalog.vendor, offering, &sizing, pricing))
        })
        .collect();

    let recommended = pick_recommended(&vendor_options);
    if let Some(pick) = recommended.as_ref() {
        info!(
            vendor = %pick.vendor,
            price = pick.customer_price,
            candidates = vendor_options.len(),
            "recommended vendor"
        );
    }

    Ok(Recommendation {
        request: request.clone(),
        sizing,
        vendor_options,
        recommended,
    })
}

/// Cheapest customer price wins; equal prices keep supplied order.
pub fn pick_recommended(options: &[EquipmentSelection]) -> Option<RecommendedVendor> {
    let mut ranked: Vec<&EquipmentSelection> = options.iter().collect();
    ranked.sort_by(|a, b| a.customer_price.total_cmp(&b.customer_price));

    let best = ranked.first()?;
    let delta_to_next = ranked
        .get(1)
        .map(|runner_up| runner_up.customer_price - best.customer_price);

    Some(RecommendedVendor {
        vendor: best.vendor.clone(),
        customer_price: best.customer_price,
        delta_to_next,
    })
}

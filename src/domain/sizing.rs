use super::{
    capacity::{CapacityLookupError, CapacityTable},
    entities::{SelectionRequest, SizingResult},
};

/// Any dimension beyond this (feet) needs a second evaporator coil.
pub const DUAL_COIL_THRESHOLD_FT: f64 = 30.0;

const DUAL_COIL_REASON: &str = "a box dimension exceeds 30 feet";

pub fn required_evaporator_quantity(width: f64, depth: f64) -> u32 {
    if width > DUAL_COIL_THRESHOLD_FT || depth > DUAL_COIL_THRESHOLD_FT {
        2
    } else {
        1
    }
}

pub fn dual_coil_reason(evaporator_quantity: u32) -> Option<String> {
    (evaporator_quantity >= 2).then(|| DUAL_COIL_REASON.to_string())
}

/// Resolves the BTU requirement and coil count for a request.
pub fn size_box(
    table: &CapacityTable,
    request: &SelectionRequest,
) -> Result<SizingResult, CapacityLookupError> {
    let resolved = table.resolve(
        request.box_type,
        request.external_width,
        request.external_depth,
    )?;
    let required_evaporator_quantity =
        required_evaporator_quantity(request.external_width, request.external_depth);

    Ok(SizingResult {
        required_btu: resolved.required_btu,
        box_size_used: resolved.box_size_used,
        is_exact_match: resolved.is_exact_match,
        required_evaporator_quantity,
        dual_coil_reason: dual_coil_reason(required_evaporator_quantity),
    })
}

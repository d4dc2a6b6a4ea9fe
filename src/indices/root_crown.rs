//! ROOT-CROWN RATIO
//!
//! Root plate size relative to crown projection area. A small root plate
//! under a wide crown is a windthrow candidate.
//!
//! ratio = root_metric / crown_projection_area
//! - ratio > 2          → 0
//! - 1.5 < ratio <= 2   → 1
//! - 1 < ratio <= 1.5   → 2
//! - ratio <= 1         → 3
//! - crown_projection_area <= 0 → -1
//!
//! The numerator is either the root surface diameter or the effective root
//! area. Inspections have used both, so each has its own entry point.

use crate::level::{RiskIndex, RiskLevel};
use crate::record::is_measurement;

pub const ROOT_CROWN_SAFE: f64 = 2.0;
pub const ROOT_CROWN_CAUTION: f64 = 1.5;
pub const ROOT_CROWN_WARNING: f64 = 1.0;

pub fn root_crown_ratio(root_metric: f64, crown_projection_area: f64) -> Option<f64> {
    if !is_measurement(root_metric)
        || !is_measurement(crown_projection_area)
        || crown_projection_area <= 0.0
    {
        return None;
    }
    Some(root_metric / crown_projection_area)
}

fn root_crown_index(root_metric: f64, crown_projection_area: f64) -> RiskIndex {
    match root_crown_ratio(root_metric, crown_projection_area) {
        Some(r) if r > ROOT_CROWN_SAFE => RiskLevel::Stable.into(),
        Some(r) if r > ROOT_CROWN_CAUTION => RiskLevel::Caution.into(),
        Some(r) if r > ROOT_CROWN_WARNING => RiskLevel::Warning.into(),
        Some(_) => RiskLevel::Critical.into(),
        None => RiskIndex::UNDEFINED,
    }
}

/// Root-crown ratio with the root surface diameter as numerator.
pub fn root_crown_ratio_by_surface_diameter(
    root_surface_diameter: f64,
    crown_projection_area: f64,
) -> RiskIndex {
    root_crown_index(root_surface_diameter, crown_projection_area)
}

/// Root-crown ratio with the effective root area as numerator.
pub fn root_crown_ratio_by_effective_area(
    effective_root_area: f64,
    crown_projection_area: f64,
) -> RiskIndex {
    root_crown_index(effective_root_area, crown_projection_area)
}

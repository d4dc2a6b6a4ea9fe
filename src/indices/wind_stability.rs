//! WIND STABILITY INDEX
//!
//! Sail area (height × crown width) carried per unit of root metric.
//!
//! index = height · crown_width / root_metric
//! - index < 0.5        → 0
//! - 0.5 <= index <= 1  → 2
//! - index > 1          → 3
//! - root_metric <= 0   → -1
//!
//! Same numerator ambiguity as the root-crown ratio: one entry point per root
//! metric.

use crate::level::{RiskIndex, RiskLevel};
use crate::record::is_measurement;

pub const WIND_LOWER: f64 = 0.5;
pub const WIND_UPPER: f64 = 1.0;

pub fn wind_stability_ratio(height: f64, crown_width: f64, root_metric: f64) -> Option<f64> {
    if !is_measurement(height)
        || !is_measurement(crown_width)
        || !is_measurement(root_metric)
        || root_metric <= 0.0
    {
        return None;
    }
    Some(height * crown_width / root_metric)
}

fn wind_stability_index(height: f64, crown_width: f64, root_metric: f64) -> RiskIndex {
    match wind_stability_ratio(height, crown_width, root_metric) {
        Some(i) if i < WIND_LOWER => RiskLevel::Stable.into(),
        Some(i) if i <= WIND_UPPER => RiskLevel::Warning.into(),
        Some(_) => RiskLevel::Critical.into(),
        None => RiskIndex::UNDEFINED,
    }
}

/// Wind stability with the root surface diameter as denominator.
pub fn wind_stability_index_by_surface_diameter(
    height: f64,
    crown_width: f64,
    root_surface_diameter: f64,
) -> RiskIndex {
    wind_stability_index(height, crown_width, root_surface_diameter)
}

/// Wind stability with the effective root area as denominator.
pub fn wind_stability_index_by_effective_area(
    height: f64,
    crown_width: f64,
    effective_root_area: f64,
) -> RiskIndex {
    wind_stability_index(height, crown_width, effective_root_area)
}

//! STABILITY INDEX (SLENDERNESS)
//!
//! Height-to-diameter ratio. Slender stems fail more readily under load.
//!
//! | ratio         | index |
//! |---------------|-------|
//! | < 50          | 0     |
//! | 50 ..= 80     | 2     |
//! | (80, 100]     | 3     |
//! | > 100         | -1    |
//!
//! The rule never produces 1. Diameter <= 0 is undefined.

use crate::level::{RiskIndex, RiskLevel};
use crate::record::is_measurement;

pub const STABILITY_LOWER: f64 = 50.0;
pub const STABILITY_UPPER: f64 = 80.0;
pub const STABILITY_LIMIT: f64 = 100.0;

/// height / diameter, or None when the ratio is undefined
pub fn stability_ratio(height: f64, diameter: f64) -> Option<f64> {
    if !is_measurement(height) || !is_measurement(diameter) || diameter <= 0.0 {
        return None;
    }
    Some(height / diameter)
}

pub fn stability_index(height: f64, diameter: f64) -> RiskIndex {
    match stability_ratio(height, diameter) {
        Some(r) if r < STABILITY_LOWER => RiskLevel::Stable.into(),
        Some(r) if r <= STABILITY_UPPER => RiskLevel::Warning.into(),
        Some(r) if r <= STABILITY_LIMIT => RiskLevel::Critical.into(),
        _ => RiskIndex::UNDEFINED,
    }
}

//! GRAVITY-HEIGHT RATIO
//!
//! Estimated height of the centre of gravity relative to total height.
//! A high centre of gravity loads the stem base.
//!
//! ratio = height_estimation / height
//! - ratio < 0.3        → 0
//! - 0.3 <= ratio <= 0.5 → 2
//! - ratio > 0.5        → 3
//! - height <= 0        → -1

use crate::level::{RiskIndex, RiskLevel};
use crate::record::is_measurement;

pub const GRAVITY_LOWER: f64 = 0.3;
pub const GRAVITY_UPPER: f64 = 0.5;

pub fn gravity_height_ratio(height_estimation: f64, height: f64) -> Option<f64> {
    if !is_measurement(height_estimation) || !is_measurement(height) || height <= 0.0 {
        return None;
    }
    Some(height_estimation / height)
}

pub fn gravity_height_index(height_estimation: f64, height: f64) -> RiskIndex {
    match gravity_height_ratio(height_estimation, height) {
        Some(r) if r < GRAVITY_LOWER => RiskLevel::Stable.into(),
        Some(r) if r <= GRAVITY_UPPER => RiskLevel::Warning.into(),
        Some(_) => RiskLevel::Critical.into(),
        None => RiskIndex::UNDEFINED,
    }
}

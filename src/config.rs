//! Classification profile.
//!
//! Thresholds are compile-time constants in the index modules. The only
//! runtime choice is which root measurement feeds the root-crown and wind
//! stability rules. There is no default: callers pick explicitly.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::indices::RootMetric;

/// Root metric choice for the two ambiguous indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassificationProfile {
    pub root_crown_metric: RootMetric,
    pub wind_metric: RootMetric,
}

impl ClassificationProfile {
    pub fn new(root_crown_metric: RootMetric, wind_metric: RootMetric) -> Self {
        Self { root_crown_metric, wind_metric }
    }

    /// Parse a profile from JSON, e.g.
    /// `{"root_crown_metric": "surface_diameter", "wind_metric": "effective_area"}`
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).with_context(|| "Failed to parse classification profile JSON")
    }
}

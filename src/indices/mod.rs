//! Index rules for stability and risk
//!
//! Each rule is implemented in its own module. All of them are pure: they
//! take plain measurements and return a `RiskIndex`, folding division by zero
//! and malformed input into the undefined sentinel.

pub mod stability;
pub mod gravity_height;
pub mod root_crown;
pub mod wind_stability;

pub use stability::{stability_index, stability_ratio};
pub use gravity_height::{gravity_height_index, gravity_height_ratio};
pub use root_crown::{
    root_crown_ratio, root_crown_ratio_by_effective_area, root_crown_ratio_by_surface_diameter,
};
pub use wind_stability::{
    wind_stability_index_by_effective_area, wind_stability_index_by_surface_diameter,
    wind_stability_ratio,
};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::level::RiskIndex;
use crate::record::{Biometric, Biometrics, MeasurementRecord};

/// Root measurement used by the root-crown and wind stability rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootMetric {
    SurfaceDiameter,
    EffectiveArea,
}

impl RootMetric {
    fn field(self) -> Biometric {
        match self {
            RootMetric::SurfaceDiameter => Biometric::RootSurfaceDiameter,
            RootMetric::EffectiveArea => Biometric::EffectiveRootArea,
        }
    }
}

impl fmt::Display for RootMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootMetric::SurfaceDiameter => f.write_str("surface_diameter"),
            RootMetric::EffectiveArea => f.write_str("effective_area"),
        }
    }
}

/// All indices for one record, both root metric variants included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSet {
    pub stability: RiskIndex,
    pub gravity_height: RiskIndex,
    pub root_crown_by_surface: RiskIndex,
    pub root_crown_by_effective_area: RiskIndex,
    pub wind_stability_by_surface: RiskIndex,
    pub wind_stability_by_effective_area: RiskIndex,
}

/// Which index produced a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    Stability,
    GravityHeight,
    RootCrown(RootMetric),
    WindStability(RootMetric),
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Stability => f.write_str("stability_index"),
            IndexKind::GravityHeight => f.write_str("gravity_height_ratio"),
            IndexKind::RootCrown(metric) => write!(f, "root_crown_ratio_by_{}", metric),
            IndexKind::WindStability(metric) => write!(f, "wind_stability_index_by_{}", metric),
        }
    }
}

impl IndexSet {
    pub fn root_crown(&self, metric: RootMetric) -> RiskIndex {
        match metric {
            RootMetric::SurfaceDiameter => self.root_crown_by_surface,
            RootMetric::EffectiveArea => self.root_crown_by_effective_area,
        }
    }

    pub fn wind_stability(&self, metric: RootMetric) -> RiskIndex {
        match metric {
            RootMetric::SurfaceDiameter => self.wind_stability_by_surface,
            RootMetric::EffectiveArea => self.wind_stability_by_effective_area,
        }
    }

    /// The four indices that take part in aggregation for a metric choice.
    pub fn selected(&self, root_crown_metric: RootMetric, wind_metric: RootMetric) -> [(IndexKind, RiskIndex); 4] {
        [
            (IndexKind::Stability, self.stability),
            (IndexKind::GravityHeight, self.gravity_height),
            (IndexKind::RootCrown(root_crown_metric), self.root_crown(root_crown_metric)),
            (IndexKind::WindStability(wind_metric), self.wind_stability(wind_metric)),
        ]
    }
}

// ============================================================================
// Record-level evaluation
// ============================================================================

/// Run a rule only when every input it needs was measured.
fn with_measured<const N: usize>(
    biometrics: &Biometrics,
    fields: [Biometric; N],
    rule: impl FnOnce([f64; N]) -> RiskIndex,
) -> RiskIndex {
    let mut values = [0.0; N];
    for (slot, field) in values.iter_mut().zip(fields) {
        match biometrics.measured(field) {
            Some(v) => *slot = v,
            None => return RiskIndex::UNDEFINED,
        }
    }
    rule(values)
}

fn root_crown_for(biometrics: &Biometrics, metric: RootMetric) -> RiskIndex {
    with_measured(
        biometrics,
        [metric.field(), Biometric::CrownProjectionArea],
        |[root, area]| match metric {
            RootMetric::SurfaceDiameter => root_crown_ratio_by_surface_diameter(root, area),
            RootMetric::EffectiveArea => root_crown_ratio_by_effective_area(root, area),
        },
    )
}

fn wind_stability_for(biometrics: &Biometrics, metric: RootMetric) -> RiskIndex {
    with_measured(
        biometrics,
        [Biometric::Height, Biometric::CrownWidth, metric.field()],
        |[height, crown, root]| match metric {
            RootMetric::SurfaceDiameter => wind_stability_index_by_surface_diameter(height, crown, root),
            RootMetric::EffectiveArea => wind_stability_index_by_effective_area(height, crown, root),
        },
    )
}

/// Compute every index for a record.
///
/// Missing, negative or non-finite inputs give the undefined sentinel for the
/// indices that need them; the other indices are unaffected.
pub fn compute_indices(record: &MeasurementRecord) -> IndexSet {
    let b = &record.biometrics;

    IndexSet {
        stability: with_measured(b, [Biometric::Height, Biometric::Diameter], |[h, d]| {
            stability_index(h, d)
        }),
        gravity_height: with_measured(
            b,
            [Biometric::HeightEstimation, Biometric::Height],
            |[estimation, h]| gravity_height_index(estimation, h),
        ),
        root_crown_by_surface: root_crown_for(b, RootMetric::SurfaceDiameter),
        root_crown_by_effective_area: root_crown_for(b, RootMetric::EffectiveArea),
        wind_stability_by_surface: wind_stability_for(b, RootMetric::SurfaceDiameter),
        wind_stability_by_effective_area: wind_stability_for(b, RootMetric::EffectiveArea),
    }
}

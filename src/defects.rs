//! Defect severity projection.
//!
//! Flattens the fifteen ordinal defect fields of a record into an ordered
//! list, so aggregation never depends on the record's shape.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::MeasurementRecord;

/// Observed defect or exposure criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectCriterion {
    UnbalancedCrown,
    OverextendedBranches,
    Cracks,
    DeadBranches,
    Inclination,
    VForks,
    Cavities,
    BarkDamage,
    SoilLifting,
    CutDamagedRoots,
    BasalRot,
    ExposedSurfaceRoots,
    WindExposure,
    DroughtExposure,
    AggregateStatus,
}

impl DefectCriterion {
    /// Projection order.
    pub const ALL: [DefectCriterion; 15] = [
        DefectCriterion::UnbalancedCrown,
        DefectCriterion::OverextendedBranches,
        DefectCriterion::Cracks,
        DefectCriterion::DeadBranches,
        DefectCriterion::Inclination,
        DefectCriterion::VForks,
        DefectCriterion::Cavities,
        DefectCriterion::BarkDamage,
        DefectCriterion::SoilLifting,
        DefectCriterion::CutDamagedRoots,
        DefectCriterion::BasalRot,
        DefectCriterion::ExposedSurfaceRoots,
        DefectCriterion::WindExposure,
        DefectCriterion::DroughtExposure,
        DefectCriterion::AggregateStatus,
    ];

    /// Field name in the record.
    pub fn key(self) -> &'static str {
        match self {
            DefectCriterion::UnbalancedCrown => "unbalanced_crown",
            DefectCriterion::OverextendedBranches => "overextended_branches",
            DefectCriterion::Cracks => "cracks",
            DefectCriterion::DeadBranches => "dead_branches",
            DefectCriterion::Inclination => "inclination",
            DefectCriterion::VForks => "v_forks",
            DefectCriterion::Cavities => "cavities",
            DefectCriterion::BarkDamage => "bark_damage",
            DefectCriterion::SoilLifting => "soil_lifting",
            DefectCriterion::CutDamagedRoots => "cut_damaged_roots",
            DefectCriterion::BasalRot => "basal_rot",
            DefectCriterion::ExposedSurfaceRoots => "exposed_surface_roots",
            DefectCriterion::WindExposure => "wind_exposure",
            DefectCriterion::DroughtExposure => "drought_exposure",
            DefectCriterion::AggregateStatus => "aggregate_status",
        }
    }
}

impl fmt::Display for DefectCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One (criterion, severity-or-null) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectObservation {
    pub criterion: DefectCriterion,
    /// Raw code as reported; not range-checked here
    pub severity: Option<u8>,
}

/// Project the record's defect fields in `DefectCriterion::ALL` order.
pub fn project_defects(record: &MeasurementRecord) -> Vec<DefectObservation> {
    let d = &record.defects;
    let severities = [
        d.unbalanced_crown,
        d.overextended_branches,
        d.cracks,
        d.dead_branches,
        d.inclination,
        d.v_forks,
        d.cavities,
        d.bark_damage,
        d.soil_lifting,
        d.cut_damaged_roots,
        d.basal_rot,
        d.exposed_surface_roots,
        d.wind_exposure,
        d.drought_exposure,
        d.aggregate_status,
    ];

    DefectCriterion::ALL
        .iter()
        .zip(severities)
        .map(|(&criterion, severity)| DefectObservation { criterion, severity })
        .collect()
}

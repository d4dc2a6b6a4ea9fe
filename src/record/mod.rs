//! Inspection records (EVA).
//!
//! One `MeasurementRecord` is one inspection of one tree element: its
//! biometrics and the ordinal defect codes the inspector entered. Every field
//! is explicitly Present/Absent so rules never coalesce nulls on their own.
//!
//! Records deserialize from the flat JSON shape the inventory backend sends;
//! fields missing from the payload are Absent.

pub mod history;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::defects::{project_defects, DefectCriterion};
use crate::level::RiskLevel;

/// One inspection of one tree element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub element_id: String,
    /// Inspection (or planting) date as reported
    #[serde(default)]
    pub inspected_on: Option<NaiveDate>,
    #[serde(flatten)]
    pub biometrics: Biometrics,
    #[serde(flatten)]
    pub defects: DefectSeverities,
}

/// Tree biometrics in the units the inspector used (metres, m²)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Biometrics {
    pub height: Option<f64>,
    pub diameter: Option<f64>,
    pub crown_width: Option<f64>,
    pub crown_projection_area: Option<f64>,
    pub root_surface_diameter: Option<f64>,
    pub effective_root_area: Option<f64>,
    pub height_estimation: Option<f64>,
}

/// Ordinal defect codes (0 = none .. 3 = high), unset when not assessed.
///
/// Codes are kept as reported. Out-of-range codes survive deserialization and
/// are rejected when the record is classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefectSeverities {
    pub unbalanced_crown: Option<u8>,
    pub overextended_branches: Option<u8>,
    pub cracks: Option<u8>,
    pub dead_branches: Option<u8>,
    pub inclination: Option<u8>,
    pub v_forks: Option<u8>,
    pub cavities: Option<u8>,
    pub bark_damage: Option<u8>,
    pub soil_lifting: Option<u8>,
    pub cut_damaged_roots: Option<u8>,
    pub basal_rot: Option<u8>,
    pub exposed_surface_roots: Option<u8>,
    pub wind_exposure: Option<u8>,
    pub drought_exposure: Option<u8>,
    pub aggregate_status: Option<u8>,
}

/// Biometric field identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biometric {
    Height,
    Diameter,
    CrownWidth,
    CrownProjectionArea,
    RootSurfaceDiameter,
    EffectiveRootArea,
    HeightEstimation,
}

impl Biometric {
    pub const ALL: [Biometric; 7] = [
        Biometric::Height,
        Biometric::Diameter,
        Biometric::CrownWidth,
        Biometric::CrownProjectionArea,
        Biometric::RootSurfaceDiameter,
        Biometric::EffectiveRootArea,
        Biometric::HeightEstimation,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Biometric::Height => "height",
            Biometric::Diameter => "diameter",
            Biometric::CrownWidth => "crown_width",
            Biometric::CrownProjectionArea => "crown_projection_area",
            Biometric::RootSurfaceDiameter => "root_surface_diameter",
            Biometric::EffectiveRootArea => "effective_root_area",
            Biometric::HeightEstimation => "height_estimation",
        }
    }
}

impl fmt::Display for Biometric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Biometrics {
    /// Raw field value, whatever was reported.
    pub fn get(&self, field: Biometric) -> Option<f64> {
        match field {
            Biometric::Height => self.height,
            Biometric::Diameter => self.diameter,
            Biometric::CrownWidth => self.crown_width,
            Biometric::CrownProjectionArea => self.crown_projection_area,
            Biometric::RootSurfaceDiameter => self.root_surface_diameter,
            Biometric::EffectiveRootArea => self.effective_root_area,
            Biometric::HeightEstimation => self.height_estimation,
        }
    }

    /// Field value if it is usable by an index rule (present, finite, >= 0).
    pub fn measured(&self, field: Biometric) -> Option<f64> {
        self.get(field).filter(|v| is_measurement(*v))
    }
}

/// True for finite, non-negative values.
pub(crate) fn is_measurement(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Problem found in a record.
///
/// Biometric issues are informational: the index that needs the field comes
/// out undefined. Severity issues make classification fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasurementIssue {
    Missing(Biometric),
    Negative(Biometric, f64),
    NonFinite(Biometric),
    SeverityOutOfRange(DefectCriterion, u8),
}

impl MeasurementIssue {
    /// Whether the issue prevents classification.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MeasurementIssue::SeverityOutOfRange(..))
    }
}

impl fmt::Display for MeasurementIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementIssue::Missing(field) => write!(f, "{} is missing", field),
            MeasurementIssue::Negative(field, v) => write!(f, "{} is negative ({})", field, v),
            MeasurementIssue::NonFinite(field) => write!(f, "{} is not a finite number", field),
            MeasurementIssue::SeverityOutOfRange(criterion, code) => {
                write!(f, "{} severity {} is outside 0..=3", criterion, code)
            }
        }
    }
}

impl MeasurementRecord {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            ..Default::default()
        }
    }

    /// List every malformed or missing field.
    ///
    /// An empty list means every index can be evaluated and every defect code
    /// is on the ordinal scale.
    pub fn validate(&self) -> Vec<MeasurementIssue> {
        let mut issues = Vec::new();

        for field in Biometric::ALL {
            match self.biometrics.get(field) {
                None => issues.push(MeasurementIssue::Missing(field)),
                Some(v) if !v.is_finite() => issues.push(MeasurementIssue::NonFinite(field)),
                Some(v) if v < 0.0 => issues.push(MeasurementIssue::Negative(field, v)),
                Some(_) => {}
            }
        }

        for observation in project_defects(self) {
            if let Some(code) = observation.severity {
                if RiskLevel::from_code(code).is_none() {
                    issues.push(MeasurementIssue::SeverityOutOfRange(observation.criterion, code));
                }
            }
        }

        issues
    }
}

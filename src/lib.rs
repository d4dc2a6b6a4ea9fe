//! Tree Risk Assessment Engine
//!
//! Deterministic scoring of visual tree inspections (EVA): biometric
//! measurements and ordinal defect observations go in, four stability/risk
//! indices and one aggregate hazard classification come out.
//!
//! Layout:
//! - `record/`: inspection records, validation and per-element history
//! - `indices/`: the four index rules (one module each)
//! - `defects`: projection of defect fields into a flat list
//! - `aggregator`: max-dominance classification, single and batch
//! - `presentation`: message/color/icon lookup tables
//!
//! Everything here is pure and synchronous; batches are classified in
//! parallel with Rayon.

pub mod error;
pub mod level;
pub mod record;
pub mod defects;
pub mod indices;
pub mod aggregator;
pub mod presentation;
pub mod config;

// Re-export commonly used types
pub use error::{AssessmentError, Result};
pub use level::{RiskIndex, RiskLevel};
pub use record::{Biometric, Biometrics, DefectSeverities, MeasurementIssue, MeasurementRecord};
pub use record::history::{InspectionHistory, RecordId, StoredRecord};
pub use defects::{project_defects, DefectCriterion, DefectObservation};
pub use indices::{compute_indices, IndexKind, IndexSet, RootMetric};
pub use aggregator::{
    aggregate_level, assess, classify, classify_batch, HazardAssessment, HazardClassification,
    HazardSummary, Signal,
};
pub use presentation::{aggregate_risk_presentation, per_criterion_severity_presentation, Presentation};
pub use config::ClassificationProfile;

//! Hazard aggregation by max-dominance
//!
//! Pools every recorded defect severity with every defined index value and
//! takes the maximum. Not a weighted score: a single 3 anywhere outranks any
//! number of lower signals. Undefined indices are dropped before the maximum
//! is taken; an empty pool gives an undefined level, never 0.
//!
//! Batches are classified in parallel with Rayon. Every record is independent
//! (no shared state), so the batch result is identical to classifying each
//! record on its own.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::config::ClassificationProfile;
use crate::defects::{project_defects, DefectCriterion, DefectObservation};
use crate::error::{AssessmentError, Result};
use crate::indices::{compute_indices, IndexKind, IndexSet, RootMetric};
use crate::level::{RiskIndex, RiskLevel};
use crate::presentation::aggregate_risk_presentation;
use crate::record::MeasurementRecord;

/// 15 defect criteria + 4 selected indices
const POOL_CAPACITY: usize = 19;

/// Aggregate hazard level with its display tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardClassification {
    /// `None` when no signal was available
    pub level: Option<RiskLevel>,
    pub message: String,
    pub color: String,
    pub icon: String,
}

impl HazardClassification {
    pub fn from_level(level: Option<RiskLevel>) -> Self {
        let presentation = aggregate_risk_presentation(level);
        Self {
            level,
            message: presentation.message.to_string(),
            color: presentation.color.to_string(),
            icon: presentation.icon.to_string(),
        }
    }

    pub fn is_undefined(&self) -> bool {
        self.level.is_none()
    }
}

/// Source of one pooled value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Defect(DefectCriterion),
    Index(IndexKind),
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Defect(criterion) => write!(f, "{}", criterion),
            Signal::Index(kind) => write!(f, "{}", kind),
        }
    }
}

/// Classification plus the inputs that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardAssessment {
    pub element_id: String,
    pub classification: HazardClassification,
    pub indices: IndexSet,
    pub defects: Vec<DefectObservation>,
    /// Signals whose value equals the aggregate level
    pub drivers: Vec<Signal>,
}

// ============================================================================
// Pooling
// ============================================================================

/// Max-dominance over already validated values.
///
/// `None` when there is no recorded defect and no defined index.
pub fn aggregate_level(defects: &[Option<RiskLevel>], indices: &[RiskIndex]) -> Option<RiskLevel> {
    defects
        .iter()
        .flatten()
        .copied()
        .chain(indices.iter().filter_map(|index| index.level()))
        .max()
}

/// Range-check every recorded severity.
fn validated_defects(
    element_id: &str,
    observations: &[DefectObservation],
) -> Result<SmallVec<[(DefectCriterion, RiskLevel); POOL_CAPACITY]>> {
    let mut recorded = SmallVec::new();
    for observation in observations {
        let Some(code) = observation.severity else {
            continue;
        };
        match RiskLevel::from_code(code) {
            Some(level) => recorded.push((observation.criterion, level)),
            None => {
                tracing::warn!(
                    "Rejecting {}: {} severity {} is outside 0..=3",
                    element_id,
                    observation.criterion,
                    code
                );
                return Err(AssessmentError::InvalidInput {
                    criterion: observation.criterion,
                    value: code,
                });
            }
        }
    }
    Ok(recorded)
}

fn signal_pool(
    element_id: &str,
    observations: &[DefectObservation],
    indices: &IndexSet,
    root_crown_metric: RootMetric,
    wind_metric: RootMetric,
) -> Result<SmallVec<[(Signal, RiskLevel); POOL_CAPACITY]>> {
    let mut pool: SmallVec<[(Signal, RiskLevel); POOL_CAPACITY]> = validated_defects(element_id, observations)?
        .into_iter()
        .map(|(criterion, level)| (Signal::Defect(criterion), level))
        .collect();

    for (kind, index) in indices.selected(root_crown_metric, wind_metric) {
        if let Some(level) = index.level() {
            pool.push((Signal::Index(kind), level));
        }
    }
    Ok(pool)
}

fn pool_max(pool: &[(Signal, RiskLevel)]) -> Option<RiskLevel> {
    pool.iter().map(|(_, level)| *level).max()
}

// ============================================================================
// Public API
// ============================================================================

/// Classify one inspection record.
///
/// `root_metric_choice` picks the root-crown ratio variant and
/// `wind_metric_choice` the wind stability variant that join the pool.
/// Stability and gravity-height always join.
///
/// # Errors
/// `AssessmentError::InvalidInput` when a defect code is outside 0..=3.
pub fn classify(
    record: &MeasurementRecord,
    root_metric_choice: RootMetric,
    wind_metric_choice: RootMetric,
) -> Result<HazardClassification> {
    let indices = compute_indices(record);
    let observations = project_defects(record);
    let pool = signal_pool(
        &record.element_id,
        &observations,
        &indices,
        root_metric_choice,
        wind_metric_choice,
    )?;

    let level = pool_max(&pool);
    tracing::debug!(
        "Classified {}: level {:?} from {} signals",
        record.element_id,
        level,
        pool.len()
    );
    Ok(HazardClassification::from_level(level))
}

/// Classify and keep the indices, defects and driving signals.
pub fn assess(record: &MeasurementRecord, profile: &ClassificationProfile) -> Result<HazardAssessment> {
    let indices = compute_indices(record);
    let defects = project_defects(record);
    let pool = signal_pool(
        &record.element_id,
        &defects,
        &indices,
        profile.root_crown_metric,
        profile.wind_metric,
    )?;

    let level = pool_max(&pool);
    let drivers = match level {
        Some(max) => pool
            .iter()
            .filter(|(_, l)| *l == max)
            .map(|(signal, _)| *signal)
            .collect(),
        None => Vec::new(),
    };

    Ok(HazardAssessment {
        element_id: record.element_id.clone(),
        classification: HazardClassification::from_level(level),
        indices,
        defects,
        drivers,
    })
}

/// Classify many records in parallel, preserving input order.
///
/// A failing record yields an `Err` in its slot and does not affect the rest.
pub fn classify_batch(
    records: &[MeasurementRecord],
    profile: &ClassificationProfile,
) -> Vec<Result<HazardClassification>> {
    let results: Vec<_> = records
        .par_iter()
        .map(|record| classify(record, profile.root_crown_metric, profile.wind_metric))
        .collect();

    let summary = HazardSummary::from_classifications(&results);
    tracing::info!(
        "Classified {} records: {} critical, {} warning, {} caution, {} stable, {} undefined, {} failed",
        records.len(),
        summary.critical,
        summary.warning,
        summary.caution,
        summary.stable,
        summary.undefined,
        summary.failed
    );
    results
}

/// Tally of batch outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardSummary {
    pub stable: usize,
    pub caution: usize,
    pub warning: usize,
    pub critical: usize,
    pub undefined: usize,
    pub failed: usize,
}

impl HazardSummary {
    pub fn from_classifications(results: &[Result<HazardClassification>]) -> Self {
        let mut summary = HazardSummary::default();
        for result in results {
            match result {
                Ok(c) => match c.level {
                    Some(RiskLevel::Stable) => summary.stable += 1,
                    Some(RiskLevel::Caution) => summary.caution += 1,
                    Some(RiskLevel::Warning) => summary.warning += 1,
                    Some(RiskLevel::Critical) => summary.critical += 1,
                    None => summary.undefined += 1,
                },
                Err(_) => summary.failed += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.stable + self.caution + self.warning + self.critical + self.undefined + self.failed
    }

    /// Trees at warning or critical.
    pub fn needing_intervention(&self) -> usize {
        self.warning + self.critical
    }
}

//! Display tokens for risk levels.
//!
//! Two separate palettes:
//! - aggregate hazard classification (critical/warning/caution/stable)
//! - per-criterion severity, used for wind and drought exposure display
//!
//! They are intentionally kept apart; their colors differ.

use serde::Serialize;

use crate::level::RiskLevel;

/// Message key, color and icon for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub message: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

// ============================================================================
// Aggregate palette
// ============================================================================

/// Indexed by level code.
static AGGREGATE_TABLE: [Presentation; 4] = [
    Presentation { message: "stable", color: "#6AA84F", icon: "check" },
    Presentation { message: "caution", color: "#00FF00", icon: "check" },
    Presentation { message: "warning", color: "#FFFF00", icon: "alert" },
    Presentation { message: "critical", color: "#FF0000", icon: "blocked" },
];

static AGGREGATE_UNDEFINED: Presentation = Presentation {
    message: "unknown",
    color: "#808080",
    icon: "unknown",
};

/// Presentation of an aggregate hazard level (`None` = undefined).
pub fn aggregate_risk_presentation(level: Option<RiskLevel>) -> Presentation {
    match level {
        Some(level) => AGGREGATE_TABLE[level.code() as usize],
        None => AGGREGATE_UNDEFINED,
    }
}

// ============================================================================
// Per-criterion palette (gold/green/red)
// ============================================================================

static CRITERION_TABLE: [Presentation; 4] = [
    Presentation { message: "none", color: "#008000", icon: "check" },
    Presentation { message: "low", color: "#008000", icon: "check" },
    Presentation { message: "moderate", color: "#FFD700", icon: "alert" },
    Presentation { message: "high", color: "#FF0000", icon: "blocked" },
];

static CRITERION_UNSET: Presentation = Presentation {
    message: "not_assessed",
    color: "#808080",
    icon: "unknown",
};

/// Presentation of a single criterion's severity (`None` = not assessed).
pub fn per_criterion_severity_presentation(severity: Option<RiskLevel>) -> Presentation {
    match severity {
        Some(level) => CRITERION_TABLE[level.code() as usize],
        None => CRITERION_UNSET,
    }
}

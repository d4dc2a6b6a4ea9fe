//! Error types for tree risk assessment

use thiserror::Error;

use crate::defects::DefectCriterion;
use crate::record::history::RecordId;

/// Errors raised while classifying or tracking inspection records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    /// A defect severity code outside {0, 1, 2, 3}
    #[error("Invalid input: {criterion} severity {value} is outside 0..=3")]
    InvalidInput {
        /// Criterion carrying the bad code
        criterion: DefectCriterion,
        /// Code as reported by the caller
        value: u8,
    },

    /// Submission without an element id
    #[error("Inspection record has an empty element id")]
    EmptyElementId,

    /// Deletion of a record the history never held
    #[error("Unknown inspection record: {0}")]
    UnknownRecord(RecordId),
}

/// Result type alias for assessment operations
pub type Result<T> = std::result::Result<T, AssessmentError>;

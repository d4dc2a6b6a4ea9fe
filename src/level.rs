//! Risk levels and index value objects.
//!
//! Every index rule and every defect observation speaks the same ordinal
//! scale (0 = stable .. 3 = critical). An index may also be undefined, which
//! is carried as the integer code -1 at the boundary and as `None` inside.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal risk level shared by defects, indices and the aggregate.
///
/// Serialized as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum RiskLevel {
    Stable = 0,
    Caution = 1,
    Warning = 2,
    Critical = 3,
}

impl RiskLevel {
    /// All levels in ascending order.
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Stable,
        RiskLevel::Caution,
        RiskLevel::Warning,
        RiskLevel::Critical,
    ];

    /// Map an ordinal code to a level. Anything above 3 is rejected.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(RiskLevel::Stable),
            1 => Some(RiskLevel::Caution),
            2 => Some(RiskLevel::Warning),
            3 => Some(RiskLevel::Critical),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<RiskLevel> for u8 {
    fn from(level: RiskLevel) -> Self {
        level.code()
    }
}

impl TryFrom<u8> for RiskLevel {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        RiskLevel::from_code(code).ok_or_else(|| format!("risk level code {} outside 0..=3", code))
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Result of one index rule: a level, or undefined.
///
/// Undefined means the rule could not be evaluated (non-positive denominator,
/// missing or malformed input). It is never the same thing as
/// `RiskLevel::Stable`. On the wire it is the integer -1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub struct RiskIndex(Option<RiskLevel>);

impl RiskIndex {
    /// The -1 sentinel.
    pub const UNDEFINED: RiskIndex = RiskIndex(None);

    pub const fn new(level: RiskLevel) -> Self {
        RiskIndex(Some(level))
    }

    pub fn level(self) -> Option<RiskLevel> {
        self.0
    }

    pub fn is_defined(self) -> bool {
        self.0.is_some()
    }

    /// Integer code in {-1, 0, 1, 2, 3}.
    pub fn code(self) -> i8 {
        match self.0 {
            Some(level) => level.code() as i8,
            None => -1,
        }
    }

    /// Inverse of [`RiskIndex::code`].
    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            -1 => Some(RiskIndex::UNDEFINED),
            0..=3 => RiskLevel::from_code(code as u8).map(RiskIndex::new),
            _ => None,
        }
    }
}

impl From<RiskLevel> for RiskIndex {
    fn from(level: RiskLevel) -> Self {
        RiskIndex::new(level)
    }
}

impl From<RiskIndex> for i8 {
    fn from(index: RiskIndex) -> Self {
        index.code()
    }
}

impl TryFrom<i8> for RiskIndex {
    type Error = String;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        RiskIndex::from_code(code).ok_or_else(|| format!("risk index code {} outside -1..=3", code))
    }
}

impl fmt::Display for RiskIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

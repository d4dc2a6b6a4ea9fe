//! Inspection history per tree element.
//!
//! Each submission is stored under a fresh `RecordId` and becomes the current
//! record for its element; earlier ones stay readable but are never mutated.
//! Only an explicit delete removes a record. Deleting the current record makes
//! the latest remaining one current again.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AssessmentError, Result};
use crate::record::MeasurementRecord;

/// Identifier assigned on submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A submitted record. Read-only once stored.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    id: RecordId,
    record: MeasurementRecord,
}

impl StoredRecord {
    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn record(&self) -> &MeasurementRecord {
        &self.record
    }
}

/// All submissions, grouped by element
#[derive(Debug, Default)]
pub struct InspectionHistory {
    next_id: u64,
    // Oldest first; the last entry is current.
    by_element: FxHashMap<String, Vec<StoredRecord>>,
    owners: FxHashMap<RecordId, String>,
}

impl InspectionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new inspection; it supersedes the element's current record.
    pub fn submit(&mut self, record: MeasurementRecord) -> Result<RecordId> {
        if record.element_id.trim().is_empty() {
            return Err(AssessmentError::EmptyElementId);
        }

        let id = RecordId(self.next_id);
        self.next_id += 1;

        let element_id = record.element_id.clone();
        let entries = self.by_element.entry(element_id.clone()).or_default();
        if let Some(previous) = entries.last() {
            tracing::debug!("Record {} supersedes {} for {}", id, previous.id, element_id);
        }
        entries.push(StoredRecord { id, record });
        self.owners.insert(id, element_id);

        Ok(id)
    }

    pub fn current(&self, element_id: &str) -> Option<&StoredRecord> {
        self.by_element.get(element_id).and_then(|entries| entries.last())
    }

    /// Every stored record for an element, oldest first.
    pub fn history(&self, element_id: &str) -> &[StoredRecord] {
        self.by_element
            .get(element_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn get(&self, id: RecordId) -> Option<&StoredRecord> {
        let element_id = self.owners.get(&id)?;
        self.by_element
            .get(element_id)?
            .iter()
            .find(|stored| stored.id == id)
    }

    /// Administrative removal of one record.
    pub fn delete(&mut self, id: RecordId) -> Result<StoredRecord> {
        let element_id = self
            .owners
            .remove(&id)
            .ok_or(AssessmentError::UnknownRecord(id))?;

        let entries = self
            .by_element
            .get_mut(&element_id)
            .ok_or(AssessmentError::UnknownRecord(id))?;
        let position = entries
            .iter()
            .position(|stored| stored.id == id)
            .ok_or(AssessmentError::UnknownRecord(id))?;
        let removed = entries.remove(position);

        if entries.is_empty() {
            self.by_element.remove(&element_id);
        }
        tracing::info!("Deleted inspection record {} of {}", id, element_id);

        Ok(removed)
    }

    /// Current record of every element, ordered by element id.
    pub fn current_records(&self) -> Vec<&MeasurementRecord> {
        let mut current: Vec<&MeasurementRecord> = self
            .by_element
            .values()
            .filter_map(|entries| entries.last())
            .map(StoredRecord::record)
            .collect();
        current.sort_by(|a, b| a.element_id.cmp(&b.element_id));
        current
    }

    /// Number of elements with at least one record.
    pub fn len(&self) -> usize {
        self.by_element.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_element.is_empty()
    }
}

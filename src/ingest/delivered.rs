//! Consumer-side, append-only record sequence.

use super::Delivery;
use crate::model::Record;

/// Ordered records as seen by the UI.
///
/// # Invariants
/// - Length only grows
/// - Entries are never mutated, removed or reordered
/// - Insertion order equals arrival order
#[derive(Debug, Clone, Default)]
pub struct DeliveredSequence {
    records: Vec<Record>,
    updates: usize,
}

impl DeliveredSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the records of one delivery.
    ///
    /// # Returns
    ///
    /// Number of records appended.
    pub fn apply(&mut self, delivery: Delivery) -> usize {
        let before = self.records.len();
        match delivery {
            Delivery::Record(record) => self.records.push(record),
            Delivery::Batch(batch) => self.records.extend(batch),
        }
        self.updates += 1;
        self.records.len() - before
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if nothing has been delivered yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// All records in order.
    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    /// Number of deliveries applied (one UI update each).
    pub fn update_count(&self) -> usize {
        self.updates
    }
}

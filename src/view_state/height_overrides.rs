//! Sparse per-row height overrides.

use std::collections::HashMap;

/// Measured heights of expanded rows, keyed by row index.
///
/// Absence of a key means the row uses the default height. Entries are added
/// when a row expands and removed when it collapses, so the map never holds
/// stale heights for collapsed rows.
///
/// The consumer owns and mutates this map; the window calculator only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeightOverrides {
    heights: HashMap<usize, u32>,
}

impl HeightOverrides {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the measured height of an expanded row.
    pub fn expand(&mut self, index: usize, height: u32) {
        self.heights.insert(index, height);
    }

    /// Forget a row's override when it collapses.
    ///
    /// # Returns
    ///
    /// The height that was stored, if any.
    pub fn collapse(&mut self, index: usize) -> Option<u32> {
        self.heights.remove(&index)
    }

    /// Overridden height of `index`, if it has one.
    pub fn get(&self, index: usize) -> Option<u32> {
        self.heights.get(&index).copied()
    }

    /// Whether `index` currently has an override (is expanded).
    pub fn contains(&self, index: usize) -> bool {
        self.heights.contains_key(&index)
    }

    /// Height of `index`, falling back to `default_height`.
    pub fn height_of(&self, index: usize, default_height: u32) -> u32 {
        self.get(index).unwrap_or(default_height)
    }

    /// Number of expanded rows.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// True if no row is expanded.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }
}

impl FromIterator<(usize, u32)> for HeightOverrides {
    fn from_iter<I: IntoIterator<Item = (usize, u32)>>(iter: I) -> Self {
        Self {
            heights: iter.into_iter().collect(),
        }
    }
}

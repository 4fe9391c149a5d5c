//! Visible range calculation result

/// Range of rows visible in the current viewport.
///
/// # Invariants
/// - `start_index <= end_index`
/// - `end_index <= item_count` of the list it was computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleRange {
    /// Index of first visible row (inclusive).
    pub start_index: usize,
    /// Index of last visible row (exclusive).
    pub end_index: usize,
    /// Scroll offset the range was computed for.
    pub scroll_offset: u32,
    /// Viewport height the range was computed for.
    pub viewport_height: u32,
}

impl VisibleRange {
    /// Create new visible range.
    ///
    /// # Panics
    /// In debug builds, panics if start_index > end_index.
    pub fn new(start_index: usize, end_index: usize, scroll_offset: u32, viewport_height: u32) -> Self {
        debug_assert!(
            start_index <= end_index,
            "start_index {start_index} > end_index {end_index}"
        );
        Self {
            start_index,
            end_index,
            scroll_offset,
            viewport_height,
        }
    }

    /// Number of visible rows.
    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    /// Check if range is empty.
    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }

    /// Iterate over visible row indices.
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        self.start_index..self.end_index
    }

    /// Check if a specific row index is visible.
    pub fn contains(&self, index: usize) -> bool {
        (self.start_index..self.end_index).contains(&index)
    }
}

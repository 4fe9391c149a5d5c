//! Application state and transitions.
//!
//! AppState is the root state type containing all UI state. Every transition
//! is a plain method so the whole state machine is testable without a terminal.

use crate::ingest::{DeliveredSequence, Delivery, IngestOutcome, IngestReport};
use crate::model::Record;
use crate::view_state::{
    compute_window, total_extent, HeightOverrides, ViewportEvent, ViewportState, Window,
    WindowParams,
};

/// Number of skeleton rows shown before the first record arrives.
pub const DEFAULT_PLACEHOLDER_COUNT: usize = 20;

/// Upper bound on scroll corrections when revealing a row below expanded rows.
const MAX_REVEAL_STEPS: usize = 8;

/// Progress of the background ingest, as shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IngestStatus {
    /// Records may still arrive.
    #[default]
    Streaming,
    /// The source was read to the end.
    Complete {
        /// Lines skipped because they were not valid JSON.
        malformed: usize,
    },
    /// A transport failure stopped the run.
    Failed(String),
    /// The run was cancelled before the end of the stream.
    Cancelled,
}

impl From<&IngestReport> for IngestStatus {
    fn from(report: &IngestReport) -> Self {
        match &report.outcome {
            IngestOutcome::Completed => Self::Complete {
                malformed: report.malformed,
            },
            IngestOutcome::Failed(err) => Self::Failed(err.to_string()),
            IngestOutcome::Cancelled => Self::Cancelled,
        }
    }
}

/// What occupies one row slot of the list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowContent<'a> {
    /// Loading skeleton.
    Placeholder,
    /// A delivered record, collapsed or expanded.
    Record {
        /// The record.
        record: &'a Record,
        /// Whether the row is expanded.
        expanded: bool,
        /// Whether the row is selected.
        selected: bool,
    },
}

/// Application state. Pure data, no side effects.
///
/// # State Machine
///
/// - **Loading**: nothing delivered and the run is still streaming; the list
///   shows `placeholder_count` skeleton rows.
/// - **Populated**: at least one record; the list shows records.
///
/// Selection and expansion only apply to the populated state.
#[derive(Debug, Clone)]
pub struct AppState {
    records: DeliveredSequence,
    overrides: HeightOverrides,
    viewport: ViewportState,
    selected: Option<usize>,
    default_item_height: u32,
    placeholder_count: usize,

    /// Progress of the ingest run.
    pub status: IngestStatus,
}

impl AppState {
    /// Create an empty state in the loading phase.
    pub fn new(default_item_height: u32, placeholder_count: usize) -> Self {
        Self {
            records: DeliveredSequence::new(),
            overrides: HeightOverrides::new(),
            viewport: ViewportState::default(),
            selected: None,
            default_item_height: default_item_height.max(1),
            placeholder_count,
            status: IngestStatus::Streaming,
        }
    }

    /// Append a delivery from the ingest pipeline.
    ///
    /// The first record becomes the selection.
    pub fn apply(&mut self, delivery: Delivery) -> usize {
        let appended = self.records.apply(delivery);
        if self.selected.is_none() && !self.records.is_empty() {
            self.selected = Some(0);
        }
        let extent = self.total_extent();
        self.viewport.clamp(extent);
        appended
    }

    /// Record the end of the ingest run.
    pub fn finish(&mut self, report: &IngestReport) {
        self.status = IngestStatus::from(report);
        let extent = self.total_extent();
        self.viewport.clamp(extent);
    }

    /// Delivered records in arrival order.
    pub fn records(&self) -> &DeliveredSequence {
        &self.records
    }

    /// True while skeleton rows stand in for records.
    pub fn is_loading(&self) -> bool {
        self.records.is_empty() && self.status == IngestStatus::Streaming
    }

    /// Number of row slots in the list.
    pub fn item_count(&self) -> usize {
        if self.is_loading() {
            self.placeholder_count
        } else {
            self.records.len()
        }
    }

    /// Height of a collapsed row.
    pub fn default_item_height(&self) -> u32 {
        self.default_item_height
    }

    /// Sparse heights of expanded rows.
    pub fn overrides(&self) -> &HeightOverrides {
        &self.overrides
    }

    /// Current viewport.
    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    /// Selected record index.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Scrollable extent of the list.
    pub fn total_extent(&self) -> u64 {
        total_extent(self.item_count(), self.default_item_height)
    }

    /// Rows to draw for the current viewport.
    pub fn window(&self) -> Window {
        compute_window(
            &WindowParams {
                scroll_offset: self.viewport.scroll_offset(),
                viewport_height: self.viewport.viewport_height(),
                item_count: self.item_count(),
                default_item_height: self.default_item_height,
            },
            &self.overrides,
        )
    }

    /// Height a row occupies when drawn.
    pub fn row_height(&self, index: usize) -> u32 {
        self.overrides.height_of(index, self.default_item_height)
    }

    /// Content of row `index`.
    pub fn row(&self, index: usize) -> Option<RowContent<'_>> {
        if self.is_loading() {
            return (index < self.placeholder_count).then_some(RowContent::Placeholder);
        }
        self.records.get(index).map(|record| RowContent::Record {
            record,
            expanded: self.overrides.contains(index),
            selected: self.selected == Some(index),
        })
    }

    /// Forward a viewport change.
    pub fn observe_viewport(&mut self, event: ViewportEvent) -> bool {
        let extent = self.total_extent();
        self.viewport.observe(event, extent)
    }

    /// Set the list's viewport height after a resize.
    pub fn set_viewport_height(&mut self, height: u32) -> bool {
        self.observe_viewport(ViewportEvent::Resized(height))
    }

    /// Scroll without moving the selection (mouse wheel).
    pub fn scroll_by(&mut self, delta: i64) -> bool {
        let extent = self.total_extent();
        self.viewport.scroll_by(delta, extent)
    }

    /// Move the selection down one record.
    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    /// Move the selection up one record.
    pub fn select_prev(&mut self) {
        self.move_selection(-1);
    }

    /// Move the selection down one page.
    pub fn page_down(&mut self) {
        let page = self.page_rows();
        self.move_selection(page);
    }

    /// Move the selection up one page.
    pub fn page_up(&mut self) {
        let page = self.page_rows();
        self.move_selection(-page);
    }

    /// Select the first record.
    pub fn select_first(&mut self) {
        if !self.records.is_empty() {
            self.select(0);
        }
    }

    /// Select the last record.
    pub fn select_last(&mut self) {
        if let Some(last) = self.records.len().checked_sub(1) {
            self.select(last);
        }
    }

    /// Expand or collapse the selected record.
    ///
    /// An expanded row's height is the line count of its pretty-printed JSON.
    /// Collapsing removes the override so no stale height remains.
    pub fn toggle_expand(&mut self) {
        let Some(index) = self.selected else {
            return;
        };
        if self.overrides.collapse(index).is_some() {
            return;
        }
        if let Some(record) = self.records.get(index) {
            let lines = record.pretty().lines().count().max(1);
            self.overrides
                .expand(index, u32::try_from(lines).unwrap_or(u32::MAX));
        }
    }

    fn page_rows(&self) -> i64 {
        i64::from((self.viewport.viewport_height() / self.default_item_height).max(1))
    }

    fn move_selection(&mut self, delta: i64) {
        let Some(last) = self.records.len().checked_sub(1) else {
            return;
        };
        let current = self.selected.unwrap_or(0) as i64;
        let target = (current + delta).clamp(0, last as i64) as usize;
        self.select(target);
    }

    fn select(&mut self, index: usize) {
        self.selected = Some(index);
        let extent = self.total_extent();
        let grid_top = index as u64 * u64::from(self.default_item_height);
        self.viewport.reveal(grid_top, self.default_item_height, extent);

        // Expanded rows above push the row below its grid top, so follow the
        // placement the window calculator will draw. The offset never passes
        // the grid top or the row would leave the visible range.
        let height = u64::from(self.row_height(index));
        let viewport_height = u64::from(self.viewport.viewport_height());
        for _ in 0..MAX_REVEAL_STEPS {
            let Some(top) = self.placed_top(index) else {
                break;
            };
            let scroll = u64::from(self.viewport.scroll_offset());
            if top + height <= scroll + viewport_height {
                break;
            }
            let wanted = if height >= viewport_height {
                top
            } else {
                top + height - viewport_height
            };
            let target = u32::try_from(wanted.min(grid_top)).unwrap_or(u32::MAX);
            if !self
                .viewport
                .observe(ViewportEvent::Scrolled(target), extent)
            {
                break;
            }
        }
    }

    fn placed_top(&self, index: usize) -> Option<u64> {
        self.window()
            .rows
            .iter()
            .find(|row| row.index == index)
            .map(|row| row.placement.top)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(1, DEFAULT_PLACEHOLDER_COUNT)
    }
}

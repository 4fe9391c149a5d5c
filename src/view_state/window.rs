//! Variable-height window calculation.
//!
//! Pure functions mapping scroll offset, viewport height, item count, default
//! row height and the sparse [`HeightOverrides`] to the rows that must be
//! rendered and where each one goes.
//!
//! # Approximations
//!
//! Both are deliberate and covered by tests; do not "fix" one without the other.
//!
//! - Carry-over drift is accumulated only while iterating the visible range,
//!   seeded from the row immediately preceding `start_index`. Taller rows
//!   further above the viewport do not shift visible rows.
//! - [`total_extent`] is `item_count * default_height` and ignores drift, so
//!   the scrollable extent under-represents content when rows are expanded.
//!
//! # Complexity
//!
//! Linear in the number of visible rows; independent of `item_count` and of
//! the number of overrides.

use super::height_overrides::HeightOverrides;
use super::visible_range::VisibleRange;

/// Inputs that change on every scroll or resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowParams {
    /// Current scroll offset from the top of the list.
    pub scroll_offset: u32,
    /// Height of the rendering surface.
    pub viewport_height: u32,
    /// Number of rows in the list.
    pub item_count: usize,
    /// Height of a row without an override. Zero is treated as one.
    pub default_item_height: u32,
}

impl WindowParams {
    fn row_height(&self) -> u64 {
        u64::from(self.default_item_height.max(1))
    }
}

/// CSS-style positioning scheme of a placed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Positioned relative to the list container, outside normal flow.
    Absolute,
}

/// Horizontal extent of a placed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Full width of the list container.
    Full,
}

/// Where to draw one row, without any layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Always [`Position::Absolute`].
    pub position: Position,
    /// Offset of the row's top edge from the top of the list.
    pub top: u64,
    /// Always [`Width::Full`].
    pub width: Width,
}

impl Placement {
    /// Absolutely positioned, full-width placement at `top`.
    pub fn absolute(top: u64) -> Self {
        Self {
            position: Position::Absolute,
            top,
            width: Width::Full,
        }
    }
}

/// A visible row and its placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedRow {
    /// Row index in the list.
    pub index: usize,
    /// Where to draw it.
    pub placement: Placement,
}

/// Result of one window calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    /// Visible index range.
    pub range: VisibleRange,
    /// One entry per index in `range`, in order.
    pub rows: Vec<PlacedRow>,
    /// Reported scrollable extent (see module docs).
    pub total_extent: u64,
}

/// Compute the contiguous visible index range.
///
/// `start = floor(scroll / h)`, `end = min(count, floor((scroll + viewport) / h))`,
/// with `start` clamped to `end`.
pub fn visible_range(params: &WindowParams) -> VisibleRange {
    let height = params.row_height();
    let scroll = u64::from(params.scroll_offset);
    let bottom = scroll + u64::from(params.viewport_height);

    let end = clamp_index(bottom / height, params.item_count);
    let start = clamp_index(scroll / height, end);

    VisibleRange::new(start, end, params.scroll_offset, params.viewport_height)
}

/// Place every row of `range`.
///
/// `top(i) = i * h + carry`, where carry grows by `override(i - 1) - h`
/// whenever the previous row's override exceeds the default height.
pub fn place_rows(
    range: &VisibleRange,
    default_item_height: u32,
    overrides: &HeightOverrides,
) -> Vec<PlacedRow> {
    let height = u64::from(default_item_height.max(1));
    let mut carry_over = 0u64;

    range
        .indices()
        .map(|index| {
            let previous = index
                .checked_sub(1)
                .and_then(|prev| overrides.get(prev))
                .map(u64::from);
            if let Some(previous) = previous.filter(|&prev| prev > height) {
                carry_over += previous - height;
            }

            PlacedRow {
                index,
                placement: Placement::absolute(index as u64 * height + carry_over),
            }
        })
        .collect()
}

/// Scrollable extent reported for the list: `item_count * h`.
pub fn total_extent(item_count: usize, default_item_height: u32) -> u64 {
    item_count as u64 * u64::from(default_item_height.max(1))
}

/// Visible range, placements and extent in one call.
pub fn compute_window(params: &WindowParams, overrides: &HeightOverrides) -> Window {
    let range = visible_range(params);
    let rows = place_rows(&range, params.default_item_height, overrides);
    Window {
        range,
        rows,
        total_extent: total_extent(params.item_count, params.default_item_height),
    }
}

fn clamp_index(value: u64, max: usize) -> usize {
    usize::try_from(value).map_or(max, |index| index.min(max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(scroll_offset: u32, viewport_height: u32, item_count: usize) -> WindowParams {
        WindowParams {
            scroll_offset,
            viewport_height,
            item_count,
            default_item_height: 50,
        }
    }

    fn tops(window: &Window) -> Vec<u64> {
        window.rows.iter().map(|row| row.placement.top).collect()
    }

    #[test]
    fn range_for_scrolled_viewport() {
        let range = visible_range(&params(275, 400, 100));
        assert_eq!(range.start_index, 5);
        assert_eq!(range.end_index, 13);
    }

    #[test]
    fn end_is_clamped_to_item_count() {
        let range = visible_range(&params(0, 10_000, 7));
        assert_eq!(range.start_index, 0);
        assert_eq!(range.end_index, 7);
    }

    #[test]
    fn scrolled_past_the_end_yields_empty_range() {
        let range = visible_range(&params(5_000, 400, 10));
        assert!(range.is_empty());
        assert_eq!(range.end_index, 10);
        assert_eq!(range.start_index, 10);
    }

    #[test]
    fn zero_viewport_renders_nothing() {
        let range = visible_range(&params(0, 0, 100));
        assert!(range.is_empty());
    }

    #[test]
    fn empty_list_renders_nothing() {
        let window = compute_window(&params(0, 400, 0), &HeightOverrides::new());
        assert!(window.rows.is_empty());
        assert_eq!(window.total_extent, 0);
    }

    #[test]
    fn without_overrides_rows_sit_on_the_grid() {
        let window = compute_window(&params(275, 400, 100), &HeightOverrides::new());
        assert_eq!(
            tops(&window),
            (5..13).map(|i| i * 50).collect::<Vec<u64>>()
        );
        assert!(window
            .rows
            .iter()
            .all(|row| row.placement.position == Position::Absolute
                && row.placement.width == Width::Full));
    }

    #[test]
    fn taller_row_pushes_later_rows_down() {
        let overrides: HeightOverrides = [(4, 120)].into_iter().collect();
        let window = compute_window(&params(0, 300, 100), &overrides);

        assert_eq!(window.range.end_index, 6);
        assert_eq!(tops(&window), vec![0, 50, 100, 150, 200, 320]);
    }

    #[test]
    fn carry_accumulates_across_several_tall_rows() {
        let overrides: HeightOverrides = [(1, 80), (2, 60)].into_iter().collect();
        let window = compute_window(&params(0, 250, 100), &overrides);

        // row 2: +30 from row 1; row 3: +30 +10 from row 2
        assert_eq!(tops(&window), vec![0, 50, 130, 190, 240]);
    }

    #[test]
    fn shorter_override_contributes_nothing() {
        let overrides: HeightOverrides = [(2, 20)].into_iter().collect();
        let window = compute_window(&params(0, 250, 100), &overrides);
        assert_eq!(tops(&window), vec![0, 50, 100, 150, 200]);
    }

    #[test]
    fn carry_is_seeded_from_row_just_above_start() {
        let overrides: HeightOverrides = [(4, 120)].into_iter().collect();
        let window = compute_window(&params(250, 100, 100), &overrides);

        assert_eq!(window.range.start_index, 5);
        assert_eq!(tops(&window), vec![320, 370]);
    }

    #[test]
    fn drift_from_rows_further_above_is_not_carried() {
        // documented approximation: row 3's excess is forgotten once scrolled past row 4
        let overrides: HeightOverrides = [(3, 200)].into_iter().collect();
        let window = compute_window(&params(250, 100, 100), &overrides);

        assert_eq!(window.range.start_index, 5);
        assert_eq!(tops(&window), vec![250, 300]);
    }

    #[test]
    fn total_extent_ignores_overrides() {
        let overrides: HeightOverrides = [(0, 500), (1, 500)].into_iter().collect();
        let window = compute_window(&params(0, 100, 10), &overrides);
        assert_eq!(window.total_extent, 500);
    }

    #[test]
    fn collapsed_row_stops_contributing_carry() {
        let mut overrides = HeightOverrides::new();
        overrides.expand(4, 120);
        let before = compute_window(&params(0, 300, 100), &overrides);
        assert_eq!(before.rows[5].placement.top, 320);

        overrides.collapse(4);
        let after = compute_window(&params(0, 300, 100), &overrides);
        assert_eq!(after.rows[5].placement.top, 250);
    }

    #[test]
    fn zero_default_height_is_treated_as_one() {
        let window = compute_window(
            &WindowParams {
                scroll_offset: 3,
                viewport_height: 4,
                item_count: 100,
                default_item_height: 0,
            },
            &HeightOverrides::new(),
        );
        assert_eq!(window.range.start_index, 3);
        assert_eq!(window.range.end_index, 7);
        assert_eq!(tops(&window), vec![3, 4, 5, 6]);
    }
}

//! Viewport metrics reported by the rendering surface.

/// Change reported by the viewport observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportEvent {
    /// The rendering surface now has this height.
    Resized(u32),
    /// The user scrolled to this absolute offset.
    Scrolled(u32),
}

/// Current scroll offset and viewport height.
///
/// Transient UI state; every change is followed by a fresh window calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportState {
    scroll_offset: u32,
    viewport_height: u32,
}

impl ViewportState {
    /// Create a viewport at the top of the list.
    pub fn new(viewport_height: u32) -> Self {
        Self {
            scroll_offset: 0,
            viewport_height,
        }
    }

    /// Current scroll offset.
    pub fn scroll_offset(&self) -> u32 {
        self.scroll_offset
    }

    /// Current viewport height.
    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    /// Apply an observed change, clamping the scroll offset to `total_extent`.
    ///
    /// # Returns
    ///
    /// `true` if the state changed and the window must be recomputed.
    pub fn observe(&mut self, event: ViewportEvent, total_extent: u64) -> bool {
        let before = *self;
        match event {
            ViewportEvent::Resized(height) => self.viewport_height = height,
            ViewportEvent::Scrolled(offset) => self.scroll_offset = offset,
        }
        self.clamp(total_extent);
        *self != before
    }

    /// Scroll by a signed amount, saturating at both ends.
    pub fn scroll_by(&mut self, delta: i64, total_extent: u64) -> bool {
        let target = (i64::from(self.scroll_offset) + delta).clamp(0, i64::from(u32::MAX));
        self.observe(ViewportEvent::Scrolled(target as u32), total_extent)
    }

    /// Largest scroll offset that still fills the viewport.
    pub fn max_scroll(&self, total_extent: u64) -> u32 {
        let max = total_extent.saturating_sub(u64::from(self.viewport_height));
        u32::try_from(max).unwrap_or(u32::MAX)
    }

    /// Pull the scroll offset back inside `[0, max_scroll]`.
    pub fn clamp(&mut self, total_extent: u64) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll(total_extent));
    }

    /// Scroll the minimum amount so that `[top, top + height)` is visible.
    ///
    /// A span taller than the viewport is aligned to its top.
    pub fn reveal(&mut self, top: u64, height: u32, total_extent: u64) -> bool {
        let bottom = top + u64::from(height);
        let scroll = u64::from(self.scroll_offset);
        let view_bottom = scroll + u64::from(self.viewport_height);

        let target = if top < scroll || u64::from(height) > u64::from(self.viewport_height) {
            top
        } else if bottom > view_bottom {
            bottom - u64::from(self.viewport_height)
        } else {
            return false;
        };
        let target = u32::try_from(target).unwrap_or(u32::MAX);
        self.observe(ViewportEvent::Scrolled(target), total_extent)
    }
}

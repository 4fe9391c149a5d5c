//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the title line in lines.
pub const TITLE_HEIGHT: u16 = 1;

/// Height of the static `Time` / `Event` header row in lines.
///
/// Sits outside the virtualized list and never scrolls.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width of the expand marker column (`▸ ` / `▾ `).
pub const MARKER_WIDTH: u16 = 2;

/// Width of the time column; fits `YYYY-MM-DD HH:MM:SS.mmm`.
pub const TIME_COLUMN_WIDTH: u16 = 23;

/// Blank columns between the time and event columns.
pub const COLUMN_GAP: u16 = 2;

/// Lines scrolled per mouse wheel notch.
pub const WHEEL_SCROLL_LINES: i64 = 3;

/// Event poll timeout; also the status indicator blink period.
pub const TICK_INTERVAL_MS: u64 = 100;

/// Title shown above the list.
pub const TITLE: &str = "Logs";

/// Lines taken by everything except the list.
pub const fn chrome_height() -> u16 {
    TITLE_HEIGHT + HEADER_HEIGHT + STATUS_BAR_HEIGHT
}

//! Virtualized list view-state (pure core).
//!
//! - [`window`] - visible range and row placement for variable row heights
//! - [`height_overrides`] - sparse heights of expanded rows
//! - [`viewport`] - scroll offset and viewport height
//! - [`visible_range`] - the index range result type

pub mod height_overrides;
pub mod viewport;
pub mod visible_range;
pub mod window;

pub use height_overrides::HeightOverrides;
pub use viewport::{ViewportEvent, ViewportState};
pub use visible_range::VisibleRange;
pub use window::{
    compute_window, place_rows, total_extent, visible_range, Placement, PlacedRow, Position,
    Width, Window, WindowParams,
};

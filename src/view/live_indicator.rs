//! Ingest status indicator for the status bar.
//!
//! - Blinking green `[LIVE]` while records may still arrive
//! - Gray `[DONE]` once the source was read to the end
//! - Red `[FAILED]` after a transport failure
//! - Gray `[STOPPED]` after cancellation

use crate::state::IngestStatus;
use ratatui::{
    style::{Color, Style},
    text::Span,
};

/// Status indicator that renders based on [`IngestStatus`] and blink state.
///
/// Pure and stateless; the blink phase is driven by the event loop's timer.
#[derive(Debug, Clone)]
pub struct LiveIndicator<'a> {
    status: &'a IngestStatus,
    blink_on: bool,
}

impl<'a> LiveIndicator<'a> {
    /// Create an indicator for `status` in the given blink phase.
    pub fn new(status: &'a IngestStatus, blink_on: bool) -> Self {
        Self { status, blink_on }
    }

    /// Render the indicator as a ratatui Span.
    pub fn render(&self) -> Span<'static> {
        match self.status {
            IngestStatus::Streaming if self.blink_on => {
                Span::styled("[LIVE] ", Style::default().fg(Color::Green))
            }
            IngestStatus::Streaming => Span::raw("       "),
            IngestStatus::Complete { .. } => {
                Span::styled("[DONE] ", Style::default().fg(Color::Gray))
            }
            IngestStatus::Failed(_) => Span::styled("[FAILED] ", Style::default().fg(Color::Red)),
            IngestStatus::Cancelled => {
                Span::styled("[STOPPED] ", Style::default().fg(Color::Gray))
            }
        }
    }
}

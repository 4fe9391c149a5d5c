//! Screen layout rendering.
//!
//! Title line, static header row, the virtualized list and a status bar.
//! Only the rows returned by the window calculation are turned into lines.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    Frame,
};

use super::constants::{HEADER_HEIGHT, STATUS_BAR_HEIGHT, TITLE, TITLE_HEIGHT};
use super::live_indicator::LiveIndicator;
use super::log_row::{header_line, row_lines};
use super::styles::RowStyles;
use crate::state::{AppState, IngestStatus};

/// Areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Title line.
    pub title: Rect,
    /// Static header row.
    pub header: Rect,
    /// Virtualized list.
    pub list: Rect,
    /// Status bar.
    pub status: Rect,
}

/// Split the frame into its fixed areas.
pub fn screen_areas(area: Rect) -> ScreenAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    ScreenAreas {
        title: chunks[0],
        header: chunks[1],
        list: chunks[2],
        status: chunks[3],
    }
}

/// Render the whole screen for `state`.
pub fn render_layout(
    frame: &mut Frame,
    state: &AppState,
    source: &str,
    styles: &RowStyles,
    blink_on: bool,
) {
    let areas = screen_areas(frame.area());
    let buf = frame.buffer_mut();

    render_title(buf, areas.title, source, styles);
    buf.set_line(
        areas.header.x,
        areas.header.y,
        &header_line(styles),
        areas.header.width,
    );
    render_list(buf, areas.list, state, styles);
    render_status_bar(buf, areas.status, state, styles, blink_on);
}

fn render_title(buf: &mut Buffer, area: Rect, source: &str, styles: &RowStyles) {
    let line = Line::from(vec![
        Span::styled(TITLE, styles.title),
        Span::styled(format!("  {source}"), styles.status),
    ]);
    buf.set_line(area.x, area.y, &line, area.width);
}

/// Draw the visible rows at `top - scroll_offset`, clipped to `area`.
fn render_list(buf: &mut Buffer, area: Rect, state: &AppState, styles: &RowStyles) {
    let window = state.window();
    let scroll = i64::from(window.range.scroll_offset);
    let bottom = i64::from(area.height);

    for placed in &window.rows {
        let Some(content) = state.row(placed.index) else {
            continue;
        };
        let height = state.row_height(placed.index) as usize;
        let row_top = i64::try_from(placed.placement.top).unwrap_or(i64::MAX) - scroll;

        for (offset, line) in row_lines(content, height, area.width, styles)
            .iter()
            .enumerate()
        {
            let y = row_top + offset as i64;
            if y < 0 {
                continue;
            }
            if y >= bottom {
                break;
            }
            let y = area.y + y as u16;
            buf.set_style(Rect::new(area.x, y, area.width, 1), line.style);
            buf.set_line(area.x, y, line, area.width);
        }
    }
}

fn render_status_bar(
    buf: &mut Buffer,
    area: Rect,
    state: &AppState,
    styles: &RowStyles,
    blink_on: bool,
) {
    let mut spans = vec![LiveIndicator::new(&state.status, blink_on).render()];

    let count = state.records().len();
    let mut summary = format!("{count} record{}", if count == 1 { "" } else { "s" });
    if let Some(selected) = state.selected() {
        summary.push_str(&format!("  row {}/{count}", selected + 1));
    }
    spans.push(Span::styled(summary, styles.status));

    match &state.status {
        IngestStatus::Complete { malformed } if *malformed > 0 => {
            spans.push(Span::styled(
                format!("  {malformed} malformed line(s) skipped"),
                styles.status,
            ));
        }
        IngestStatus::Failed(message) => {
            spans.push(Span::styled(format!("  {message}"), styles.error));
        }
        _ => {}
    }

    spans.push(Span::styled(
        "  j/k move  Enter expand  q quit",
        styles.status,
    ));

    buf.set_line(area.x, area.y, &Line::from(spans), area.width);
}

//! Rendering of one list row into terminal lines.
//!
//! A row is laid out as `marker | time | gap | event`. Collapsed records show
//! their compact JSON on one line, expanded records show pretty JSON with
//! continuation lines indented under the event column.

use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::constants::{COLUMN_GAP, MARKER_WIDTH, TIME_COLUMN_WIDTH};
use super::styles::RowStyles;
use crate::state::RowContent;

const ELLIPSIS: char = '…';
const SKELETON: char = '░';
const MISSING_TIME: &str = "-";

/// Width available to the event column in a list of `width` columns.
pub fn event_width(width: u16) -> usize {
    usize::from(width.saturating_sub(MARKER_WIDTH + TIME_COLUMN_WIDTH + COLUMN_GAP))
}

/// Lines for one row, at most `height` of them, each at most `width` wide.
pub fn row_lines(
    content: RowContent<'_>,
    height: usize,
    width: u16,
    styles: &RowStyles,
) -> Vec<Line<'static>> {
    if height == 0 {
        return Vec::new();
    }

    let mut lines = match content {
        RowContent::Placeholder => vec![placeholder_line(width, styles)],
        RowContent::Record {
            record,
            expanded,
            selected,
        } => {
            let time = record
                .formatted_time()
                .unwrap_or_else(|| MISSING_TIME.to_string());
            let event_width = event_width(width);

            let mut lines = if expanded {
                let pretty = record.pretty();
                let mut body = pretty.lines();
                let first = body.next().unwrap_or_default();
                let mut lines = vec![record_line("▾ ", &time, first, event_width, styles)];
                lines.extend(
                    body.take(height.saturating_sub(1))
                        .map(|text| continuation_line(text, event_width, styles)),
                );
                lines
            } else {
                let compact = record.compact();
                vec![record_line("▸ ", &time, &compact, event_width, styles)]
            };

            if selected {
                for line in &mut lines {
                    line.style = line.style.patch(styles.selected);
                }
            }
            lines
        }
    };

    lines.truncate(height);
    lines
}

/// Static `Time` / `Event` header row.
pub fn header_line(styles: &RowStyles) -> Line<'static> {
    Line::from(vec![
        Span::raw(" ".repeat(usize::from(MARKER_WIDTH))),
        Span::styled(
            pad("Time", usize::from(TIME_COLUMN_WIDTH + COLUMN_GAP)),
            styles.header,
        ),
        Span::styled("Event", styles.header),
    ])
}

fn record_line(
    marker: &'static str,
    time: &str,
    event: &str,
    event_width: usize,
    styles: &RowStyles,
) -> Line<'static> {
    Line::from(vec![
        Span::raw(marker),
        Span::styled(
            pad(time, usize::from(TIME_COLUMN_WIDTH + COLUMN_GAP)),
            styles.time,
        ),
        Span::styled(truncate_with_ellipsis(event, event_width), styles.event),
    ])
}

fn continuation_line(text: &str, event_width: usize, styles: &RowStyles) -> Line<'static> {
    let indent = usize::from(MARKER_WIDTH + TIME_COLUMN_WIDTH + COLUMN_GAP);
    Line::from(vec![
        Span::raw(" ".repeat(indent)),
        Span::styled(truncate_with_ellipsis(text, event_width), styles.event),
    ])
}

fn placeholder_line(width: u16, styles: &RowStyles) -> Line<'static> {
    let skeleton = |n: usize| SKELETON.to_string().repeat(n);
    let event = event_width(width) * 3 / 5;
    Line::from(vec![
        Span::raw(" ".repeat(usize::from(MARKER_WIDTH))),
        Span::styled(skeleton(usize::from(TIME_COLUMN_WIDTH)), styles.placeholder),
        Span::raw(" ".repeat(usize::from(COLUMN_GAP))),
        Span::styled(skeleton(event), styles.placeholder),
    ])
}

fn pad(text: &str, width: usize) -> String {
    let text = truncate_with_ellipsis(text, width);
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

/// Cut `text` to `max_width` display columns, ending in `…` when it overflows.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_string();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > budget {
            break;
        }
        used += ch_width;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}

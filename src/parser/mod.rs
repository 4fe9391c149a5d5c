//! NDJSON line parser.
//!
//! Pure function turning one line of text into a [`Record`]. Failures are
//! isolated per line so one malformed line never aborts the stream.

use crate::model::{ParseError, Record};

/// Maximum number of characters of an offending line kept in a [`ParseError`].
const EXCERPT_CHARS: usize = 120;

/// Parse a single NDJSON line.
///
/// # Returns
///
/// - `Ok(Some(record))` for a valid JSON line
/// - `Ok(None)` for an empty or whitespace-only line (a no-op, not a failure)
/// - `Err(ParseError::InvalidJson)` for anything else
///
/// # Arguments
///
/// * `line` - Line content without its terminating newline
/// * `line_number` - 1-based position of the line in the stream, for diagnostics
pub fn parse_record(line: &str, line_number: usize) -> Result<Option<Record>, ParseError> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(line)
        .map(|value| Some(Record::new(value)))
        .map_err(|err| ParseError::InvalidJson {
            line_number,
            excerpt: excerpt(line),
            message: err.to_string(),
        })
}

fn excerpt(line: &str) -> String {
    let mut chars = line.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

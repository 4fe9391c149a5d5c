//! Stateful UTF-8 decoding of a chunked byte stream.
//!
//! A multi-byte code point may be split across two chunks (for example
//! `0xC3` followed by `0xA9` for `é`). The decoder holds such an incomplete
//! tail back until the next chunk arrives instead of decoding every chunk in
//! isolation.
//!
//! A byte order mark at the very start of the stream is dropped; later
//! U+FEFF characters are kept as text.

use std::char::REPLACEMENT_CHARACTER;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Incremental UTF-8 decoder.
///
/// Invalid byte sequences are replaced with U+FFFD rather than failing, so
/// one corrupt byte only damages the line it appears in.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
    started: bool,
}

impl Utf8Decoder {
    /// Create a decoder with no buffered bytes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk.
    ///
    /// Returns all text that can be decoded so far. A trailing incomplete
    /// code point is kept for the next call.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);

        let mut text = String::with_capacity(self.pending.len());
        let mut consumed = 0;

        while consumed < self.pending.len() {
            let rest = &self.pending[consumed..];
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    text.push_str(valid);
                    consumed = self.pending.len();
                }
                Err(err) => {
                    let valid_up_to = err.valid_up_to();
                    text.push_str(&String::from_utf8_lossy(&rest[..valid_up_to]));
                    match err.error_len() {
                        Some(invalid_len) => {
                            text.push(REPLACEMENT_CHARACTER);
                            consumed += valid_up_to + invalid_len;
                        }
                        None => {
                            // Incomplete code point at the end; wait for more bytes.
                            consumed += valid_up_to;
                            break;
                        }
                    }
                }
            }
        }

        self.pending.drain(..consumed);
        self.strip_bom(text)
    }

    /// Flush the decoder at end of stream.
    ///
    /// Any held-back bytes can no longer be completed and decode to U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            return String::new();
        }
        let tail = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        self.strip_bom(tail)
    }

    fn strip_bom(&mut self, text: String) -> String {
        if self.started || text.is_empty() {
            return text;
        }
        self.started = true;
        match text.strip_prefix(BYTE_ORDER_MARK) {
            Some(rest) => rest.to_owned(),
            None => text,
        }
    }

    /// Number of bytes currently held back.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

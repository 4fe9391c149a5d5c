//! Line reassembly across chunk boundaries.

use super::decoder::Utf8Decoder;

/// Turns a sequence of raw byte chunks into complete `\n`-terminated lines.
///
/// The unterminated suffix of the decoded text is held back as a pending
/// fragment and prefixed to the next chunk.
#[derive(Debug, Default)]
pub struct LineReassembler {
    decoder: Utf8Decoder,
    fragment: String,
}

impl LineReassembler {
    /// Create an empty reassembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the next chunk and return every line it completes, in order.
    ///
    /// Lines are returned without their `\n`. Only the newly decoded text is
    /// scanned; the text after its last `\n` (which may be empty) replaces the
    /// pending fragment.
    pub fn consume(&mut self, chunk: &[u8]) -> Vec<String> {
        let decoded = self.decoder.decode(chunk);
        let Some(last_newline) = decoded.rfind('\n') else {
            self.fragment.push_str(&decoded);
            return Vec::new();
        };

        let mut segments = decoded[..last_newline].split('\n');
        let mut lines = Vec::new();
        if let Some(first) = segments.next() {
            let mut completed = std::mem::take(&mut self.fragment);
            completed.push_str(first);
            lines.push(completed);
        }
        lines.extend(segments.map(str::to_owned));
        self.fragment = decoded[last_newline + 1..].to_owned();
        lines
    }

    /// Return the leftover fragment at end of stream and reset.
    ///
    /// The fragment may be a truncated line; the caller decides whether it
    /// is parseable.
    pub fn drain(&mut self) -> String {
        let mut leftover = std::mem::take(&mut self.fragment);
        leftover.push_str(&self.decoder.finish());
        leftover
    }

    /// The currently pending, unterminated fragment.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn whole_lines_in_one_chunk() {
        let mut reassembler = LineReassembler::new();
        let lines = reassembler.consume(b"{\"a\":1}\n{\"b\":2}\n");
        assert_eq!(lines, vec![r#"{"a":1}"#, r#"{"b":2}"#]);
        assert_eq!(reassembler.fragment(), "");
    }

    #[test]
    fn line_split_across_chunks() {
        let mut reassembler = LineReassembler::new();

        assert!(reassembler.consume(br#"{"a":"#).is_empty());
        assert_eq!(reassembler.fragment(), r#"{"a":"#);

        let lines = reassembler.consume(b"1}\n{\"b\":2");
        assert_eq!(lines, vec![r#"{"a":1}"#]);
        assert_eq!(reassembler.fragment(), r#"{"b":2"#);

        let lines = reassembler.consume(b"}\n");
        assert_eq!(lines, vec![r#"{"b":2}"#]);
        assert_eq!(reassembler.drain(), "");
    }

    #[test]
    fn empty_lines_are_returned_for_the_parser_to_skip() {
        let mut reassembler = LineReassembler::new();
        let lines = reassembler.consume(b"a\n\nb\n");
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn unterminated_final_line_is_drained() {
        let mut reassembler = LineReassembler::new();
        let lines = reassembler.consume(b"{\"a\":1}\n{\"b\":2}");
        assert_eq!(lines, vec![r#"{"a":1}"#]);
        assert_eq!(reassembler.drain(), r#"{"b":2}"#);
        assert_eq!(reassembler.drain(), "");
    }

    #[test]
    fn multibyte_character_split_at_chunk_boundary() {
        let text = "{\"msg\":\"naïve\"}\n";
        let bytes = text.as_bytes();
        let split = text.find('ï').unwrap() + 1;

        let mut reassembler = LineReassembler::new();
        assert!(reassembler.consume(&bytes[..split]).is_empty());
        let lines = reassembler.consume(&bytes[split..]);
        assert_eq!(lines, vec!["{\"msg\":\"naïve\"}"]);
    }

    #[test]
    fn long_line_in_many_small_chunks() {
        let line = format!("{{\"msg\":\"{}\"}}", "x".repeat(10_000));
        let payload = format!("{line}\n{{\"b\":2}}\n");

        let mut reassembler = LineReassembler::new();
        let mut lines = Vec::new();
        for chunk in payload.as_bytes().chunks(7) {
            lines.extend(reassembler.consume(chunk));
        }

        assert_eq!(lines, vec![line, r#"{"b":2}"#.to_string()]);
        assert_eq!(reassembler.fragment(), "");
    }

    #[test]
    fn chunk_with_several_newlines_keeps_fragment_prefix() {
        let mut reassembler = LineReassembler::new();
        reassembler.consume(b"ab");
        let lines = reassembler.consume(b"c\nd\n\ne");
        assert_eq!(lines, vec!["abc", "d", ""]);
        assert_eq!(reassembler.fragment(), "e");
    }

    #[test]
    fn newline_only_chunk_completes_fragment() {
        let mut reassembler = LineReassembler::new();
        reassembler.consume(b"abc");
        assert_eq!(reassembler.consume(b"\n"), vec!["abc"]);
    }
}

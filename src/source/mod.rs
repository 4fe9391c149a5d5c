//! NDJSON input sources.
//!
//! This module turns a configured source into lines of text:
//! - [`Source`] - where the payload comes from (HTTP(S) URL or local file)
//! - [`http::open`] - opens a source as an incremental byte stream
//! - [`LineReassembler`] - recovers lines that straddle chunk boundaries
//! - [`Utf8Decoder`] - stateful decoding used by the reassembler

use std::fmt;
use std::path::PathBuf;
use url::Url;

pub mod decoder;
pub mod http;
pub mod reassembler;

pub use decoder::Utf8Decoder;
pub use http::{open, ByteStream};
pub use reassembler::LineReassembler;

/// Location of an NDJSON payload.
///
/// Sum type enforces exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Fetched with an HTTP(S) GET.
    Http(Url),
    /// Read from the local filesystem.
    File(PathBuf),
}

impl Source {
    /// Interpret a user-supplied source string.
    ///
    /// # Logic:
    /// 1. `http://` / `https://` URLs become [`Source::Http`]
    /// 2. `file://` URLs become [`Source::File`]
    /// 3. Anything else is treated as a filesystem path
    pub fn parse(raw: &str) -> Self {
        if let Ok(url) = Url::parse(raw) {
            match url.scheme() {
                "http" | "https" => return Source::Http(url),
                "file" => {
                    if let Ok(path) = url.to_file_path() {
                        return Source::File(path);
                    }
                }
                _ => {}
            }
        }
        Source::File(PathBuf::from(raw))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Http(url) => write!(f, "{url}"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

//! Error types for ndjview.
//!
//! Errors follow a two-tier recovery strategy:
//!
//! - [`StreamError`] - transport failures. Terminal for the ingest run: logged, never
//!   retried, and whatever was already delivered stays visible.
//! - [`ParseError`] - a single malformed NDJSON line. Local and non-fatal: logged and
//!   skipped, sibling lines are unaffected.
//!
//! [`AppError`] wraps everything the binary can fail with at startup or while driving
//! the terminal.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::view::TuiError;

/// Top-level application error returned from the binary's entry points.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// No source was given on the command line, in the environment or in the config file.
    #[error("No input source: pass an NDJSON URL or file path, or set NDJVIEW_SOURCE")]
    NoSource,

    /// Terminal or runtime I/O failure.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The terminal UI failed while running.
    #[error(transparent)]
    Tui(#[from] TuiError),
}

/// Transport failures while opening or reading the NDJSON source.
///
/// Every variant is terminal for one ingest run.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The HTTP request could not be sent (DNS, connection refused, TLS, ...).
    #[error("Failed to fetch {url}: {source}")]
    Request {
        /// URL that was requested.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Failed to fetch {url}: HTTP {status}")]
    Status {
        /// URL that was requested.
        url: String,
        /// Status code returned by the server.
        status: reqwest::StatusCode,
    },

    /// A local source file could not be opened.
    #[error("Failed to open {path:?}: {source}")]
    Open {
        /// File that could not be opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Reading the body failed part-way through the stream.
    #[error("Failed to read the stream: {0}")]
    Read(#[source] std::io::Error),
}

/// A single NDJSON line that is not valid JSON.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The line could not be parsed as JSON.
    #[error("Invalid JSON at line {line_number}: {message} (line: {excerpt:?})")]
    InvalidJson {
        /// 1-based line number within the stream.
        line_number: usize,
        /// Leading part of the offending line, for diagnostics.
        excerpt: String,
        /// Parser error message.
        message: String,
    },
}

impl ParseError {
    /// Line number the error refers to.
    pub fn line_number(&self) -> usize {
        match self {
            ParseError::InvalidJson { line_number, .. } => *line_number,
        }
    }
}

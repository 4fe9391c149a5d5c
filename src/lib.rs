//! NDJSON stream viewer (ndjview)
//!
//! Streams newline-delimited JSON from an HTTP(S) endpoint or a local file and
//! shows it in a virtualized terminal list.
//!
//! Pure core:
//! - [`parser`], [`source::LineReassembler`] - bytes to records
//! - [`view_state`] - variable-height window calculation
//! - [`state`] - UI state machine
//!
//! Impure shell:
//! - [`ingest`] - background streaming pipeline with batched delivery
//! - [`view`] - terminal rendering and the event loop

pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;

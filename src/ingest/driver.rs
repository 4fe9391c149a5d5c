//! Stream driver: fetch → reassemble → parse → admit.
//!
//! This is the only place where a failure can terminate the whole pipeline.
//! Every other failure (one bad line) is local and recoverable.

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::batcher::{AdmissionBatcher, SinkClosed};
use super::{Delivery, IngestOutcome, IngestReport, IngestSettings};
use crate::model::StreamError;
use crate::parser;
use crate::source::{self, LineReassembler};

/// Run one complete ingest of `settings.source`, delivering into `sink`.
///
/// Open failures return a `Failed` report without delivering anything.
/// Otherwise behaves as [`drive`].
pub async fn run(
    settings: &IngestSettings,
    sink: UnboundedSender<Delivery>,
    cancel: &CancellationToken,
) -> IngestReport {
    let opened = tokio::select! {
        biased;
        () = cancel.cancelled() => return IngestReport::cancelled(),
        opened = source::open(&settings.source) => opened,
    };

    let body = match opened {
        Ok(body) => body,
        Err(err) => {
            error!(source = %settings.source, error = %err, "Failed to open NDJSON source");
            return IngestReport {
                outcome: IngestOutcome::Failed(err),
                ..IngestReport::default()
            };
        }
    };

    let batcher = AdmissionBatcher::new(sink, settings.immediate_limit, settings.flush_period);
    drive(body, batcher, cancel).await
}

/// Drive an already-open body stream to completion.
///
/// # Behavior
///
/// - Each chunk is split into lines; each non-blank line is parsed and admitted.
/// - Malformed lines are logged and counted, never fatal.
/// - A read error stops the loop; records admitted so far stay delivered.
/// - After the loop a non-blank leftover fragment is parsed and, if valid,
///   buffered for the final flush.
/// - Cancellation, or the consumer dropping its receiver, stops everything
///   immediately without a final flush.
pub async fn drive<S>(
    body: S,
    mut batcher: AdmissionBatcher,
    cancel: &CancellationToken,
) -> IngestReport
where
    S: Stream<Item = Result<Bytes, StreamError>>,
{
    let mut body = std::pin::pin!(body);
    let mut reassembler = LineReassembler::new();
    let mut line_number = 0usize;
    let mut malformed = 0usize;
    let mut failure = None;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("Ingest cancelled");
                return IngestReport::from_batcher(&batcher, malformed, IngestOutcome::Cancelled);
            }
            () = batcher.tick(), if batcher.is_flush_scheduled() => {
                if batcher.flush().is_err() {
                    return closed(&batcher, malformed);
                }
            }
            chunk = body.next() => match chunk {
                None => break,
                Some(Err(err)) => {
                    error!(error = %err, line_number, "Failed to read the stream");
                    failure = Some(err);
                    break;
                }
                Some(Ok(bytes)) => {
                    debug!(bytes = bytes.len(), "Received chunk");
                    for line in reassembler.consume(&bytes) {
                        line_number += 1;
                        match parser::parse_record(&line, line_number) {
                            Ok(Some(record)) => {
                                if batcher.admit(record).is_err() {
                                    return closed(&batcher, malformed);
                                }
                            }
                            Ok(None) => {}
                            Err(err) => {
                                warn!(error = %err, "Skipping malformed line");
                                malformed += 1;
                            }
                        }
                    }
                }
            }
        }
    }

    let leftover = reassembler.drain();
    if !leftover.trim().is_empty() {
        match parser::parse_record(&leftover, line_number + 1) {
            Ok(Some(record)) => batcher.buffer(record),
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "Skipping malformed final line");
                malformed += 1;
            }
        }
    }

    if let Err(SinkClosed) = batcher.finish() {
        return closed(&batcher, malformed);
    }

    let outcome = match failure {
        Some(err) => IngestOutcome::Failed(err),
        None => IngestOutcome::Completed,
    };
    let report = IngestReport::from_batcher(&batcher, malformed, outcome);
    info!(
        immediate = report.immediate,
        batched = report.batched,
        malformed = report.malformed,
        "Ingest finished"
    );
    report
}

fn closed(batcher: &AdmissionBatcher, malformed: usize) -> IngestReport {
    debug!("Delivery receiver dropped; abandoning ingest");
    IngestReport::from_batcher(batcher, malformed, IngestOutcome::Cancelled)
}

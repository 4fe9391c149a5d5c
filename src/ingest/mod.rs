//! Streaming ingestion pipeline.
//!
//! Data flow:
//!
//! ```text
//! source::open → LineReassembler → parser::parse_record → AdmissionBatcher → Delivery channel
//! ```
//!
//! The pipeline runs on a single-threaded tokio runtime owned by a dedicated
//! ingest thread ([`IngestHandle`]), so the synchronous terminal event loop
//! only ever does non-blocking `try_recv` calls on the delivery channel.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::model::{Record, StreamError};
use crate::source::Source;

pub mod batcher;
pub mod delivered;
pub mod driver;

pub use batcher::{Admission, AdmissionBatcher, SinkClosed};
pub use delivered::DeliveredSequence;
pub use driver::{drive, run};

/// Records delivered below this count skip batching.
pub const DEFAULT_IMMEDIATE_LIMIT: usize = 20;

/// Interval between batched deliveries, in milliseconds.
pub const DEFAULT_FLUSH_PERIOD_MS: u64 = 1000;

/// One ordered append to the consumer's [`DeliveredSequence`].
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// A single record admitted through the immediate path.
    Record(Record),
    /// Every record that was pending at flush time, in arrival order.
    Batch(Vec<Record>),
}

impl Delivery {
    /// Records carried by this delivery, in order.
    pub fn records(&self) -> &[Record] {
        match self {
            Delivery::Record(record) => std::slice::from_ref(record),
            Delivery::Batch(records) => records,
        }
    }

    /// Consume the delivery, returning its records in order.
    pub fn into_records(self) -> Vec<Record> {
        match self {
            Delivery::Record(record) => vec![record],
            Delivery::Batch(records) => records,
        }
    }
}

/// Parameters of one ingest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSettings {
    /// Where to read NDJSON from.
    pub source: Source,
    /// Records delivered individually before batching starts.
    pub immediate_limit: usize,
    /// Period of the batch flush timer.
    pub flush_period: Duration,
}

impl IngestSettings {
    /// Settings with the default limit and flush period.
    pub fn new(source: Source) -> Self {
        Self {
            source,
            immediate_limit: DEFAULT_IMMEDIATE_LIMIT,
            flush_period: Duration::from_millis(DEFAULT_FLUSH_PERIOD_MS),
        }
    }
}

/// How an ingest run ended.
#[derive(Debug, Default)]
pub enum IngestOutcome {
    /// The whole body was read.
    #[default]
    Completed,
    /// A transport failure stopped the run.
    Failed(StreamError),
    /// The run was cancelled or its consumer went away.
    Cancelled,
}

/// Summary of one ingest run.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Records delivered through the immediate path.
    pub immediate: usize,
    /// Records delivered through batches.
    pub batched: usize,
    /// Lines skipped because they were not valid JSON.
    pub malformed: usize,
    /// How the run ended.
    pub outcome: IngestOutcome,
}

impl IngestReport {
    /// Total records delivered.
    pub fn delivered(&self) -> usize {
        self.immediate + self.batched
    }

    pub(crate) fn cancelled() -> Self {
        Self {
            outcome: IngestOutcome::Cancelled,
            ..Self::default()
        }
    }

    pub(crate) fn from_batcher(
        batcher: &AdmissionBatcher,
        malformed: usize,
        outcome: IngestOutcome,
    ) -> Self {
        Self {
            immediate: batcher.delivered_count(),
            batched: batcher.batched_count(),
            malformed,
            outcome,
        }
    }
}

/// A running ingest on its own thread.
///
/// Dropping the handle cancels the run: the read loop is abandoned and the
/// flush timer is dropped with it.
#[derive(Debug)]
pub struct IngestHandle {
    deliveries: UnboundedReceiver<Delivery>,
    cancel: CancellationToken,
    thread: Option<JoinHandle<IngestReport>>,
    report: Option<IngestReport>,
}

impl IngestHandle {
    /// Start ingesting `settings.source` on a background thread.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the runtime or thread cannot be created.
    pub fn spawn(settings: IngestSettings) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (sink, deliveries) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        info!(source = %settings.source, "Starting ingest");
        let thread = thread::Builder::new()
            .name("ndjview-ingest".to_string())
            .spawn(move || runtime.block_on(driver::run(&settings, sink, &task_cancel)))?;

        Ok(Self {
            deliveries,
            cancel,
            thread: Some(thread),
            report: None,
        })
    }

    /// Take every delivery that has arrived so far, without blocking.
    pub fn try_deliveries(&mut self) -> Vec<Delivery> {
        let mut out = Vec::new();
        loop {
            match self.deliveries.try_recv() {
                Ok(delivery) => out.push(delivery),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }

    /// The run's report, once the ingest thread has finished.
    ///
    /// Deliveries still queued in the channel remain available through
    /// [`try_deliveries`](Self::try_deliveries).
    pub fn report(&mut self) -> Option<&IngestReport> {
        if self.report.is_none() {
            let finished = self.thread.as_ref().is_some_and(JoinHandle::is_finished);
            if finished {
                if let Some(thread) = self.thread.take() {
                    self.report = Some(thread.join().unwrap_or_else(|_| {
                        error!("Ingest thread panicked");
                        IngestReport::cancelled()
                    }));
                }
            }
        }
        self.report.as_ref()
    }

    /// Cancel the run and wait for the ingest thread to exit.
    pub fn shutdown(mut self) -> Option<IngestReport> {
        self.cancel.cancel();
        if let Some(thread) = self.thread.take() {
            if let Ok(report) = thread.join() {
                return Some(report);
            }
        }
        self.report.take()
    }
}

impl Drop for IngestHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::time::Instant;

    #[test]
    fn delivery_records_preserve_order() {
        let a = Record::new(json!({"a": 1}));
        let b = Record::new(json!({"b": 2}));

        assert_eq!(Delivery::Record(a.clone()).records(), &[a.clone()]);
        assert_eq!(
            Delivery::Batch(vec![a.clone(), b.clone()]).into_records(),
            vec![a, b]
        );
    }

    #[test]
    fn settings_defaults() {
        let settings = IngestSettings::new(Source::parse("https://example.com/x.log"));
        assert_eq!(settings.immediate_limit, 20);
        assert_eq!(settings.flush_period, Duration::from_millis(1000));
    }

    #[test]
    fn report_delivered_sums_both_paths() {
        let report = IngestReport {
            immediate: 20,
            batched: 5,
            ..IngestReport::default()
        };
        assert_eq!(report.delivered(), 25);
    }

    #[test]
    fn handle_ingests_file_on_background_thread() {
        let path = std::env::temp_dir().join("ndjview_handle_ingests_file.ndjson");
        fs::write(&path, "{\"n\":1}\n{\"n\":2}\nnot json\n{\"n\":3}").unwrap();

        let mut settings = IngestSettings::new(Source::File(path.clone()));
        settings.immediate_limit = 1;
        settings.flush_period = Duration::from_millis(10);
        let mut handle = IngestHandle::spawn(settings).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut records = Vec::new();
        while handle.report().is_none() && Instant::now() < deadline {
            records.extend(handle.try_deliveries().into_iter().flat_map(Delivery::into_records));
            thread::sleep(Duration::from_millis(5));
        }
        records.extend(handle.try_deliveries().into_iter().flat_map(Delivery::into_records));
        let _ = fs::remove_file(&path);

        let report = handle.report().expect("ingest should finish");
        assert!(matches!(report.outcome, IngestOutcome::Completed));
        assert_eq!(report.malformed, 1);
        assert_eq!(
            records,
            vec![
                Record::new(json!({"n": 1})),
                Record::new(json!({"n": 2})),
                Record::new(json!({"n": 3})),
            ]
        );
    }

    #[test]
    fn handle_reports_open_failure() {
        let path = std::env::temp_dir().join("ndjview_handle_missing_98765.ndjson");
        let mut handle = IngestHandle::spawn(IngestSettings::new(Source::File(path))).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while handle.report().is_none() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }

        assert!(handle.try_deliveries().is_empty());
        let report = handle.report().expect("ingest should finish");
        assert!(matches!(
            report.outcome,
            IngestOutcome::Failed(StreamError::Open { .. })
        ));
    }
}

//! Two-speed admission of parsed records.
//!
//! The first `immediate_limit` records are delivered one by one so the first
//! screenful appears at once. Every later record is buffered and delivered in
//! batches on a fixed interval, bounding the number of UI updates for the
//! long tail.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::debug;

use super::Delivery;
use crate::model::Record;

/// The consumer of deliveries has gone away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("delivery receiver dropped")]
pub struct SinkClosed;

/// Which path a record took in [`AdmissionBatcher::admit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Sent straight to the consumer as [`Delivery::Record`].
    Immediate,
    /// Held in the pending buffer until the next flush.
    Buffered,
}

/// Per-run admission state: pending buffer plus its lazily created flush timer.
///
/// Lives for exactly one ingest run.
#[derive(Debug)]
pub struct AdmissionBatcher {
    sink: UnboundedSender<Delivery>,
    immediate_limit: usize,
    delivered_count: usize,
    batched_count: usize,
    pending: Vec<Record>,
    flush_period: Duration,
    flush_timer: Option<Interval>,
}

impl AdmissionBatcher {
    /// Create a batcher delivering into `sink`.
    ///
    /// A zero `flush_period` is clamped to one millisecond.
    pub fn new(
        sink: UnboundedSender<Delivery>,
        immediate_limit: usize,
        flush_period: Duration,
    ) -> Self {
        Self {
            sink,
            immediate_limit,
            delivered_count: 0,
            batched_count: 0,
            pending: Vec::new(),
            flush_period: flush_period.max(Duration::from_millis(1)),
            flush_timer: None,
        }
    }

    /// Admit one parsed record.
    ///
    /// # Errors
    ///
    /// Returns `SinkClosed` if the consumer dropped its receiver.
    pub fn admit(&mut self, record: Record) -> Result<Admission, SinkClosed> {
        if self.delivered_count < self.immediate_limit {
            self.sink
                .send(Delivery::Record(record))
                .map_err(|_| SinkClosed)?;
            self.delivered_count += 1;
            return Ok(Admission::Immediate);
        }

        self.pending.push(record);
        if self.flush_timer.is_none() {
            self.start_timer();
        }
        Ok(Admission::Buffered)
    }

    /// Push a record straight into the pending buffer, bypassing the immediate path.
    pub fn buffer(&mut self, record: Record) {
        self.pending.push(record);
    }

    /// Move the whole pending buffer to the consumer as one batch.
    ///
    /// The buffer is taken before sending, so nothing appended afterwards can
    /// be lost. An empty buffer sends nothing.
    ///
    /// # Returns
    ///
    /// Number of records delivered.
    pub fn flush(&mut self) -> Result<usize, SinkClosed> {
        let batch = std::mem::take(&mut self.pending);
        if batch.is_empty() {
            return Ok(0);
        }
        let len = batch.len();
        self.sink
            .send(Delivery::Batch(batch))
            .map_err(|_| SinkClosed)?;
        self.batched_count += len;
        debug!(records = len, "Flushed batch");
        Ok(len)
    }

    /// Wait for the next flush tick.
    ///
    /// Never resolves while no timer is running, so it is safe to poll in a
    /// `select!` that is guarded by [`is_flush_scheduled`](Self::is_flush_scheduled).
    pub async fn tick(&mut self) {
        match self.flush_timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }

    /// Whether the periodic flush timer is running.
    pub fn is_flush_scheduled(&self) -> bool {
        self.flush_timer.is_some()
    }

    /// Stop the timer and deliver whatever is still pending.
    ///
    /// # Returns
    ///
    /// Number of records delivered by the final flush.
    pub fn finish(&mut self) -> Result<usize, SinkClosed> {
        self.flush_timer = None;
        self.flush()
    }

    /// Records delivered through the immediate path.
    pub fn delivered_count(&self) -> usize {
        self.delivered_count
    }

    /// Records delivered through batches.
    pub fn batched_count(&self) -> usize {
        self.batched_count
    }

    /// Records currently waiting for a flush.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn start_timer(&mut self) {
        // first tick one full period from now, not immediately
        let mut timer = time::interval_at(Instant::now() + self.flush_period, self.flush_period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.flush_timer = Some(timer);
        debug!(period_ms = self.flush_period.as_millis() as u64, "Started flush timer");
    }
}

//! # Print Queue
//!
//! Ordered print jobs with their delivery status.
//!
//! ```text
//! submit ──► Pending ──take──► Printing ──finish──► Completed
//!                                           └─────► Failed
//! ```
//!
//! A job's bytes leave the queue when it starts printing, so a job can be
//! handed to a sink only once. Failed jobs keep their error message and are
//! not retried; the caller decides whether to build and submit again.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::document::PrintJob;
use crate::error::Result;
use crate::transport::TransportSink;

/// Delivery status of a queued job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Printing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Printing => "printing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        })
    }
}

/// Public view of one queued job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueEntry {
    pub id: Uuid,
    pub label: String,
    pub status: JobStatus,
    pub bytes: usize,
    pub error: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug)]
struct Slot {
    entry: QueueEntry,
    job: Option<PrintJob>,
}

/// FIFO of print jobs.
#[derive(Debug, Default)]
pub struct PrintQueue {
    slots: Vec<Slot>,
}

impl PrintQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a job at the back of the queue.
    pub fn submit(&mut self, label: impl Into<String>, job: PrintJob) -> Uuid {
        let entry = QueueEntry {
            id: Uuid::new_v4(),
            label: label.into(),
            status: JobStatus::Pending,
            bytes: job.len(),
            error: None,
            submitted_at: Utc::now(),
        };
        let id = entry.id;
        info!(%id, label = %entry.label, bytes = entry.bytes, "job queued");
        self.slots.push(Slot {
            entry,
            job: Some(job),
        });
        id
    }

    /// Take the bytes of a pending job and mark it printing.
    ///
    /// Returns `None` if the job is unknown or no longer pending.
    pub fn take(&mut self, id: Uuid) -> Option<PrintJob> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.entry.id == id && s.entry.status == JobStatus::Pending)?;
        let job = slot.job.take()?;
        slot.entry.status = JobStatus::Printing;
        Some(job)
    }

    /// Take the oldest pending job and mark it printing.
    pub fn start_next(&mut self) -> Option<(Uuid, PrintJob)> {
        let id = self
            .slots
            .iter()
            .find(|s| s.entry.status == JobStatus::Pending)?
            .entry
            .id;
        self.take(id).map(|job| (id, job))
    }

    /// Record the outcome of a printing job.
    ///
    /// Returns the updated entry, or `None` if `id` is not printing.
    pub fn finish(&mut self, id: Uuid, outcome: &Result<()>) -> Option<QueueEntry> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.entry.id == id && s.entry.status == JobStatus::Printing)?;

        match outcome {
            Ok(()) => {
                slot.entry.status = JobStatus::Completed;
                info!(%id, label = %slot.entry.label, "job completed");
            }
            Err(e) => {
                slot.entry.status = JobStatus::Failed;
                slot.entry.error = Some(e.to_string());
                warn!(%id, label = %slot.entry.label, error = %e, "job failed");
            }
        }
        Some(slot.entry.clone())
    }

    /// Deliver the oldest pending job.
    pub async fn process_next(&mut self, sink: &dyn TransportSink) -> Option<QueueEntry> {
        let (id, job) = self.start_next()?;
        let outcome = sink.deliver(job).await;
        self.finish(id, &outcome)
    }

    /// Deliver every pending job in order. A failure does not stop the rest.
    pub async fn drain(&mut self, sink: &dyn TransportSink) -> Vec<QueueEntry> {
        let mut finished = Vec::new();
        while let Some(entry) = self.process_next(sink).await {
            finished.push(entry);
        }
        finished
    }

    /// Drop completed and failed entries; returns how many were removed.
    pub fn clear_finished(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|s| !s.entry.status.is_finished());
        before - self.slots.len()
    }

    /// Keep at most `keep` finished entries, dropping the oldest first.
    /// Pending and printing entries are never removed.
    pub fn trim_finished(&mut self, keep: usize) -> usize {
        let finished = self
            .slots
            .iter()
            .filter(|s| s.entry.status.is_finished())
            .count();
        let mut excess = finished.saturating_sub(keep);
        let removed = excess;
        self.slots.retain(|s| {
            if excess > 0 && s.entry.status.is_finished() {
                excess -= 1;
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn get(&self, id: Uuid) -> Option<&QueueEntry> {
        self.slots.iter().map(|s| &s.entry).find(|e| e.id == id)
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> Vec<QueueEntry> {
        self.slots.iter().map(|s| s.entry.clone()).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.entry.status == JobStatus::Pending)
            .count()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TillrollError;
    use crate::transport::SimulatedSink;

    fn job(bytes: &[u8]) -> PrintJob {
        PrintJob::from_bytes(bytes.to_vec())
    }

    #[test]
    fn test_submit_is_pending() {
        let mut queue = PrintQueue::new();
        let id = queue.submit("invoice 1", job(b"abc"));
        let entry = queue.get(id).unwrap();
        assert_eq!(entry.status, JobStatus::Pending);
        assert_eq!(entry.bytes, 3);
        assert_eq!(queue.pending_count(), 1);
    }

    #[test]
    fn test_job_taken_only_once() {
        let mut queue = PrintQueue::new();
        let id = queue.submit("x", job(b"1"));
        assert!(queue.take(id).is_some());
        assert!(queue.take(id).is_none());
        assert_eq!(queue.get(id).unwrap().status, JobStatus::Printing);
        assert!(queue.start_next().is_none());
    }

    #[test]
    fn test_start_next_is_fifo() {
        let mut queue = PrintQueue::new();
        let first = queue.submit("first", job(b"1"));
        let _second = queue.submit("second", job(b"2"));
        let (id, taken) = queue.start_next().unwrap();
        assert_eq!(id, first);
        assert_eq!(taken.into_bytes(), b"1".to_vec());
    }

    #[test]
    fn test_finish_records_error() {
        let mut queue = PrintQueue::new();
        let id = queue.submit("x", job(b"1"));
        queue.take(id).unwrap();
        let entry = queue
            .finish(id, &Err(TillrollError::Transport("paper out".to_string())))
            .unwrap();
        assert_eq!(entry.status, JobStatus::Failed);
        assert_eq!(entry.error.as_deref(), Some("Transport error: paper out"));

        // Already finished
        assert!(queue.finish(id, &Ok(())).is_none());
    }

    #[tokio::test]
    async fn test_drain_delivers_in_order() {
        let sink = SimulatedSink::new();
        let mut queue = PrintQueue::new();
        queue.submit("a", job(b"a"));
        queue.submit("b", job(b"b"));

        let finished = queue.drain(&sink).await;
        assert_eq!(finished.len(), 2);
        assert!(finished.iter().all(|e| e.status == JobStatus::Completed));
        assert_eq!(sink.delivered(), vec![b"a".to_vec(), b"b".to_vec()]);
        assert_eq!(queue.clear_finished(), 2);
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_trim_finished_keeps_newest_and_unfinished() {
        let sink = SimulatedSink::new();
        let mut queue = PrintQueue::new();
        queue.submit("a", job(b"a"));
        queue.submit("b", job(b"b"));
        let c = queue.submit("c", job(b"c"));
        queue.drain(&sink).await;
        let pending = queue.submit("d", job(b"d"));

        assert_eq!(queue.trim_finished(1), 2);
        assert_eq!(
            queue.entries().iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![c, pending]
        );
        assert_eq!(queue.trim_finished(1), 0);
        assert_eq!(queue.trim_finished(0), 1);
        assert_eq!(queue.pending_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_delivery_marks_failed() {
        let sink = SimulatedSink::failing();
        let mut queue = PrintQueue::new();
        let id = queue.submit("a", job(b"a"));

        let entry = queue.process_next(&sink).await.unwrap();
        assert_eq!(entry.id, id);
        assert_eq!(entry.status, JobStatus::Failed);
        assert!(queue.process_next(&sink).await.is_none());
    }
}

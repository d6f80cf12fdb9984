//! In-memory sink for dry runs and tests.
//!
//! Every delivered job is recorded in order. A failing sink rejects every
//! job with a transport error, which is how error paths are exercised.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::info;

use super::TransportSink;
use crate::document::PrintJob;
use crate::error::{Result, TillrollError};
use crate::printer::TransportKind;

/// Deterministic recording sink.
#[derive(Debug, Default)]
pub struct SimulatedSink {
    delivered: Mutex<Vec<Vec<u8>>>,
    fail: bool,
}

impl SimulatedSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects every job.
    pub fn failing() -> Self {
        Self {
            delivered: Mutex::default(),
            fail: true,
        }
    }

    /// Bytes of every accepted job, oldest first.
    pub fn delivered(&self) -> Vec<Vec<u8>> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn delivered_count(&self) -> usize {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl TransportSink for SimulatedSink {
    fn kind(&self) -> TransportKind {
        TransportKind::Simulated
    }

    async fn deliver(&self, job: PrintJob) -> Result<()> {
        if self.fail {
            return Err(TillrollError::Transport(
                "simulated printer rejected the job".to_string(),
            ));
        }
        let bytes = job.into_bytes();
        info!(bytes = bytes.len(), "simulated print");
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(bytes);
        Ok(())
    }
}

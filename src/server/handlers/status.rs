//! Printer and queue status.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::printer::{PrinterConfig, PrinterProfile};
use crate::queue::QueueEntry;

use super::super::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub profile: PrinterProfile,
    pub config: PrinterConfig,
    pub queue: Vec<QueueEntry>,
}

/// Handle GET /api/status
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let queue = state.queue.lock().await.entries();
    Json(StatusResponse {
        profile: state.profile.clone(),
        config: state.config.clone(),
        queue,
    })
}

//! HTTP handlers for the server.

pub mod encode;
pub mod invoice;
pub mod status;
pub mod test_page;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::document::PrintJob;
use crate::error::TillrollError;
use crate::queue::JobStatus;

use super::state::{AppState, QUEUE_HISTORY};

/// Error response carrying the crate error.
#[derive(Debug)]
pub struct ApiError(pub TillrollError);

impl From<TillrollError> for ApiError {
    fn from(e: TillrollError) -> Self {
        Self(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            TillrollError::UnknownCommand(_)
            | TillrollError::InvalidDocument(_)
            | TillrollError::Encoding { .. }
            | TillrollError::InvalidConfig(_)
            | TillrollError::Json(_) => StatusCode::UNPROCESSABLE_ENTITY,
            TillrollError::Transport(_) | TillrollError::Timeout(_) => StatusCode::BAD_GATEWAY,
            TillrollError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "success": false,
            "error": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Body of a successful print request.
#[derive(Debug, Serialize)]
pub struct PrintResponse {
    pub success: bool,
    pub job_id: Uuid,
    pub status: JobStatus,
    pub bytes: usize,
}

/// Queue a job and deliver it. The queue lock is released while the sink
/// works.
pub(super) async fn submit_and_deliver(
    state: &AppState,
    label: String,
    job: PrintJob,
) -> ApiResult<PrintResponse> {
    let bytes = job.len();
    let (id, job) = {
        let mut queue = state.queue.lock().await;
        let id = queue.submit(label, job);
        match queue.take(id) {
            Some(job) => (id, job),
            None => {
                return Err(TillrollError::Transport(format!("job {} is not pending", id)).into());
            }
        }
    };

    let outcome = state.sink.deliver(job).await;
    let entry = {
        let mut queue = state.queue.lock().await;
        let entry = queue.finish(id, &outcome);
        queue.trim_finished(QUEUE_HISTORY);
        entry
    };
    outcome?;

    Ok(PrintResponse {
        success: true,
        job_id: id,
        status: entry.map_or(JobStatus::Completed, |e| e.status),
        bytes,
    })
}

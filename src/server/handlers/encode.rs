//! Raw command encoding.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::document::PrintJob;
use crate::protocol::encoding::TextEncoding;

use super::super::state::AppState;
use super::ApiResult;

#[derive(Debug, Deserialize)]
pub struct EncodeRequest {
    pub commands: Vec<Command>,
    /// Defaults to the printer's configured encoding
    #[serde(default)]
    pub encoding: Option<TextEncoding>,
}

#[derive(Debug, Serialize)]
pub struct EncodeResponse {
    pub hex: String,
    pub bytes: usize,
}

/// Handle POST /api/encode
pub async fn encode(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EncodeRequest>,
) -> ApiResult<Json<EncodeResponse>> {
    let encoding = req.encoding.unwrap_or(state.config.encoding);
    let job = PrintJob::encode(&req.commands, encoding)?;
    Ok(Json(EncodeResponse {
        hex: job.to_hex(),
        bytes: job.len(),
    }))
}

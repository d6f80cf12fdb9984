//! Invoice preview and printing.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::document::{self, InvoiceDocument, PrintJob, compile_invoice};

use super::super::state::AppState;
use super::{ApiResult, PrintResponse, submit_and_deliver};

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub preview: String,
    pub bytes: usize,
}

/// Handle POST /api/invoice/preview
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Json(doc): Json<InvoiceDocument>,
) -> ApiResult<Json<PreviewResponse>> {
    let commands = compile_invoice(&doc, &state.config)?;
    let job = PrintJob::encode(&commands, state.config.encoding)?;
    Ok(Json(PreviewResponse {
        preview: document::preview(&commands),
        bytes: job.len(),
    }))
}

/// Handle POST /api/invoice/print
pub async fn print(
    State(state): State<Arc<AppState>>,
    Json(doc): Json<InvoiceDocument>,
) -> ApiResult<Json<PrintResponse>> {
    let job = document::build_invoice(&doc, &state.config)?;
    let label = format!("invoice #{}", doc.invoice_number);
    Ok(Json(submit_and_deliver(&state, label, job).await?))
}

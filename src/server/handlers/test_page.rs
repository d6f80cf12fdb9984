//! Test page printing.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::Local;

use crate::document::build_test_page;

use super::super::state::AppState;
use super::{ApiResult, PrintResponse, submit_and_deliver};

/// Handle POST /api/test-page/print
pub async fn print(State(state): State<Arc<AppState>>) -> ApiResult<Json<PrintResponse>> {
    let printed_at = Local::now().naive_local();
    let job = build_test_page(&state.profile, &state.config, printed_at)?;
    Ok(Json(
        submit_and_deliver(&state, "test page".to_string(), job).await?,
    ))
}

//! # HTTP API
//!
//! A small JSON API for previewing and printing invoices and test pages.
//!
//! ## Usage
//!
//! ```bash
//! tillroll --settings printer.json serve --listen 0.0.0.0:8080
//! ```
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /api/status` | printer, config and queue |
//! | `POST /api/invoice/preview` | plain-text preview and byte count |
//! | `POST /api/invoice/print` | build, queue and deliver an invoice |
//! | `POST /api/test-page/print` | build, queue and deliver the test page |
//! | `POST /api/encode` | command list to hex |

mod handlers;
mod state;

pub use state::{AppState, DEFAULT_LISTEN_ADDR, QUEUE_HISTORY, ServerConfig};

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{Result, TillrollError};
use crate::transport;

/// Build the API router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(handlers::status::status))
        .route("/api/invoice/preview", post(handlers::invoice::preview))
        .route("/api/invoice/print", post(handlers::invoice::print))
        .route("/api/test-page/print", post(handlers::test_page::print))
        .route("/api/encode", post(handlers::encode::encode))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use tillroll::printer::{PrinterConfig, PrinterProfile};
/// use tillroll::server::{serve, ServerConfig};
///
/// # async fn example() -> tillroll::error::Result<()> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     profile: PrinterProfile::network("front", "Front", "192.168.1.50", 9100),
///     printer: PrinterConfig::default(),
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<()> {
    let sink = transport::open(&config.profile, &config.printer)?;
    let state = Arc::new(AppState::new(
        config.profile.clone(),
        config.printer.clone(),
        Arc::from(sink),
    ));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            TillrollError::Transport(format!("failed to bind to {}: {}", config.listen_addr, e))
        })?;

    info!(
        listen = %config.listen_addr,
        printer = %config.profile.name,
        connection = %config.profile.connection,
        "HTTP server listening"
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| TillrollError::Transport(format!("server error: {}", e)))?;

    Ok(())
}

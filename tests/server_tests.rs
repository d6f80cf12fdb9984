//! # HTTP API Tests
//!
//! Drive the router with `tower::ServiceExt::oneshot` against a simulated
//! printer.

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

use tillroll::printer::{PrinterConfig, PrinterProfile};
use tillroll::server::{AppState, QUEUE_HISTORY, router};
use tillroll::transport::SimulatedSink;

fn invoice_json(total: &str) -> Value {
    json!({
        "company": {"name": "Corner Cafe", "address": "1 Main St"},
        "invoiceNumber": "1001",
        "customerName": "Ada",
        "date": "2024-01-02T08:30:00",
        "items": [{"name": "Coffee", "quantity": 2, "price": "3.00"}],
        "total": total,
    })
}

fn state_with(sink: Arc<SimulatedSink>) -> Arc<AppState> {
    Arc::new(AppState::new(
        PrinterProfile::simulated(),
        PrinterConfig::default(),
        sink,
    ))
}

async fn send(state: Arc<AppState>, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn test_status_reports_printer() {
    let state = state_with(Arc::new(SimulatedSink::new()));
    let (status, body) = send(state, "GET", "/api/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["name"], "Simulated printer");
    assert_eq!(body["profile"]["connection"]["type"], "simulated");
    assert_eq!(body["config"]["paper_width"], 48);
    assert_eq!(body["queue"], json!([]));
}

#[tokio::test]
async fn test_preview_invoice() {
    let sink = Arc::new(SimulatedSink::new());
    let state = state_with(sink.clone());
    let (status, body) = send(
        state,
        "POST",
        "/api/invoice/preview",
        Some(invoice_json("6.00")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let preview = body["preview"].as_str().unwrap();
    assert!(preview.contains(&format!("{:>48}", "TOTAL: $6.00")));
    assert!(body["bytes"].as_u64().unwrap() > 0);
    assert_eq!(sink.delivered_count(), 0);
}

#[tokio::test]
async fn test_print_invoice_delivers_once() {
    let sink = Arc::new(SimulatedSink::new());
    let state = state_with(sink.clone());
    let (status, body) = send(
        state.clone(),
        "POST",
        "/api/invoice/print",
        Some(invoice_json("6.00")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["status"], "completed");
    assert_eq!(sink.delivered_count(), 1);
    assert_eq!(
        sink.delivered()[0].len() as u64,
        body["bytes"].as_u64().unwrap()
    );

    let (_, status_body) = send(state, "GET", "/api/status", None).await;
    assert_eq!(status_body["queue"][0]["label"], "invoice #1001");
    assert_eq!(status_body["queue"][0]["status"], "completed");
}

#[tokio::test]
async fn test_total_mismatch_is_unprocessable() {
    let sink = Arc::new(SimulatedSink::new());
    let state = state_with(sink.clone());
    let (status, body) = send(
        state,
        "POST",
        "/api/invoice/print",
        Some(invoice_json("7.00")),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Invalid document"));
    assert_eq!(sink.delivered_count(), 0);
}

#[tokio::test]
async fn test_failed_delivery_is_bad_gateway() {
    let state = state_with(Arc::new(SimulatedSink::failing()));
    let (status, _) = send(state.clone(), "POST", "/api/test-page/print", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (_, status_body) = send(state, "GET", "/api/status", None).await;
    assert_eq!(status_body["queue"][0]["status"], "failed");
    assert!(status_body["queue"][0]["error"].is_string());
}

#[tokio::test]
async fn test_queue_history_is_bounded() {
    let sink = Arc::new(SimulatedSink::new());
    let state = state_with(sink.clone());
    for _ in 0..QUEUE_HISTORY + 3 {
        let (status, _) = send(state.clone(), "POST", "/api/test-page/print", None).await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(sink.delivered_count(), QUEUE_HISTORY + 3);

    let (_, body) = send(state, "GET", "/api/status", None).await;
    assert_eq!(body["queue"].as_array().unwrap().len(), QUEUE_HISTORY);
}

#[tokio::test]
async fn test_encode_commands() {
    let state = state_with(Arc::new(SimulatedSink::new()));
    let (status, body) = send(
        state,
        "POST",
        "/api/encode",
        Some(json!({"commands": ["INIT", {"text": "A"}, "CUT_PAPER"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hex"], "1B 40 41 1D 56 41 00");
    assert_eq!(body["bytes"], 7);
}

#[tokio::test]
async fn test_encode_rejects_unknown_symbol() {
    let state = state_with(Arc::new(SimulatedSink::new()));
    let (status, _) = send(
        state,
        "POST",
        "/api/encode",
        Some(json!({"commands": ["INIT", "SPARKLE"]})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

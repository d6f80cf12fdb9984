//! Server state and configuration.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::printer::{PrinterConfig, PrinterProfile};
use crate::queue::PrintQueue;
use crate::transport::TransportSink;

/// Default listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Finished jobs kept in the queue for `/api/status`
pub const QUEUE_HISTORY: usize = 50;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Printer the server prints to
    pub profile: PrinterProfile,
    /// Paper and text settings of that printer
    pub printer: PrinterConfig,
}

/// Application state shared across handlers.
pub struct AppState {
    pub profile: PrinterProfile,
    pub config: PrinterConfig,
    pub sink: Arc<dyn TransportSink>,
    /// Never held across a delivery
    pub queue: Mutex<PrintQueue>,
}

impl AppState {
    pub fn new(profile: PrinterProfile, config: PrinterConfig, sink: Arc<dyn TransportSink>) -> Self {
        Self {
            profile,
            config,
            sink,
            queue: Mutex::new(PrintQueue::new()),
        }
    }
}

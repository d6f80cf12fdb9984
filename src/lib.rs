//! # Tillroll - ESC/POS Receipt Printing Library
//!
//! Tillroll formats invoices and diagnostic pages for 58mm/80mm thermal
//! receipt printers and delivers the resulting ESC/POS bytes. It provides:
//!
//! - **Command encoding**: symbolic printer directives to ESC/POS bytes
//! - **Document formatting**: word wrap, alignment, currency and dates on a
//!   fixed character grid
//! - **Transport**: raw TCP, USB device nodes and Bluetooth RFCOMM serial
//! - **Print queue** and a small **HTTP API**
//!
//! ## Quick Start
//!
//! ```no_run
//! use chrono::Local;
//! use tillroll::{
//!     document::build_test_page,
//!     printer::{PrinterConfig, PrinterProfile},
//!     transport,
//! };
//!
//! # async fn example() -> tillroll::error::Result<()> {
//! let profile = PrinterProfile::network("front", "Front Counter", "192.168.1.50", 9100);
//! let config = PrinterConfig::default();
//!
//! // Build the whole job first, then hand it to the printer
//! let job = build_test_page(&profile, &config, Local::now().naive_local())?;
//! let sink = transport::open(&profile, &config)?;
//! sink.deliver(job).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS byte builders and text encodings |
//! | [`command`] | Symbolic commands and the encoder |
//! | [`document`] | Invoice and test page formatting |
//! | [`printer`] | Printer profiles, configs and saved settings |
//! | [`transport`] | Delivery backends |
//! | [`queue`] | Print job queue |
//! | [`server`] | HTTP API |
//! | [`error`] | Error types |

pub mod command;
pub mod document;
pub mod error;
pub mod printer;
pub mod protocol;
pub mod queue;
pub mod server;
pub mod transport;

// Re-exports for convenience
pub use command::{Command, encode};
pub use document::{Document, PrintJob, build_invoice, build_test_page};
pub use error::{Result, TillrollError};
pub use printer::{PrinterConfig, PrinterProfile};
pub use transport::TransportSink;

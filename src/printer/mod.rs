//! # Printer Module
//!
//! Printer identity, connection settings and their persistence.
//!
//! ## Modules
//!
//! - [`config`]: `PrinterProfile` and `PrinterConfig`
//! - [`settings`]: saved printer settings file

pub mod config;
pub mod settings;

pub use config::{Connection, PrinterConfig, PrinterProfile, TransportKind};
pub use settings::SavedPrinter;

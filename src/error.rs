//! # Error Types
//!
//! This module defines error types used throughout the tillroll library.
//!
//! Formatting and encoding errors are raised synchronously and are fatal to
//! the one job being built: no partial `PrintJob` is ever produced.

use thiserror::Error;

use crate::protocol::encoding::TextEncoding;

/// Main error type for tillroll operations
#[derive(Debug, Error)]
pub enum TillrollError {
    /// A symbolic directive that is not part of the command vocabulary
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Missing or inconsistent document fields (e.g. total mismatch)
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Character that the target text encoding cannot represent
    #[error("Cannot encode '{character}' (U+{:04X}) as {encoding}", u32::from(*.character))]
    Encoding {
        character: char,
        encoding: TextEncoding,
    },

    /// Invalid printer configuration or profile
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Transport-level errors (connection, delivery)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Timeout waiting for the printer
    #[error("Timeout: {0}")]
    Timeout(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for tillroll operations
pub type Result<T> = std::result::Result<T, TillrollError>;

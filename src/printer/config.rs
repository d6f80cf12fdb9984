//! # Printer Configuration
//!
//! This module defines what the formatter and transports need to know about
//! a printer: its identity and address ([`PrinterProfile`]) and its paper
//! and text settings ([`PrinterConfig`]).
//!
//! Both are plain immutable values owned by the caller. Nothing in the crate
//! keeps a "current printer"; every call takes the profile and config it
//! works with.
//!
//! ## Usage
//!
//! ```
//! use tillroll::printer::{PrinterConfig, PrinterProfile};
//!
//! let config = PrinterConfig::default();
//! assert_eq!(config.paper_width, 48);
//!
//! let profile = PrinterProfile::network("kitchen", "Kitchen", "192.168.1.50", 9100);
//! assert_eq!(profile.kind().to_string(), "ip");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TillrollError};
use crate::protocol::encoding::TextEncoding;

/// Characters per line on 80mm paper with font A
pub const DEFAULT_PAPER_WIDTH: usize = 48;

/// Characters per line on 58mm paper with font A
pub const NARROW_PAPER_WIDTH: usize = 32;

/// Serial speed used when none is configured
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Raw TCP printing port supported by most network receipt printers
pub const DEFAULT_NETWORK_PORT: u16 = 9100;

/// # Printer Configuration
///
/// Supplied at connect time and fixed for the lifetime of a connection.
///
/// | Field | Default | Notes |
/// |-------|---------|-------|
/// | `paper_width` | 48 | characters per line, must be > 0 |
/// | `encoding` | `utf8` | text encoding for `Text` commands |
/// | `baud_rate` | 9600 | only used by serial (Bluetooth RFCOMM) links |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterConfig {
    /// Characters per printed line
    pub paper_width: usize,

    /// Text encoding the printer expects
    pub encoding: TextEncoding,

    /// Serial link speed
    pub baud_rate: u32,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            paper_width: DEFAULT_PAPER_WIDTH,
            encoding: TextEncoding::default(),
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

impl PrinterConfig {
    /// Config for a given paper width, other fields default.
    pub fn with_width(paper_width: usize) -> Self {
        Self {
            paper_width,
            ..Self::default()
        }
    }

    /// Check invariants. A zero paper width is rejected.
    pub fn validate(&self) -> Result<()> {
        if self.paper_width == 0 {
            return Err(TillrollError::InvalidConfig(
                "paper width must be greater than zero".to_string(),
            ));
        }
        if self.baud_rate == 0 {
            return Err(TillrollError::InvalidConfig(
                "baud rate must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// PRINTER PROFILE
// ============================================================================

/// How a printer is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Ip,
    Usb,
    Bluetooth,
    Simulated,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ip => "ip",
            Self::Usb => "usb",
            Self::Bluetooth => "bluetooth",
            Self::Simulated => "simulated",
        })
    }
}

/// Transport-specific address, tagged by transport kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Connection {
    /// Raw TCP printer.
    Ip {
        host: String,
        #[serde(default = "default_port")]
        port: u16,
    },
    /// USB printer class device node (e.g. `/dev/usb/lp0`).
    Usb { device: String },
    /// Bound RFCOMM serial device (e.g. `/dev/rfcomm0`).
    Bluetooth { device: String },
    /// In-memory recorder, nothing is printed.
    Simulated,
}

fn default_port() -> u16 {
    DEFAULT_NETWORK_PORT
}

impl Connection {
    pub fn kind(&self) -> TransportKind {
        match self {
            Self::Ip { .. } => TransportKind::Ip,
            Self::Usb { .. } => TransportKind::Usb,
            Self::Bluetooth { .. } => TransportKind::Bluetooth,
            Self::Simulated => TransportKind::Simulated,
        }
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip { host, port } => write!(f, "{}:{}", host, port),
            Self::Usb { device } | Self::Bluetooth { device } => f.write_str(device),
            Self::Simulated => f.write_str("memory"),
        }
    }
}

/// # Printer Profile
///
/// Identity and address of one printer. Read-only to the formatter, which
/// only uses it for the test page header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterProfile {
    /// Stable identifier
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Transport and address
    pub connection: Connection,
}

impl PrinterProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>, connection: Connection) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            connection,
        }
    }

    /// A raw TCP printer.
    pub fn network(
        id: impl Into<String>,
        name: impl Into<String>,
        host: impl Into<String>,
        port: u16,
    ) -> Self {
        Self::new(
            id,
            name,
            Connection::Ip {
                host: host.into(),
                port,
            },
        )
    }

    /// Profile for the in-memory simulated printer.
    pub fn simulated() -> Self {
        Self::new("simulated", "Simulated printer", Connection::Simulated)
    }

    /// Transport kind of this profile.
    pub fn kind(&self) -> TransportKind {
        self.connection.kind()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PrinterConfig::default();
        assert_eq!(config.paper_width, 48);
        assert_eq!(config.encoding, TextEncoding::Utf8);
        assert_eq!(config.baud_rate, 9600);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_width_rejected() {
        let config = PrinterConfig::with_width(0);
        assert!(matches!(
            config.validate(),
            Err(TillrollError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: PrinterConfig = serde_json::from_str(r#"{"paper_width": 32}"#).unwrap();
        assert_eq!(config.paper_width, NARROW_PAPER_WIDTH);
        assert_eq!(config.baud_rate, DEFAULT_BAUD_RATE);
    }

    #[test]
    fn test_connection_tagged_json() {
        let profile: PrinterProfile = serde_json::from_str(
            r#"{"id": "p1", "name": "Front", "connection": {"type": "ip", "host": "10.0.0.7"}}"#,
        )
        .unwrap();
        assert_eq!(profile.kind(), TransportKind::Ip);
        assert_eq!(profile.connection.to_string(), "10.0.0.7:9100");

        let bt: Connection =
            serde_json::from_str(r#"{"type": "bluetooth", "device": "/dev/rfcomm0"}"#).unwrap();
        assert_eq!(bt.kind(), TransportKind::Bluetooth);

        let sim: Connection = serde_json::from_str(r#"{"type": "simulated"}"#).unwrap();
        assert_eq!(sim, Connection::Simulated);
        assert_eq!(PrinterProfile::simulated().kind(), TransportKind::Simulated);
    }

    #[test]
    fn test_unknown_transport_rejected() {
        let result: std::result::Result<Connection, _> =
            serde_json::from_str(r#"{"type": "serial", "device": "/dev/ttyS0"}"#);
        assert!(result.is_err());
    }
}

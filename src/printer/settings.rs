//! Saved printer settings.
//!
//! A configured printer is stored as a small JSON file so the CLI and the
//! HTTP server can reconnect to it without asking again.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::config::{PrinterConfig, PrinterProfile};
use crate::error::Result;

/// A printer profile together with its connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPrinter {
    pub profile: PrinterProfile,
    #[serde(default)]
    pub config: PrinterConfig,
}

impl SavedPrinter {
    pub fn new(profile: PrinterProfile, config: PrinterConfig) -> Self {
        Self { profile, config }
    }

    /// Load saved settings. A missing file is `Ok(None)`.
    ///
    /// The loaded config is validated, so a hand-edited file with a zero
    /// width fails here rather than at print time.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let saved: Self = serde_json::from_str(&text)?;
        saved.config.validate()?;
        Ok(Some(saved))
    }

    /// Write settings as pretty JSON, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.config.validate()?;
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)?;
        info!(path = %path.display(), printer = %self.profile.name, "saved printer settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TillrollError;
    use crate::printer::Connection;
    use crate::protocol::encoding::TextEncoding;

    fn sample() -> SavedPrinter {
        SavedPrinter::new(
            PrinterProfile::new(
                "bt-1",
                "Receipt BT",
                Connection::Bluetooth {
                    device: "/dev/rfcomm0".to_string(),
                },
            ),
            PrinterConfig {
                paper_width: 32,
                encoding: TextEncoding::Cp437,
                baud_rate: 115_200,
            },
        )
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = SavedPrinter::load(dir.path().join("printer.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("printer.json");
        let saved = sample();
        saved.save(&path).unwrap();

        let loaded = SavedPrinter::load(&path).unwrap().unwrap();
        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_invalid_width_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("printer.json");
        fs::write(
            &path,
            r#"{"profile": {"id": "x", "name": "X", "connection": {"type": "usb", "device": "/dev/usb/lp0"}},
                "config": {"paper_width": 0}}"#,
        )
        .unwrap();
        assert!(matches!(
            SavedPrinter::load(&path),
            Err(TillrollError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("printer.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(SavedPrinter::load(&path), Err(TillrollError::Json(_))));
    }
}

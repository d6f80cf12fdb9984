//! Raw TCP printing.
//!
//! Most network receipt printers accept ESC/POS bytes on port 9100 and
//! print whatever arrives before the connection closes.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, instrument, warn};

use super::TransportSink;
use crate::document::PrintJob;
use crate::error::{Result, TillrollError};
use crate::printer::TransportKind;

/// Connection timeout used unless overridden
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for the reachability probe
const PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// Network printer reached over raw TCP.
#[derive(Debug, Clone)]
pub struct NetworkSink {
    host: String,
    port: u16,
    timeout: Duration,
}

impl NetworkSink {
    pub fn new(host: &str, port: u16) -> Result<Self> {
        let host = host.trim();
        if host.is_empty() {
            return Err(TillrollError::InvalidConfig(
                "network printer host is empty".to_string(),
            ));
        }
        if port == 0 {
            return Err(TillrollError::InvalidConfig(
                "network printer port must be non-zero".to_string(),
            ));
        }
        Ok(Self {
            host: host.to_string(),
            port,
            timeout: DEFAULT_CONNECT_TIMEOUT,
        })
    }

    /// Set the connection timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `host:port`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    async fn connect(&self, timeout: Duration) -> Result<TcpStream> {
        tokio::time::timeout(timeout, TcpStream::connect((self.host.as_str(), self.port)))
            .await
            .map_err(|_| TillrollError::Timeout(format!("connecting to {}", self.addr())))?
            .map_err(|e| TillrollError::Transport(format!("{}: {}", self.addr(), e)))
    }

    /// Whether the printer accepts a TCP connection.
    #[instrument(skip(self), fields(addr = %self.addr()))]
    pub async fn is_online(&self) -> bool {
        match self.connect(PROBE_TIMEOUT).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "printer offline");
                false
            }
        }
    }
}

#[async_trait]
impl TransportSink for NetworkSink {
    fn kind(&self) -> TransportKind {
        TransportKind::Ip
    }

    #[instrument(skip(self, job), fields(addr = %self.addr(), bytes = job.len()))]
    async fn deliver(&self, job: PrintJob) -> Result<()> {
        let mut stream = self.connect(self.timeout).await?;

        stream
            .write_all(job.as_bytes())
            .await
            .map_err(|e| TillrollError::Transport(format!("write failed: {}", e)))?;
        stream.flush().await?;
        stream.shutdown().await?;

        info!("print job sent");
        Ok(())
    }
}

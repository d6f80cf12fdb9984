//! # Printer Transport Layer
//!
//! Delivery of finished [`PrintJob`]s to a physical (or simulated) printer.
//!
//! ## Available Sinks
//!
//! - [`network`]: raw TCP, port 9100 by default
//! - [`device`]: USB printer class node or bound Bluetooth RFCOMM serial port
//! - [`simulated`]: in-memory recorder for dry runs and tests
//!
//! The formatter never talks to a sink itself; callers build a job and hand
//! it over. A sink takes the job by value, so it cannot be delivered twice.
//!
//! ```
//! use tillroll::document::PrintJob;
//! use tillroll::transport::{SimulatedSink, TransportSink};
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! rt.block_on(async {
//!     let sink = SimulatedSink::new();
//!     sink.deliver(PrintJob::from_bytes(vec![0x1B, 0x40])).await.unwrap();
//!     assert_eq!(sink.delivered(), vec![vec![0x1B, 0x40]]);
//! });
//! ```

pub mod device;
pub mod network;
pub mod simulated;

pub use device::DeviceSink;
pub use network::NetworkSink;
pub use simulated::SimulatedSink;

use async_trait::async_trait;

use crate::document::PrintJob;
use crate::error::Result;
use crate::printer::{Connection, PrinterConfig, PrinterProfile, TransportKind};

/// A channel that accepts finished print jobs.
#[async_trait]
pub trait TransportSink: Send + Sync {
    fn kind(&self) -> TransportKind;

    /// Deliver one job. The job is consumed whether or not delivery succeeds.
    async fn deliver(&self, job: PrintJob) -> Result<()>;
}

/// Open the sink matching a profile's connection.
pub fn open(profile: &PrinterProfile, config: &PrinterConfig) -> Result<Box<dyn TransportSink>> {
    config.validate()?;
    let sink: Box<dyn TransportSink> = match &profile.connection {
        Connection::Ip { host, port } => Box::new(NetworkSink::new(host, *port)?),
        Connection::Usb { device } => Box::new(DeviceSink::usb(device)),
        Connection::Bluetooth { device } => {
            Box::new(DeviceSink::bluetooth(device, config.baud_rate)?)
        }
        Connection::Simulated => Box::new(SimulatedSink::new()),
    };
    Ok(sink)
}

//! # Device Node Transport
//!
//! Writes print jobs to a local device file.
//!
//! ## USB
//!
//! Linux exposes USB printer class devices as `/dev/usb/lp0`. The kernel
//! driver handles flow control, so the job is written in one pass.
//!
//! ## Bluetooth
//!
//! A paired printer bound with `rfcomm bind 0 <MAC>` appears as
//! `/dev/rfcomm0`, a serial TTY. The TTY is switched to raw mode at the
//! configured baud rate so binary data is sent unmodified:
//!
//! - **No input processing**: IGNBRK, BRKINT, PARMRK, ISTRIP, INLCR, IGNCR,
//!   ICRNL and XON/XOFF flow control cleared
//! - **No output processing**: OPOST cleared (no CR/LF translation)
//! - **8-bit characters**: CS8, no parity
//! - **Non-canonical, no echo**: ICANON, ECHO, ECHONL, ISIG, IEXTEN cleared
//!
//! Large jobs are written in 4 KiB chunks with a short pause between chunks
//! so the printer's receive buffer does not overflow.
//!
//! Device I/O is blocking and runs on tokio's blocking pool.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::TransportSink;
use crate::document::PrintJob;
use crate::error::{Result, TillrollError};
use crate::printer::TransportKind;

/// Default USB printer device node
pub const DEFAULT_USB_DEVICE: &str = "/dev/usb/lp0";

/// Default RFCOMM device path
pub const DEFAULT_BLUETOOTH_DEVICE: &str = "/dev/rfcomm0";

/// Serial speeds a Bluetooth link can be configured with
pub const SUPPORTED_BAUD_RATES: [u32; 5] = [9600, 19_200, 38_400, 57_600, 115_200];

/// Chunk size for serial writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between serial chunks
const CHUNK_DELAY: Duration = Duration::from_millis(2);

/// Printer reached through a device node.
#[derive(Debug, Clone)]
pub struct DeviceSink {
    path: PathBuf,
    kind: TransportKind,
    /// Set for serial links; `None` writes the device as-is
    baud_rate: Option<u32>,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl DeviceSink {
    /// USB printer class device, written in one pass.
    pub fn usb(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            kind: TransportKind::Usb,
            baud_rate: None,
            chunk_size: usize::MAX,
            chunk_delay: Duration::ZERO,
        }
    }

    /// Bound RFCOMM serial device at the given speed.
    pub fn bluetooth(path: impl AsRef<Path>, baud_rate: u32) -> Result<Self> {
        if !SUPPORTED_BAUD_RATES.contains(&baud_rate) {
            return Err(TillrollError::InvalidConfig(format!(
                "unsupported baud rate {} (expected one of {:?})",
                baud_rate, SUPPORTED_BAUD_RATES
            )));
        }
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            kind: TransportKind::Bluetooth,
            baud_rate: Some(baud_rate),
            chunk_size: CHUNK_SIZE,
            chunk_delay: CHUNK_DELAY,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Override the chunk size used for serial writes.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    fn write_blocking(&self, data: &[u8]) -> Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .open(&self.path)
            .map_err(|e| {
                TillrollError::Transport(format!("failed to open {}: {}", self.path.display(), e))
            })?;

        if let Some(baud_rate) = self.baud_rate {
            configure_serial(&file, baud_rate)?;
        }

        let chunks = data.chunks(self.chunk_size.max(1));
        let count = chunks.len();
        for (i, chunk) in chunks.enumerate() {
            file.write_all(chunk)
                .map_err(|e| TillrollError::Transport(format!("write failed: {}", e)))?;
            if i + 1 < count && !self.chunk_delay.is_zero() {
                thread::sleep(self.chunk_delay);
            }
        }
        file.flush()
            .map_err(|e| TillrollError::Transport(format!("flush failed: {}", e)))?;

        debug!(chunks = count, "device write complete");
        Ok(())
    }
}

#[async_trait]
impl TransportSink for DeviceSink {
    fn kind(&self) -> TransportKind {
        self.kind
    }

    #[instrument(skip(self, job), fields(device = %self.path.display(), kind = %self.kind, bytes = job.len()))]
    async fn deliver(&self, job: PrintJob) -> Result<()> {
        let sink = self.clone();
        tokio::task::spawn_blocking(move || sink.write_blocking(job.as_bytes()))
            .await
            .map_err(|e| TillrollError::Transport(format!("device writer panicked: {}", e)))??;
        info!("print job sent");
        Ok(())
    }
}

// ============================================================================
// TTY CONFIGURATION
// ============================================================================

/// Put a serial TTY into raw mode at `baud_rate`. Regular files (used when
/// capturing output) are left alone.
#[cfg(unix)]
fn configure_serial(file: &std::fs::File, baud_rate: u32) -> Result<()> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();
    if unsafe { libc::isatty(fd) } != 1 {
        return Ok(());
    }

    let speed = match baud_rate {
        9600 => libc::B9600,
        19_200 => libc::B19200,
        38_400 => libc::B38400,
        57_600 => libc::B57600,
        115_200 => libc::B115200,
        other => {
            return Err(TillrollError::InvalidConfig(format!(
                "unsupported baud rate {}",
                other
            )));
        }
    };

    let mut termios = MaybeUninit::uninit();
    if unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) } != 0 {
        return Err(TillrollError::Transport(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    // XON/XOFF off: 0x11 and 0x13 are ordinary bytes in ESC/POS payloads
    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    set_speed(&mut termios, speed)?;

    if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) } != 0 {
        return Err(TillrollError::Transport(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    Ok(())
}

#[cfg(unix)]
fn set_speed(termios: &mut libc::termios, speed: libc::speed_t) -> Result<()> {
    if unsafe { libc::cfsetispeed(termios, speed) } != 0 {
        return Err(TillrollError::Transport(format!(
            "cfsetispeed failed: {}",
            io::Error::last_os_error()
        )));
    }
    if unsafe { libc::cfsetospeed(termios, speed) } != 0 {
        return Err(TillrollError::Transport(format!(
            "cfsetospeed failed: {}",
            io::Error::last_os_error()
        )));
    }
    Ok(())
}

#[cfg(not(unix))]
fn configure_serial(_file: &std::fs::File, _baud_rate: u32) -> Result<()> {
    Ok(())
}

//! Byte source abstraction
//!
//! The scanner works on buffers; something has to fill them. `ByteSource`
//! is the seam between the recovery core and whatever supplies raw bytes:
//! a serial adapter in production, a synthetic bus in tests. The discovery
//! engine additionally needs to reopen the source at many trial rates,
//! which is what `TransportFactory` models.

use serialport::SerialPort;
use std::io::{self, Read};
use std::time::Duration;

use super::serial::{clear_buffers, configure_port, open_port};
use super::TransportError;

/// A blocking supplier of raw bus bytes.
pub trait ByteSource {
    /// Read whatever is available into `buf`, blocking at most the source's
    /// own timeout. Returns `Ok(0)` when the deadline passed with nothing
    /// to deliver; that is idleness, not an error.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, TransportError>;
}

/// Opens a [`ByteSource`] at a requested baud rate.
pub trait TransportFactory {
    /// Open a fresh source at `baud`. Each call may tear down the previous
    /// source; trials never run concurrently.
    fn open(&mut self, baud: u32) -> Result<Box<dyn ByteSource>, TransportError>;
}

/// [`ByteSource`] over a real serial port.
pub struct SerialSource {
    port: Box<dyn SerialPort>,
}

impl SerialSource {
    /// Wrap an already-opened port.
    pub fn new(port: Box<dyn SerialPort>) -> Self {
        Self { port }
    }
}

impl ByteSource for SerialSource {
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            Err(e)
                if e.kind() == io::ErrorKind::TimedOut
                    || e.kind() == io::ErrorKind::WouldBlock =>
            {
                Ok(0)
            }
            Err(e) => Err(TransportError::IoError(e)),
        }
    }
}

/// [`TransportFactory`] that reopens one serial device per trial rate.
#[derive(Debug, Clone)]
pub struct SerialFactory {
    /// Device path, e.g. "/dev/ttyUSB0"
    pub port_name: String,

    /// Per-read blocking bound handed to the port
    pub read_timeout: Duration,
}

impl SerialFactory {
    /// Factory for `port_name` with the given per-read timeout.
    pub fn new(port_name: impl Into<String>, read_timeout: Duration) -> Self {
        Self {
            port_name: port_name.into(),
            read_timeout,
        }
    }
}

impl TransportFactory for SerialFactory {
    fn open(&mut self, baud: u32) -> Result<Box<dyn ByteSource>, TransportError> {
        let mut port = open_port(&self.port_name, baud, self.read_timeout)?;
        configure_port(port.as_mut())?;
        clear_buffers(port.as_mut())?;
        Ok(Box::new(SerialSource::new(port)))
    }
}

//! Transport errors
//!
//! Only the transport layer produces errors. Protocol-level rejection (bad
//! parity, bad checksum, truncated frame) is the normal outcome of scanning
//! arbitrary bytes and is never surfaced as a failure.

use thiserror::Error;

/// Errors raised by the serial transport.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Serial port error: {0}")]
    SerialError(String),

    #[error("Failed to open {port} at {baud} baud: {reason}")]
    OpenFailed {
        port: String,
        baud: u32,
        reason: String,
    },

    #[error("Unsupported baud rate: {0}")]
    InvalidRate(u32),

    #[error("Transport disconnected")]
    Disconnected,

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

//! LIN frame recovery
//!
//! Implements passive recovery of LIN bus frames from a raw UART byte
//! stream: identifier parity validation, dual-convention checksum testing
//! and variable-length frame extraction without a length field.

pub mod checksum;
mod error;
mod frame;
pub mod parity;
pub mod scanner;
pub mod serial;
pub mod stream;

pub use error::TransportError;
pub use frame::{ChecksumKind, Detection, LinFrame};
pub use scanner::{scan, scan_relaxed, ScanIter};
pub use serial::{clear_buffers, configure_port, list_ports, open_port, PortInfo};
pub use stream::{ByteSource, SerialFactory, SerialSource, TransportFactory};

/// Sync marker byte preceding every frame header
pub const SYNC_BYTE: u8 = 0x55;

/// Byte a sync marker degrades to when the sampling rate sits slightly off
/// nominal; accepted only by the relaxed discovery scan
pub const NEAR_SYNC_BYTE: u8 = 0x54;

/// Mask selecting the 6 identifier bits of a protected identifier
pub const ID_MASK: u8 = 0x3F;

/// Maximum LIN payload length in bytes
pub const MAX_PAYLOAD: usize = 8;

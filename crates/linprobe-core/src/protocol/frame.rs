//! Recovered frame value types
//!
//! Frames are ephemeral: built by the scanner for one pass, handed to the
//! caller, never mutated afterwards.

use serde::{Deserialize, Serialize};

use super::ID_MASK;

/// Which checksum convention a recovered frame matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumKind {
    /// LIN 1.x: payload bytes only
    Classic,
    /// LIN 2.x: protected identifier plus payload bytes
    Enhanced,
}

/// A fully validated LIN frame recovered from the byte stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinFrame {
    /// Protected identifier byte (6 id bits + 2 parity bits)
    pub pid: u8,

    /// Payload bytes, 1 to 8 of them
    pub payload: Vec<u8>,

    /// Checksum byte as seen on the wire
    pub checksum: u8,

    /// Convention the checksum matched
    pub checksum_kind: ChecksumKind,
}

impl LinFrame {
    /// The 6-bit frame identifier, parity bits stripped.
    pub fn id(&self) -> u8 {
        self.pid & ID_MASK
    }

    /// True when every payload byte is zero. Idle slaves on some buses
    /// publish all-zero responses continuously; consumers usually drop them.
    pub fn is_empty_payload(&self) -> bool {
        self.payload.iter().all(|&b| b == 0)
    }
}

/// A relaxed-scan hit: sync marker plus parity-valid identifier, payload
/// taken on faith without checksum confirmation.
///
/// This is the unit the baud sweep counts. At a wrong trial rate the UART
/// resamples bit edges into garbage that almost never forms a parity-valid
/// header, so the density of these hits is the discovery signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// Protected identifier byte
    pub pid: u8,

    /// Up to 8 bytes following the identifier, clamped at the capture end
    pub payload: Vec<u8>,
}

impl Detection {
    /// The 6-bit frame identifier, parity bits stripped.
    pub fn id(&self) -> u8 {
        self.pid & ID_MASK
    }
}

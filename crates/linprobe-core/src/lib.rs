//! # LinProbe Core Library
//!
//! Core functionality for LinProbe, a passive LIN bus analysis tool.

#![warn(missing_docs)]

//!
//! This library provides:
//! - Frame recovery from raw serial captures (parity, dual-convention
//!   checksums, length brute-forcing without a length field)
//! - Blind baud-rate discovery by swept-rate frame scoring
//! - Live identifier-filtered frame monitoring
//! - A synthetic bus generator for testing without hardware
//!
//! ## Example
//!
//! ```rust,ignore
//! use linprobe_core::discovery::{BaudDiscovery, DiscoveryConfig};
//! use linprobe_core::protocol::SerialFactory;
//! use std::time::Duration;
//!
//! // Find the bus rate
//! let mut factory = SerialFactory::new("/dev/ttyUSB0", Duration::from_millis(500));
//! let report = BaudDiscovery::new(DiscoveryConfig::default()).run(&mut factory);
//! match report.best {
//!     Some(m) => println!("Best match: {} baud, {} frames", m.baud, m.detections.len()),
//!     None => println!("No LIN frames detected."),
//! }
//! ```

pub mod demo;
pub mod discovery;
pub mod monitor;
pub mod protocol;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::demo::{SyntheticBus, SyntheticFactory};
    pub use crate::discovery::{
        BaudDiscovery, BaudMatch, DiscoveryConfig, SweepReport, Trial, TrialOutcome,
    };
    pub use crate::monitor::{FrameMonitor, MonitorConfig};
    pub use crate::protocol::{
        scan, scan_relaxed, ByteSource, ChecksumKind, Detection, LinFrame, SerialFactory,
        TransportError, TransportFactory,
    };
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

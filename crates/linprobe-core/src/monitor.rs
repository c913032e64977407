//! Live frame monitoring
//!
//! Once the bus rate is known, the monitor tails the transport, accumulates
//! raw bytes, runs the strict scanner over the accumulation buffer and hands
//! matching frames to the caller. Frames whose payload is all zeros are
//! dropped (idle slaves publish those continuously), as are frames whose
//! identifier differs from the configured target.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::protocol::{scan, ByteSource, LinFrame, TransportError};

/// Live filter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Protected identifier byte to display; everything else is suppressed
    pub target_pid: u8,

    /// Bytes requested from the transport per read
    pub read_chunk: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            target_pid: 0x20,
            read_chunk: 256,
        }
    }
}

/// Accumulating scanner over a live byte stream.
///
/// The buffer keeps the unconsumed tail between passes: a header whose
/// payload has not arrived yet survives until the next read completes it.
/// Bytes consumed by validated frames are dropped and never rescanned.
pub struct FrameMonitor {
    config: MonitorConfig,
    buffer: Vec<u8>,
}

impl FrameMonitor {
    /// Monitor with the given filter configuration.
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            buffer: Vec::new(),
        }
    }

    /// Bytes currently held back waiting for more data.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed newly received bytes and collect the frames accepted by the
    /// filter. Frames recovered but filtered out are still consumed from
    /// the buffer.
    pub fn ingest(&mut self, bytes: &[u8]) -> Vec<LinFrame> {
        self.buffer.extend_from_slice(bytes);

        let mut iter = scan(&self.buffer);
        let mut frames: Vec<LinFrame> = Vec::new();
        for frame in iter.by_ref() {
            frames.push(frame);
        }
        let consumed = iter.consumed();
        self.buffer.drain(..consumed);

        trace!(
            read = bytes.len(),
            recovered = frames.len(),
            pending = self.buffer.len(),
            "scan pass"
        );

        frames.retain(|f| f.pid == self.config.target_pid && !f.is_empty_payload());
        frames
    }

    /// Tail the transport indefinitely, invoking `on_frame` for every
    /// accepted frame.
    ///
    /// Idle reads (`Ok(0)`) keep the loop going; any transport error ends
    /// it and is returned to the caller. There is no retry policy here;
    /// reconnecting is the caller's decision.
    pub fn run<F>(
        &mut self,
        source: &mut dyn ByteSource,
        mut on_frame: F,
    ) -> Result<(), TransportError>
    where
        F: FnMut(&LinFrame),
    {
        let mut chunk = vec![0u8; self.config.read_chunk.max(1)];
        loop {
            let n = source.read_available(&mut chunk)?;
            if n == 0 {
                continue;
            }
            let accepted = self.ingest(&chunk[..n]);
            if !accepted.is_empty() {
                debug!(frames = accepted.len(), "accepted frames");
            }
            for frame in &accepted {
                on_frame(frame);
            }
        }
    }
}

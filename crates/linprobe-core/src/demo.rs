//! Synthetic bus - simulated LIN traffic generator for testing
//!
//! Produces byte streams shaped like a live bus capture (frames with valid
//! parity and checksums, separated by idle filler) without any hardware.
//! Nothing here transmits: the encoder only fills in-memory buffers for the
//! scanner, the sweep tests and demo runs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

use crate::protocol::checksum::{classic, enhanced};
use crate::protocol::parity::protect_id;
use crate::protocol::{
    ByteSource, ChecksumKind, TransportError, TransportFactory, SYNC_BYTE,
};

/// Encode one frame as it would appear on the wire: sync, protected
/// identifier, payload, checksum under the given convention.
///
/// The identifier is masked to 6 bits and protected here; callers pass the
/// bare id. Payloads longer than 8 bytes produce a stream no scanner will
/// confirm, so keep to the LIN limit.
pub fn encode_frame(id: u8, payload: &[u8], kind: ChecksumKind) -> Vec<u8> {
    let pid = protect_id(id);
    let checksum = match kind {
        ChecksumKind::Classic => classic(payload),
        ChecksumKind::Enhanced => enhanced(pid, payload),
    };
    let mut out = Vec::with_capacity(payload.len() + 3);
    out.push(SYNC_BYTE);
    out.push(pid);
    out.extend_from_slice(payload);
    out.push(checksum);
    out
}

/// Simulated bus: cycles a frame schedule with random idle gaps between
/// frames. Deterministic for a given seed.
pub struct SyntheticBus {
    rng: StdRng,
    schedule: Vec<(u8, Vec<u8>)>,
    checksum_kind: ChecksumKind,
    max_gap: usize,
    next_slot: usize,
    queue: VecDeque<u8>,
}

impl SyntheticBus {
    /// Bus with a small default schedule of classic-checksum frames.
    pub fn new(seed: u64) -> Self {
        Self::with_schedule(
            seed,
            vec![
                (0x20, vec![0x01, 0x02, 0x03]),
                (0x10, vec![0xDE, 0xAD]),
                (0x33, vec![0x07, 0x00, 0x09, 0x41]),
            ],
            ChecksumKind::Classic,
        )
    }

    /// Bus cycling the given (identifier, payload) schedule.
    pub fn with_schedule(
        seed: u64,
        schedule: Vec<(u8, Vec<u8>)>,
        checksum_kind: ChecksumKind,
    ) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            schedule,
            checksum_kind,
            max_gap: 3,
            next_slot: 0,
            queue: VecDeque::new(),
        }
    }

    /// Queue the next idle gap and frame.
    fn refill(&mut self) {
        // An empty schedule degenerates to a silent bus.
        if self.schedule.is_empty() {
            self.queue.push_back(0xFF);
            return;
        }

        // Idle line rests recessive (0xFF); the occasional 0x00 stands in
        // for a break field the UART collapsed to a null byte.
        let gap = self.rng.gen_range(0..=self.max_gap);
        for _ in 0..gap {
            let byte = if self.rng.gen_bool(0.9) { 0xFF } else { 0x00 };
            self.queue.push_back(byte);
        }

        let (id, payload) = &self.schedule[self.next_slot % self.schedule.len()];
        self.next_slot = self.next_slot.wrapping_add(1);
        for byte in encode_frame(*id, payload, self.checksum_kind) {
            self.queue.push_back(byte);
        }
    }

    /// Fill `buf` completely with the next stretch of bus traffic.
    pub fn fill(&mut self, buf: &mut [u8]) -> usize {
        for slot in buf.iter_mut() {
            loop {
                if let Some(byte) = self.queue.pop_front() {
                    *slot = byte;
                    break;
                }
                self.refill();
            }
        }
        buf.len()
    }

    /// Convenience: the next `len` bytes of traffic as a fresh buffer.
    pub fn emit(&mut self, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        self.fill(&mut out);
        out
    }
}

/// [`TransportFactory`] standing in for a real adapter during sweeps.
///
/// Within `tolerance` of `true_baud` the opened source carries clean
/// synthetic traffic; every other rate yields uniform random bytes, the
/// way a misclocked UART renders a real signal.
#[derive(Debug, Clone)]
pub struct SyntheticFactory {
    /// The rate the simulated bus actually runs at
    pub true_baud: u32,

    /// How far off a trial rate may be and still decode cleanly
    pub tolerance: u32,

    /// Base seed; each trial rate derives its own stream from it
    pub seed: u64,
}

impl TransportFactory for SyntheticFactory {
    fn open(&mut self, baud: u32) -> Result<Box<dyn ByteSource>, TransportError> {
        let seed = self.seed ^ u64::from(baud);
        if baud.abs_diff(self.true_baud) <= self.tolerance {
            Ok(Box::new(SyntheticSource::Bus(SyntheticBus::new(seed))))
        } else {
            Ok(Box::new(SyntheticSource::Noise(StdRng::seed_from_u64(seed))))
        }
    }
}

enum SyntheticSource {
    Bus(SyntheticBus),
    Noise(StdRng),
}

impl ByteSource for SyntheticSource {
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        match self {
            SyntheticSource::Bus(bus) => Ok(bus.fill(buf)),
            SyntheticSource::Noise(rng) => {
                rng.fill(buf);
                Ok(buf.len())
            }
        }
    }
}

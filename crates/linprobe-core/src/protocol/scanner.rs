//! Frame recovery from raw capture buffers
//!
//! A LIN frame on the wire is sync (0x55), protected identifier, 1-8 payload
//! bytes and a checksum, but no length field anywhere. The scanner
//! recovers frames from an arbitrary byte buffer by anchoring on sync bytes,
//! validating identifier parity, then brute-forcing the payload length in
//! ascending order until a checksum confirms. The shortest plausible length
//! wins; this is a heuristic, not a protocol guarantee, since a longer
//! length whose checksum would also match is never tried.

use super::checksum::match_checksum;
use super::frame::{Detection, LinFrame};
use super::parity::pid_parity_ok;
use super::{MAX_PAYLOAD, SYNC_BYTE};

/// Scan a buffer for validated LIN frames.
///
/// Returns a lazy iterator over non-overlapping frames in left-to-right
/// order. The iterator holds no hidden state beyond its cursor: scanning the
/// same buffer twice yields the same sequence. Any buffer content is
/// acceptable, including empty and shorter than a minimal frame.
pub fn scan(buf: &[u8]) -> ScanIter<'_> {
    ScanIter {
        buf,
        pos: 0,
        consumed: 0,
    }
}

/// Iterator state for [`scan`].
#[derive(Debug)]
pub struct ScanIter<'a> {
    buf: &'a [u8],
    pos: usize,
    consumed: usize,
}

impl ScanIter<'_> {
    /// Cursor position just past the last emitted frame, 0 if none was.
    ///
    /// Bytes before this offset have been consumed by validated frames and
    /// need never be scanned again; the tail from here on may still complete
    /// into a frame once more data arrives.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl Iterator for ScanIter<'_> {
    type Item = LinFrame;

    fn next(&mut self) -> Option<LinFrame> {
        // Smallest frame is sync + pid + 1 payload byte + checksum.
        while self.pos + 4 <= self.buf.len() {
            if self.buf[self.pos] != SYNC_BYTE {
                self.pos += 1;
                continue;
            }
            let pid = self.buf[self.pos + 1];
            if !pid_parity_ok(pid) {
                // A sync byte can occur inside payload data, so the very
                // next offset must still be tried.
                self.pos += 1;
                continue;
            }
            for len in 1..=MAX_PAYLOAD {
                let checksum_at = self.pos + 2 + len;
                if checksum_at >= self.buf.len() {
                    break;
                }
                let payload = &self.buf[self.pos + 2..checksum_at];
                let checksum = self.buf[checksum_at];
                if let Some(kind) = match_checksum(checksum, pid, payload) {
                    self.pos += 3 + len;
                    self.consumed = self.pos;
                    return Some(LinFrame {
                        pid,
                        payload: payload.to_vec(),
                        checksum,
                        checksum_kind: kind,
                    });
                }
            }
            // No length confirmed: false-positive sync, nothing consumed.
            self.pos += 1;
        }
        None
    }
}

/// Relaxed scan used by baud discovery.
///
/// Accepts `near_sync` as a second sync marker (a rate slightly off nominal
/// shifts 0x55's bit pattern toward its neighbours) and skips checksum
/// confirmation entirely: a parity-valid identifier alone counts as a hit,
/// with up to [`MAX_PAYLOAD`] following bytes captured as payload. Hits may
/// overlap since nothing is consumed. Discovery only needs a frame-density
/// signal, not exact frames.
pub fn scan_relaxed(buf: &[u8], near_sync: u8) -> Vec<Detection> {
    let mut hits = Vec::new();
    let mut pos = 0;
    while pos + 4 <= buf.len() {
        if buf[pos] == SYNC_BYTE || buf[pos] == near_sync {
            let pid = buf[pos + 1];
            if pid_parity_ok(pid) {
                let end = buf.len().min(pos + 2 + MAX_PAYLOAD);
                hits.push(Detection {
                    pid,
                    payload: buf[pos + 2..end].to_vec(),
                });
            }
        }
        pos += 1;
    }
    hits
}

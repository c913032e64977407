//! Frame recovery properties over the public API.

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use linprobe_core::protocol::checksum::{classic, enhanced, match_checksum};
use linprobe_core::protocol::parity::{pid_parity_ok, protect_id};
use linprobe_core::protocol::{scan, ChecksumKind, LinFrame};

#[test]
fn parity_is_determined_by_the_identifier_bits_alone() {
    let valid: Vec<u8> = (0..=255u8).filter(|&v| pid_parity_ok(v)).collect();
    assert_eq!(valid.len(), 64);
    // Each valid value is the protected form of its own low 6 bits.
    for &pid in &valid {
        assert_eq!(protect_id(pid & 0x3F), pid);
    }
}

#[test]
fn checksums_round_trip_under_their_own_convention() {
    let payloads: [&[u8]; 4] = [&[0x00], &[0xFF; 8], &[0x01, 0x02, 0x03], &[0x7F, 0x80]];
    for payload in payloads {
        for id in [0x00u8, 0x20, 0x3F] {
            let pid = protect_id(id);
            assert_eq!(
                match_checksum(classic(payload), pid, payload),
                Some(ChecksumKind::Classic)
            );
            let enh = enhanced(pid, payload);
            let expected = if enh == classic(payload) {
                ChecksumKind::Classic
            } else {
                ChecksumKind::Enhanced
            };
            assert_eq!(match_checksum(enh, pid, payload), Some(expected));
        }
    }
}

#[test]
fn one_embedded_frame_is_recovered_exactly_once() {
    for len in 1..=8usize {
        let payload: Vec<u8> = (1..=len as u8).collect();
        let mut buf = vec![0x55, 0x20];
        buf.extend_from_slice(&payload);
        buf.push(classic(&payload));
        // Unrelated trailing bytes, none of them sync markers.
        buf.extend_from_slice(&[0x81, 0x7E, 0x12, 0x90]);

        let frames: Vec<LinFrame> = scan(&buf).collect();
        assert_eq!(frames.len(), 1, "payload length {}", len);
        assert_eq!(frames[0].pid, 0x20);
        assert_eq!(frames[0].payload, payload);
        assert_eq!(frames[0].checksum, classic(&payload));
    }
}

#[test]
fn back_to_back_frames_do_not_overlap() {
    let mut buf = Vec::new();
    for _ in 0..5 {
        buf.extend_from_slice(&[0x55, 0x20, 0x09, 0x01, classic(&[0x09, 0x01])]);
    }
    let frames: Vec<LinFrame> = scan(&buf).collect();
    assert_eq!(frames.len(), 5);
    assert!(frames.iter().all(|f| f.payload == vec![0x09, 0x01]));
}

#[test]
fn reference_capture_from_the_wire() {
    // sync, valid-parity PID 0x20, three payload bytes, classic checksum
    let buf = [0x55, 0x20, 0x01, 0x02, 0x03, 0xF9];
    let frames: Vec<LinFrame> = scan(&buf).collect();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].id(), 0x20);
    assert_eq!(frames[0].payload, vec![0x01, 0x02, 0x03]);
    assert_eq!(frames[0].checksum, 0xF9);
    assert_eq!(frames[0].checksum_kind, ChecksumKind::Classic);
}

#[test]
fn random_buffers_never_fail_and_rarely_match() {
    let mut rng = StdRng::seed_from_u64(0xB105);
    for _ in 0..100 {
        let len = rng.gen_range(0..512);
        let buf: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        let frames: Vec<LinFrame> = scan(&buf).collect();
        // An accidental frame in half a kilobyte of noise is possible but
        // has to stay rare for the validity heuristics to mean anything.
        assert!(frames.len() <= 2, "{} frames in {} noise bytes", frames.len(), len);
    }
}

#[test]
fn degenerate_buffers_yield_empty_sequences() {
    assert_eq!(scan(&[]).count(), 0);
    assert_eq!(scan(&[0x55]).count(), 0);
    assert_eq!(scan(&[0x55, 0x20]).count(), 0);
    assert_eq!(scan(&[0x55, 0x20, 0x01]).count(), 0);
}

#[test]
fn rescanning_an_unmodified_buffer_is_stable() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut buf: Vec<u8> = (0..256).map(|_| rng.gen()).collect();
    buf.extend_from_slice(&[0x55, 0x20, 0xAB, classic(&[0xAB])]);

    let first: Vec<LinFrame> = scan(&buf).collect();
    let second: Vec<LinFrame> = scan(&buf).collect();
    assert_eq!(first, second);
    assert!(first.iter().any(|f| f.payload == vec![0xAB]));
}

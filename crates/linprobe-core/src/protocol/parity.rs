//! PID parity validation
//!
//! Every LIN header carries a protected identifier: 6 identifier bits plus
//! two parity bits in the top positions. The parity polynomial is fixed by
//! the LIN specification and is not configurable.

use super::ID_MASK;

/// Check the two parity bits of a protected identifier byte.
///
/// Bits 0-5 are the frame identifier; bit 6 must equal
/// `id0 ^ id1 ^ id2 ^ id4` and bit 7 the inverted `id1 ^ id3 ^ id4 ^ id5`.
/// Exactly 64 of the 256 byte values pass (one per identifier).
pub fn pid_parity_ok(pid: u8) -> bool {
    let bit = |n: u8| (pid >> n) & 1;
    let p0 = bit(0) ^ bit(1) ^ bit(2) ^ bit(4);
    let p1 = (bit(1) ^ bit(3) ^ bit(4) ^ bit(5)) ^ 1;
    (p0 | (p1 << 1)) == (pid >> 6)
}

/// Pack the parity bits onto a 6-bit identifier, producing the protected
/// identifier byte a conforming master would transmit.
///
/// Inverse of [`pid_parity_ok`]: `pid_parity_ok(protect_id(id))` holds for
/// every `id`. Identifier bits above 0x3F are discarded.
pub fn protect_id(id: u8) -> u8 {
    let id = id & ID_MASK;
    let bit = |n: u8| (id >> n) & 1;
    let p0 = bit(0) ^ bit(1) ^ bit(2) ^ bit(4);
    let p1 = (bit(1) ^ bit(3) ^ bit(4) ^ bit(5)) ^ 1;
    id | (p0 << 6) | (p1 << 7)
}

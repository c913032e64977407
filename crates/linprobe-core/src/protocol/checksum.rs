//! LIN checksum calculation
//!
//! LIN networks use one of two mutually exclusive checksum conventions:
//! classic (LIN 1.x, payload only) and enhanced (LIN 2.x, payload plus the
//! protected identifier). A passive listener does not know which convention
//! the bus uses, so candidate bytes are tested against both.

use super::frame::ChecksumKind;

/// Classic checksum: inverted modulo-256 sum of the payload bytes.
pub fn classic(payload: &[u8]) -> u8 {
    let sum: u32 = payload.iter().map(|&b| u32::from(b)).sum();
    0xFF - (sum & 0xFF) as u8
}

/// Enhanced checksum: inverted modulo-256 sum of the protected identifier
/// and the payload bytes.
pub fn enhanced(pid: u8, payload: &[u8]) -> u8 {
    let sum: u32 = u32::from(pid) + payload.iter().map(|&b| u32::from(b)).sum::<u32>();
    0xFF - (sum & 0xFF) as u8
}

/// Test a candidate checksum byte against both conventions.
///
/// Returns the convention that matched, or `None` if neither does. Classic
/// is tried first; when both conventions happen to produce the same byte
/// (payload sum collision), classic is the one recorded.
pub fn match_checksum(candidate: u8, pid: u8, payload: &[u8]) -> Option<ChecksumKind> {
    if candidate == classic(payload) {
        Some(ChecksumKind::Classic)
    } else if candidate == enhanced(pid, payload) {
        Some(ChecksumKind::Enhanced)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_known_value() {
        // 1 + 2 + 3 = 6, inverted = 0xF9
        assert_eq!(classic(&[0x01, 0x02, 0x03]), 0xF9);
    }

    #[test]
    fn classic_wraps_modulo_256() {
        assert_eq!(classic(&[0xFF, 0xFF]), 0xFF - 0xFE);
        assert_eq!(classic(&[]), 0xFF);
    }

    #[test]
    fn enhanced_folds_in_the_pid() {
        let payload = [0x10, 0x22];
        assert_eq!(enhanced(0x00, &payload), classic(&payload));
        assert_eq!(enhanced(0x20, &payload), 0xFF - ((0x20 + 0x10 + 0x22) & 0xFF) as u8);
    }

    #[test]
    fn round_trip_both_conventions() {
        let payload = [0xDE, 0xAD, 0xBE, 0xEF];
        let pid = 0x61;
        assert_eq!(
            match_checksum(classic(&payload), pid, &payload),
            Some(ChecksumKind::Classic)
        );
        assert_eq!(
            match_checksum(enhanced(pid, &payload), pid, &payload),
            Some(ChecksumKind::Enhanced)
        );
    }

    #[test]
    fn mismatch_is_rejected() {
        let payload = [0x01, 0x02];
        let good = classic(&payload);
        assert_eq!(match_checksum(good.wrapping_add(1), 0x20, &payload), None);
    }

    #[test]
    fn classic_wins_a_collision() {
        // With pid contribution 0 mod 256 the two conventions coincide;
        // the recorded kind must then be classic.
        let payload = [0x05];
        assert_eq!(
            match_checksum(classic(&payload), 0x00, &payload),
            Some(ChecksumKind::Classic)
        );
    }
}

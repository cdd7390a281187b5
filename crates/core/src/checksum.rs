// crates/core/src/checksum.rs
//! Deterministic fingerprints for duplicate detection on imported records.
//!
//! The hash is a 32-bit rolling hash over the UTF-16 code units of
//! `content.trim() + "-" + date`, rendered in base-36. Two records with the
//! same trimmed content and date string always collide on purpose; unrelated
//! records collide rarely but legitimately, so callers must treat a match as
//! "likely duplicate", never proof.

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Fingerprint of a record's (content, date) pair.
pub fn checksum(content: &str, date: &str) -> String {
    let basis = format!("{}-{}", content.trim(), date);
    let mut hash: i32 = 0;
    for unit in basis.encode_utf16() {
        // h = h * 31 + unit, in wrapping 32-bit arithmetic
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(unit as i32);
    }
    to_base36(i64::from(hash).unsigned_abs())
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = [0u8; 13];
    let mut i = buf.len();
    while n > 0 {
        i -= 1;
        buf[i] = BASE36[(n % 36) as usize];
        n /= 36;
    }
    // Safe: every byte written comes from the BASE36 alphabet.
    String::from_utf8_lossy(&buf[i..]).into_owned()
}

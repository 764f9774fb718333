//! Byte-level helpers shared by the ciphers and the modes of operation.
//!
//! Comparisons run in constant time through `subtle`. Zero-filling goes
//! through `zeroize` so the compiler cannot elide the writes.

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// Byte-by-byte XOR of two slices.
///
/// The result is as long as the shorter operand, which lets callers XOR a
/// truncated keystream block against a trailing partial block.
pub fn add_xor(op_a: &[u8], op_b: &[u8]) -> Vec<u8> {
    op_a.iter().zip(op_b.iter()).map(|(a, b)| a ^ b).collect()
}

/// XORs `src` into `dst` in place over their common length.
pub fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d ^= s;
    }
}

/// Overwrites a buffer with zeros.
pub fn zero_fill(buf: &mut [u8]) {
    buf.zeroize();
}

/// Compares two byte slices in constant time.
///
/// Slices of different length compare unequal; the length itself is not
/// treated as secret.
pub fn compare(op_a: &[u8], op_b: &[u8]) -> bool {
    op_a.ct_eq(op_b).into()
}

/// Checks in constant time that every byte of `value` is zero.
pub fn compare_to_zero(value: &[u8]) -> bool {
    let acc = value.iter().fold(0u8, |acc, &b| acc | b);
    acc.ct_eq(&0).into()
}

/// Returns the most significant bit of a big-endian value (0x80 or 0).
///
/// An empty slice has no high bit and yields 0.
pub fn msb(value: &[u8]) -> u8 {
    value.first().map_or(0, |b| b & 0x80)
}

/// Converts up to 16 big-endian bytes into a `u128`.
///
/// # Returns
/// `None` if `input` is longer than 16 bytes.
pub fn bytes_to_int(input: &[u8]) -> Option<u128> {
    if input.len() > 16 {
        return None;
    }
    Some(input.iter().fold(0u128, |acc, &b| (acc << 8) | b as u128))
}

/// Writes the low `out.len()` bytes of `value` into `out`, big-endian.
///
/// Higher-order bytes that do not fit are discarded.
pub fn int_to_bytes(value: u128, out: &mut [u8]) {
    let len = out.len();
    for (i, byte) in out.iter_mut().enumerate() {
        let shift = 8 * (len - 1 - i);
        *byte = if shift < 128 {
            (value >> shift) as u8
        } else {
            0
        };
    }
}

/// Increments a big-endian counter in place, wrapping on overflow.
pub fn increment_be(counter: &mut [u8]) {
    for byte in counter.iter_mut().rev() {
        let (next, carry) = byte.overflowing_add(1);
        *byte = next;
        if !carry {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_xor_basic() {
        let result = add_xor(&[0x0f, 0xf0, 0xaa], &[0xff, 0xff, 0xaa]);
        assert_eq!(result, vec![0xf0, 0x0f, 0x00]);
    }

    #[test]
    fn test_add_xor_truncates_to_shorter() {
        let result = add_xor(&[1, 2, 3, 4], &[1, 1]);
        assert_eq!(result, vec![0, 3]);
    }

    #[test]
    fn test_xor_in_place() {
        let mut dst = [0x11u8, 0x22, 0x33];
        xor_in_place(&mut dst, &[0x11, 0x22]);
        assert_eq!(dst, [0, 0, 0x33]);
    }

    #[test]
    fn test_zero_fill() {
        let mut buf = [0xa5u8; 32];
        zero_fill(&mut buf);
        assert_eq!(buf, [0u8; 32]);
    }

    #[test]
    fn test_compare() {
        assert!(compare(b"abcdef", b"abcdef"));
        assert!(!compare(b"abcdef", b"abcdeg"));
        assert!(!compare(b"abc", b"abcd"));
        assert!(compare(b"", b""));
    }

    #[test]
    fn test_compare_to_zero() {
        assert!(compare_to_zero(&[0u8; 16]));
        assert!(compare_to_zero(&[]));
        let mut buf = [0u8; 16];
        buf[15] = 1;
        assert!(!compare_to_zero(&buf));
    }

    #[test]
    fn test_msb() {
        assert_eq!(msb(&[0x80, 0x00]), 0x80);
        assert_eq!(msb(&[0x7f, 0xff]), 0);
        assert_eq!(msb(&[]), 0);
    }

    #[test]
    fn test_bytes_to_int_basic() {
        let bytes: [u8; 8] = [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF];
        assert_eq!(bytes_to_int(&bytes), Some(0x0123_4567_89AB_CDEF));
    }

    #[test]
    fn test_bytes_to_int_too_long() {
        assert_eq!(bytes_to_int(&[0u8; 17]), None);
    }

    #[test]
    fn test_bytes_to_int_empty() {
        assert_eq!(bytes_to_int(&[]), Some(0));
    }

    #[test]
    fn test_int_to_bytes_basic() {
        let mut out = [0u8; 8];
        int_to_bytes(0x0123_4567_89AB_CDEF, &mut out);
        assert_eq!(out, [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF]);
    }

    #[test]
    fn test_int_to_bytes_truncates_high_bytes() {
        let mut out = [0u8; 2];
        int_to_bytes(0xAABB_CCDD, &mut out);
        assert_eq!(out, [0xCC, 0xDD]);
    }

    #[test]
    fn test_int_to_bytes_wider_than_u128() {
        let mut out = [0xffu8; 18];
        int_to_bytes(1, &mut out);
        assert_eq!(out[..17], [0u8; 17]);
        assert_eq!(out[17], 1);
    }

    #[test]
    fn test_increment_be_carry() {
        let mut ctr = [0x12, 0x34, 0x00, 0xff, 0xff];
        increment_be(&mut ctr);
        assert_eq!(ctr, [0x12, 0x34, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_increment_be_wraps() {
        let mut ctr = [0xffu8; 8];
        increment_be(&mut ctr);
        assert_eq!(ctr, [0u8; 8]);
    }
}

//! Finite-field helpers for the Kuznechik linear layer and the MAC subkeys.

use crate::utils::bytes::{bytes_to_int, int_to_bytes, msb};

/// Low byte of the Kuznechik field polynomial x^8 + x^7 + x^6 + x + 1.
const GF_REDUCTION: u8 = 0xc3;

/// Reduction constant for doubling in GF(2^64).
const B_64: u128 = 0x1b;

/// Reduction constant for doubling in GF(2^128).
const B_128: u128 = 0x87;

/// Multiplies two bytes in GF(2^8) modulo x^8 + x^7 + x^6 + x + 1.
///
/// Shift-and-add over the 8 bits of `op_b`.
pub(crate) fn gf_mul(mut op_a: u8, mut op_b: u8) -> u8 {
    let mut result = 0u8;
    for _ in 0..8 {
        if op_b & 1 != 0 {
            result ^= op_a;
        }
        let hi_bit = op_a & 0x80;
        op_a <<= 1;
        if hi_bit != 0 {
            op_a ^= GF_REDUCTION;
        }
        op_b >>= 1;
    }
    result
}

/// Doubles a 64- or 128-bit big-endian block in place in GF(2^n).
///
/// The block is shifted left by one bit; if the bit shifted out was set,
/// the reduction constant for the block size is XORed into the low byte.
/// Blocks of any other length are left untouched.
pub(crate) fn gf_double(block: &mut [u8]) {
    let reduction = match block.len() {
        8 => B_64,
        16 => B_128,
        _ => return,
    };
    let Some(value) = bytes_to_int(block) else {
        return;
    };
    let carry = msb(block) != 0;
    let mut doubled = value << 1;
    if carry {
        doubled ^= reduction;
    }
    int_to_bytes(doubled, block);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gf_mul_identity() {
        for a in 0..=255u8 {
            assert_eq!(gf_mul(a, 1), a);
            assert_eq!(gf_mul(1, a), a);
            assert_eq!(gf_mul(a, 0), 0);
        }
    }

    #[test]
    fn test_gf_mul_reduction() {
        assert_eq!(gf_mul(0x80, 0x02), 0xc3);
        assert_eq!(gf_mul(0x87, 0x02), 0xcd);
        assert_eq!(gf_mul(0x94, 0x20), 0xa8);
        assert_eq!(gf_mul(0xff, 0xff), 0x06);
    }

    #[test]
    fn test_gf_mul_commutative() {
        for a in (0..=255u8).step_by(7) {
            for b in (0..=255u8).step_by(11) {
                assert_eq!(gf_mul(a, b), gf_mul(b, a));
            }
        }
    }

    #[test]
    fn test_gf_double_128_with_carry() {
        let mut block = [
            0x94, 0xbe, 0xc1, 0x5e, 0x26, 0x9c, 0xf1, 0xe5, 0x06, 0xf0, 0x2b, 0x99, 0x4c, 0x0a,
            0x8e, 0xa0,
        ];
        gf_double(&mut block);
        assert_eq!(
            block,
            [
                0x29, 0x7d, 0x82, 0xbc, 0x4d, 0x39, 0xe3, 0xca, 0x0d, 0xe0, 0x57, 0x32, 0x98, 0x15,
                0x1d, 0xc7,
            ]
        );
    }

    #[test]
    fn test_gf_double_128_without_carry() {
        let mut block = [
            0x29, 0x7d, 0x82, 0xbc, 0x4d, 0x39, 0xe3, 0xca, 0x0d, 0xe0, 0x57, 0x32, 0x98, 0x15,
            0x1d, 0xc7,
        ];
        gf_double(&mut block);
        assert_eq!(
            block,
            [
                0x52, 0xfb, 0x05, 0x78, 0x9a, 0x73, 0xc7, 0x94, 0x1b, 0xc0, 0xae, 0x65, 0x30, 0x2a,
                0x3b, 0x8e,
            ]
        );
    }

    #[test]
    fn test_gf_double_64() {
        let mut block = [0x2f, 0xa2, 0xcd, 0x99, 0xa1, 0x29, 0x0a, 0x12];
        gf_double(&mut block);
        assert_eq!(block, [0x5f, 0x45, 0x9b, 0x33, 0x42, 0x52, 0x14, 0x24]);
        gf_double(&mut block);
        assert_eq!(block, [0xbe, 0x8b, 0x36, 0x66, 0x84, 0xa4, 0x28, 0x48]);
    }

    #[test]
    fn test_gf_double_ignores_other_sizes() {
        let mut block = [0x80u8; 4];
        gf_double(&mut block);
        assert_eq!(block, [0x80u8; 4]);
    }
}

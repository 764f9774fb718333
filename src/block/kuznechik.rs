//! Kuznechik: 128-bit block cipher from GOST R 34.12-2015.
//!
//! A 10-round substitution-permutation network. Each of the first nine
//! rounds applies key addition (X), byte substitution (S) and the linear
//! transform (L); the tenth is a bare key addition. The ten round keys are
//! derived from the 256-bit key by a 32-step Feistel schedule whose
//! constants are `L(i)` for `i = 1..=32`.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::{BlockCipher, KEY_SIZE};
use crate::error::GostCipherError;
use crate::oid::ObjectIdentifier;
use crate::utils::bits::gf_mul;
use crate::utils::bytes::xor_in_place;

/// Block size in bytes.
pub(crate) const BLOCK_SIZE: usize = 16;

const ROUND_KEYS: usize = 10;

/// Nonlinear bijection pi.
const PI: [u8; 256] = [
    252, 238, 221, 17, 207, 110, 49, 22, 251, 196, 250, 218, 35, 197, 4, 77, 233, 119, 240, 219,
    147, 46, 153, 186, 23, 54, 241, 187, 20, 205, 95, 193, 249, 24, 101, 90, 226, 92, 239, 33,
    129, 28, 60, 66, 139, 1, 142, 79, 5, 132, 2, 174, 227, 106, 143, 160, 6, 11, 237, 152, 127,
    212, 211, 31, 235, 52, 44, 81, 234, 200, 72, 171, 242, 42, 104, 162, 253, 58, 206, 204, 181,
    112, 14, 86, 8, 12, 118, 18, 191, 114, 19, 71, 156, 183, 93, 135, 21, 161, 150, 41, 16, 123,
    154, 199, 243, 145, 120, 111, 157, 158, 178, 177, 50, 117, 25, 61, 255, 53, 138, 126, 109, 84,
    198, 128, 195, 189, 13, 87, 223, 245, 36, 169, 62, 168, 67, 201, 215, 121, 214, 246, 124, 34,
    185, 3, 224, 15, 236, 222, 122, 148, 176, 188, 220, 232, 40, 80, 78, 51, 10, 74, 167, 151, 96,
    115, 30, 0, 98, 68, 26, 184, 56, 130, 100, 159, 38, 65, 173, 69, 70, 146, 39, 94, 85, 47, 140,
    163, 165, 125, 105, 213, 149, 59, 7, 88, 179, 64, 134, 172, 29, 247, 48, 55, 107, 228, 136,
    217, 231, 137, 225, 27, 131, 73, 76, 63, 248, 254, 141, 83, 170, 144, 202, 216, 133, 97, 32,
    113, 103, 164, 45, 43, 9, 91, 203, 155, 37, 208, 190, 229, 108, 82, 89, 166, 116, 210, 230,
    244, 180, 192, 209, 102, 175, 194, 57, 75, 99, 182,
];

const PI_REVERSE: [u8; 256] = invert(&PI);

/// Coefficients of the linear feedback function l.
const L_VEC: [u8; BLOCK_SIZE] = [
    0x01, 0x94, 0x20, 0x85, 0x10, 0xc2, 0xc0, 0x01, 0xfb, 0x01, 0xc0, 0xc2, 0x10, 0x85, 0x20, 0x94,
];

const fn invert(sbox: &[u8; 256]) -> [u8; 256] {
    let mut out = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        out[sbox[i] as usize] = i as u8;
        i += 1;
    }
    out
}

/// Kuznechik cipher instance holding the expanded round keys.
///
/// Round keys are zeroized on drop and by [`BlockCipher::clear`].
#[derive(ZeroizeOnDrop)]
pub struct Kuznechik {
    round_keys: [[u8; BLOCK_SIZE]; ROUND_KEYS],
    #[zeroize(skip)]
    cleared: bool,
}

impl Kuznechik {
    /// Expands a 256-bit key into the ten round keys.
    ///
    /// # Parameters
    /// - `key`: 32-byte cipher key. The first half becomes round key 1 and
    ///   the second half round key 2.
    ///
    /// # Errors
    /// Returns [`GostCipherError::InvalidKeySize`] if `key` is not 32 bytes.
    ///
    /// # Examples
    /// ```
    /// use gostcipher::block::Kuznechik;
    ///
    /// let key = [0x42u8; 32];
    /// let cipher = Kuznechik::new(&key).unwrap();
    /// let block = [0u8; 16];
    /// let ct = cipher.encrypt(&block);
    /// assert_eq!(cipher.decrypt(&ct), block);
    /// ```
    pub fn new(key: &[u8]) -> Result<Self, GostCipherError> {
        if key.len() != KEY_SIZE {
            return Err(GostCipherError::InvalidKeySize);
        }

        let mut cipher = Kuznechik {
            round_keys: [[0u8; BLOCK_SIZE]; ROUND_KEYS],
            cleared: false,
        };
        cipher.expand_key(key);
        Ok(cipher)
    }

    /// Encrypts a single 16-byte block.
    pub fn encrypt(&self, block: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut state = *block;
        for key in &self.round_keys[..ROUND_KEYS - 1] {
            xor_in_place(&mut state, key);
            substitute(&mut state, &PI);
            linear(&mut state);
        }
        xor_in_place(&mut state, &self.round_keys[ROUND_KEYS - 1]);
        state
    }

    /// Decrypts a single 16-byte block.
    pub fn decrypt(&self, block: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        let mut state = *block;
        xor_in_place(&mut state, &self.round_keys[ROUND_KEYS - 1]);
        for key in self.round_keys[..ROUND_KEYS - 1].iter().rev() {
            linear_reverse(&mut state);
            substitute(&mut state, &PI_REVERSE);
            xor_in_place(&mut state, key);
        }
        state
    }

    // ──────── Key schedule ────────

    fn expand_key(&mut self, key: &[u8]) {
        let mut left = Zeroizing::new([0u8; BLOCK_SIZE]);
        let mut right = Zeroizing::new([0u8; BLOCK_SIZE]);
        let mut step = Zeroizing::new([0u8; BLOCK_SIZE]);
        left.copy_from_slice(&key[..BLOCK_SIZE]);
        right.copy_from_slice(&key[BLOCK_SIZE..]);

        self.round_keys[0] = *left;
        self.round_keys[1] = *right;

        let constants = round_constants();
        for (group, chunk) in constants.chunks_exact(8).enumerate() {
            for constant in chunk {
                *step = *left;
                xor_in_place(&mut *step, constant);
                substitute(&mut step, &PI);
                linear(&mut step);
                xor_in_place(&mut *step, &*right);
                *right = *left;
                *left = *step;
            }
            self.round_keys[2 * group + 2] = *left;
            self.round_keys[2 * group + 3] = *right;
        }
    }
}

/// Iteration constants `C_i = L(vec(i))`, `i = 1..=32`.
fn round_constants() -> [[u8; BLOCK_SIZE]; 32] {
    let mut constants = [[0u8; BLOCK_SIZE]; 32];
    for (i, constant) in constants.iter_mut().enumerate() {
        constant[BLOCK_SIZE - 1] = (i + 1) as u8;
        linear(constant);
    }
    constants
}

// ──────── Round transforms ────────

fn substitute(state: &mut [u8; BLOCK_SIZE], sbox: &[u8; 256]) {
    for byte in state.iter_mut() {
        *byte = sbox[*byte as usize];
    }
}

fn linear_sum(state: &[u8; BLOCK_SIZE]) -> u8 {
    state
        .iter()
        .zip(L_VEC.iter())
        .fold(0u8, |acc, (&s, &l)| acc ^ gf_mul(s, l))
}

/// One step of the linear shift register (transform R).
fn shift_forward(state: &mut [u8; BLOCK_SIZE]) {
    state.rotate_right(1);
    state[0] = linear_sum(state);
}

/// Inverse of [`shift_forward`].
fn shift_reverse(state: &mut [u8; BLOCK_SIZE]) {
    let feedback = linear_sum(state);
    state.rotate_left(1);
    state[BLOCK_SIZE - 1] = feedback;
}

/// Transform L: sixteen applications of R.
fn linear(state: &mut [u8; BLOCK_SIZE]) {
    for _ in 0..BLOCK_SIZE {
        shift_forward(state);
    }
}

fn linear_reverse(state: &mut [u8; BLOCK_SIZE]) {
    for _ in 0..BLOCK_SIZE {
        shift_reverse(state);
    }
}

impl BlockCipher for Kuznechik {
    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    fn encrypt_block(&self, block: &mut [u8]) {
        let mut input = Zeroizing::new([0u8; BLOCK_SIZE]);
        input.copy_from_slice(block);
        block.copy_from_slice(&self.encrypt(&input));
    }

    fn decrypt_block(&self, block: &mut [u8]) {
        let mut input = Zeroizing::new([0u8; BLOCK_SIZE]);
        input.copy_from_slice(block);
        block.copy_from_slice(&self.decrypt(&input));
    }

    fn clear(&mut self) {
        self.round_keys.zeroize();
        self.cleared = true;
    }

    fn is_cleared(&self) -> bool {
        self.cleared
    }

    fn oid(&self) -> ObjectIdentifier {
        ObjectIdentifier::kuznechik()
    }
}

/// Same as [`BlockCipher::clear`]: later mode operations fail with
/// [`GostCipherError::Cleared`].
impl Zeroize for Kuznechik {
    fn zeroize(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for Kuznechik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kuznechik")
            .field("cleared", &self.cleared)
            .finish_non_exhaustive()
    }
}

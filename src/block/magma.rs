//! Magma: 64-bit block cipher from GOST R 34.12-2015.
//!
//! A 32-round Feistel network over two 32-bit halves. The round function
//! adds the round key modulo 2^32, passes each nibble through its own
//! S-box and rotates the result left by 11 bits.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::{BlockCipher, KEY_SIZE};
use crate::error::GostCipherError;
use crate::oid::ObjectIdentifier;

/// Block size in bytes.
pub(crate) const BLOCK_SIZE: usize = 8;

const ROUNDS: usize = 32;

/// S-boxes pi'_0..pi'_7, indexed by nibble position from the least
/// significant end of the word.
const S_BOX: [[u8; 16]; 8] = [
    [12, 4, 6, 2, 10, 5, 11, 9, 14, 8, 13, 7, 0, 3, 15, 1],
    [6, 8, 2, 3, 9, 10, 5, 12, 1, 14, 4, 7, 11, 13, 0, 15],
    [11, 3, 5, 8, 2, 15, 10, 13, 14, 1, 7, 4, 12, 9, 6, 0],
    [12, 8, 2, 1, 13, 4, 15, 6, 7, 0, 10, 5, 3, 14, 9, 11],
    [7, 15, 5, 10, 8, 1, 6, 13, 0, 9, 3, 14, 11, 4, 2, 12],
    [5, 13, 15, 6, 9, 2, 12, 10, 11, 7, 8, 1, 4, 3, 14, 0],
    [8, 14, 2, 5, 6, 9, 1, 12, 15, 4, 11, 0, 13, 10, 3, 7],
    [1, 7, 14, 13, 0, 5, 8, 3, 4, 15, 10, 6, 9, 12, 11, 2],
];

/// Magma cipher instance holding the 32 round-key words.
///
/// Round keys are zeroized on drop and by [`BlockCipher::clear`].
#[derive(ZeroizeOnDrop)]
pub struct Magma {
    round_keys: [u32; ROUNDS],
    #[zeroize(skip)]
    cleared: bool,
}

impl Magma {
    /// Expands a 256-bit key into the 32 round keys.
    ///
    /// The key is read as eight big-endian words `k1..k8`. Rounds 1-24 use
    /// them in order three times, rounds 25-32 use them in reverse.
    ///
    /// # Errors
    /// Returns [`GostCipherError::InvalidKeySize`] if `key` is not 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self, GostCipherError> {
        if key.len() != KEY_SIZE {
            return Err(GostCipherError::InvalidKeySize);
        }

        let mut words = Zeroizing::new([0u32; 8]);
        for (word, chunk) in words.iter_mut().zip(key.chunks_exact(4)) {
            *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        let mut cipher = Magma {
            round_keys: [0u32; ROUNDS],
            cleared: false,
        };
        for (i, round_key) in cipher.round_keys.iter_mut().enumerate() {
            *round_key = if i < 24 { words[i % 8] } else { words[31 - i] };
        }
        Ok(cipher)
    }

    /// Encrypts a single 8-byte block.
    pub fn encrypt(&self, block: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        feistel(self.round_keys.iter(), block)
    }

    /// Decrypts a single 8-byte block.
    pub fn decrypt(&self, block: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
        feistel(self.round_keys.iter().rev(), block)
    }
}

/// Runs the 32 Feistel rounds with the given key order.
///
/// Rounds 1-31 swap halves; round 32 only updates the high half.
fn feistel<'a, I>(keys: I, block: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE]
where
    I: Iterator<Item = &'a u32>,
{
    let mut high = u32::from_be_bytes([block[0], block[1], block[2], block[3]]);
    let mut low = u32::from_be_bytes([block[4], block[5], block[6], block[7]]);

    let mut keys = keys.peekable();
    while let Some(&key) = keys.next() {
        let mixed = transform_g(key, low) ^ high;
        if keys.peek().is_some() {
            high = low;
            low = mixed;
        } else {
            high = mixed;
        }
    }

    let mut out = [0u8; BLOCK_SIZE];
    out[..4].copy_from_slice(&high.to_be_bytes());
    out[4..].copy_from_slice(&low.to_be_bytes());
    out
}

/// Transform t: nibble-wise substitution.
fn transform_t(value: u32) -> u32 {
    S_BOX
        .iter()
        .enumerate()
        .fold(0u32, |acc, (i, sbox)| {
            let shift = 4 * i;
            let nibble = (value >> shift) & 0x0f;
            acc | (u32::from(sbox[nibble as usize]) << shift)
        })
}

/// Round function g[k](a) = t(k + a mod 2^32) <<< 11.
fn transform_g(key: u32, value: u32) -> u32 {
    transform_t(key.wrapping_add(value)).rotate_left(11)
}

impl BlockCipher for Magma {
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
        ObjectIdentifier::magma()
    }
}

/// Same as [`BlockCipher::clear`]: later mode operations fail with
/// [`GostCipherError::Cleared`].
impl Zeroize for Magma {
    fn zeroize(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for Magma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Magma")
            .field("cleared", &self.cleared)
            .finish_non_exhaustive()
    }
}

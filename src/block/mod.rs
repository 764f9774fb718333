//! GOST R 34.12-2015 block ciphers.
//!
//! Both ciphers take a 256-bit key and expose the same contract through
//! [`BlockCipher`]. [`Cipher`] selects one of them at runtime for the mode
//! layer.

mod kuznechik;
mod magma;

use std::fmt;
use std::str::FromStr;

use zeroize::ZeroizeOnDrop;

use crate::error::GostCipherError;
use crate::oid::ObjectIdentifier;

pub use kuznechik::Kuznechik;
pub use magma::Magma;

/// Key size shared by both ciphers, in bytes.
pub const KEY_SIZE: usize = 32;

/// Single-block transform shared by Kuznechik and Magma.
///
/// Implementors wipe their round keys on drop (`ZeroizeOnDrop`) and on
/// [`clear`](BlockCipher::clear).
pub trait BlockCipher: ZeroizeOnDrop {
    /// Block size in bytes.
    fn block_size(&self) -> usize;

    /// Key size in bytes.
    fn key_size(&self) -> usize {
        KEY_SIZE
    }

    /// Encrypts one block in place.
    ///
    /// # Panics
    /// Panics if `block.len() != self.block_size()`.
    fn encrypt_block(&self, block: &mut [u8]);

    /// Decrypts one block in place.
    ///
    /// # Panics
    /// Panics if `block.len() != self.block_size()`.
    fn decrypt_block(&self, block: &mut [u8]);

    /// Overwrites the round keys with zeros.
    fn clear(&mut self);

    /// Returns `true` once [`clear`](BlockCipher::clear) has run.
    fn is_cleared(&self) -> bool;

    /// Registered object identifier of the cipher.
    fn oid(&self) -> ObjectIdentifier;
}

/// Cipher algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// 128-bit block substitution-permutation network.
    Kuznechik,
    /// 64-bit block Feistel network.
    Magma,
}

impl Algorithm {
    /// Lowercase algorithm name as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Kuznechik => "kuznechik",
            Algorithm::Magma => "magma",
        }
    }

    /// Block size of the algorithm in bytes.
    pub fn block_size(&self) -> usize {
        match self {
            Algorithm::Kuznechik => kuznechik::BLOCK_SIZE,
            Algorithm::Magma => magma::BLOCK_SIZE,
        }
    }

    /// Registered object identifier of the algorithm.
    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            Algorithm::Kuznechik => ObjectIdentifier::kuznechik(),
            Algorithm::Magma => ObjectIdentifier::magma(),
        }
    }

    /// Expands `key` into a cipher instance of this algorithm.
    ///
    /// # Errors
    /// Returns [`GostCipherError::InvalidKeySize`] if `key` is not 32 bytes.
    pub fn build(&self, key: &[u8]) -> Result<Cipher, GostCipherError> {
        match self {
            Algorithm::Kuznechik => Ok(Cipher::Kuznechik(Kuznechik::new(key)?)),
            Algorithm::Magma => Ok(Cipher::Magma(Magma::new(key)?)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = GostCipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kuznechik" => Ok(Algorithm::Kuznechik),
            "magma" => Ok(Algorithm::Magma),
            _ => Err(GostCipherError::UnsupportedAlgorithm),
        }
    }
}

/// Runtime-selected cipher instance.
///
/// Each variant zeroizes its own round keys when dropped.
pub enum Cipher {
    /// 128-bit block cipher.
    Kuznechik(Kuznechik),
    /// 64-bit block cipher.
    Magma(Magma),
}

impl Cipher {
    /// Algorithm of the wrapped cipher.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Cipher::Kuznechik(_) => Algorithm::Kuznechik,
            Cipher::Magma(_) => Algorithm::Magma,
        }
    }
}

impl ZeroizeOnDrop for Cipher {}

impl fmt::Debug for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cipher").field(&self.algorithm()).finish()
    }
}

impl BlockCipher for Cipher {
    fn block_size(&self) -> usize {
        match self {
            Cipher::Kuznechik(c) => c.block_size(),
            Cipher::Magma(c) => c.block_size(),
        }
    }

    fn encrypt_block(&self, block: &mut [u8]) {
        match self {
            Cipher::Kuznechik(c) => c.encrypt_block(block),
            Cipher::Magma(c) => c.encrypt_block(block),
        }
    }

    fn decrypt_block(&self, block: &mut [u8]) {
        match self {
            Cipher::Kuznechik(c) => c.decrypt_block(block),
            Cipher::Magma(c) => c.decrypt_block(block),
        }
    }

    fn clear(&mut self) {
        match self {
            Cipher::Kuznechik(c) => c.clear(),
            Cipher::Magma(c) => c.clear(),
        }
    }

    fn is_cleared(&self) -> bool {
        match self {
            Cipher::Kuznechik(c) => c.is_cleared(),
            Cipher::Magma(c) => c.is_cleared(),
        }
    }

    fn oid(&self) -> ObjectIdentifier {
        self.algorithm().oid()
    }
}

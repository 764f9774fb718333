//! Cipher feedback mode.

use super::ensure_live;
use super::feedback::FeedbackRegister;
use crate::block::BlockCipher;
use crate::error::GostCipherError;
use crate::utils::bytes::add_xor;

/// CFB over any [`BlockCipher`] with full-block feedback.
///
/// The gamma is the encrypted head of the register; each ciphertext block
/// is fed back. A trailing partial block ends the message: it is XORed
/// with a truncated gamma, the register stays put, and later calls fail
/// with [`GostCipherError::StreamFinalized`].
#[derive(Debug)]
pub struct Cfb<C: BlockCipher> {
    cipher: C,
    register: FeedbackRegister,
    finalized: bool,
}

impl<C: BlockCipher> Cfb<C> {
    /// Wraps `cipher` in CFB mode.
    ///
    /// # Errors
    /// Returns [`GostCipherError::InvalidIvSize`] unless `init_vect` is a
    /// non-empty multiple of the block size.
    pub fn new(cipher: C, init_vect: &[u8]) -> Result<Self, GostCipherError> {
        let register = FeedbackRegister::new(init_vect, cipher.block_size())?;
        Ok(Cfb {
            cipher,
            register,
            finalized: false,
        })
    }

    /// Encrypts `data`, feeding each ciphertext block back.
    ///
    /// # Errors
    /// - [`GostCipherError::StreamFinalized`] after a partial block.
    /// - [`GostCipherError::Cleared`] after [`clear`](Cfb::clear).
    pub fn encrypt(&mut self, data: &[u8]) -> Result<Vec<u8>, GostCipherError> {
        self.process(data, true)
    }

    /// Decrypts `data`, feeding each ciphertext block back.
    ///
    /// # Errors
    /// Same as [`encrypt`](Cfb::encrypt).
    pub fn decrypt(&mut self, data: &[u8]) -> Result<Vec<u8>, GostCipherError> {
        self.process(data, false)
    }

    fn process(&mut self, data: &[u8], encrypting: bool) -> Result<Vec<u8>, GostCipherError> {
        ensure_live(&self.cipher)?;
        if self.finalized {
            return Err(GostCipherError::StreamFinalized);
        }

        let bs = self.block_size();
        let mut out = Vec::with_capacity(data.len());
        let mut blocks = data.chunks_exact(bs);
        for block in &mut blocks {
            let gamma = self.register.keystream(&self.cipher);
            let result = add_xor(&gamma, block);
            let feedback = if encrypting { &result[..] } else { block };
            self.register.push(feedback);
            out.extend_from_slice(&result);
        }

        let tail = blocks.remainder();
        if !tail.is_empty() {
            let gamma = self.register.keystream(&self.cipher);
            out.extend_from_slice(&add_xor(&gamma, tail));
            self.finalized = true;
        }
        Ok(out)
    }

    /// Last block fed back into the register.
    pub fn iv(&self) -> Result<Vec<u8>, GostCipherError> {
        ensure_live(&self.cipher)?;
        Ok(self.register.tail().to_vec())
    }

    /// Block size of the wrapped cipher in bytes.
    pub fn block_size(&self) -> usize {
        self.cipher.block_size()
    }

    /// Returns `true` once a partial block has ended the message.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Zeroizes the round keys and the feedback register.
    pub fn clear(&mut self) {
        self.cipher.clear();
        self.register.clear();
    }

    /// Returns `true` once the wrapped cipher has been cleared.
    pub fn is_cleared(&self) -> bool {
        self.cipher.is_cleared()
    }
}

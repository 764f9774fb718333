//! Counter mode.

use zeroize::Zeroizing;

use super::ensure_live;
use crate::block::BlockCipher;
use crate::error::GostCipherError;
use crate::utils::bytes::{add_xor, increment_be, zero_fill};

/// CTR over any [`BlockCipher`].
///
/// The counter block is the nonce (half a block) followed by a big-endian
/// block counter starting at zero. The counter half advances after every
/// block, partial blocks included, and wraps without touching the nonce.
/// Encryption and decryption are the same operation.
#[derive(Debug)]
pub struct Ctr<C: BlockCipher> {
    cipher: C,
    counter: Zeroizing<Vec<u8>>,
}

impl<C: BlockCipher> Ctr<C> {
    /// Wraps `cipher` in CTR mode.
    ///
    /// # Errors
    /// Returns [`GostCipherError::InvalidIvSize`] unless `nonce` is exactly
    /// half the block size.
    pub fn new(cipher: C, nonce: &[u8]) -> Result<Self, GostCipherError> {
        let bs = cipher.block_size();
        if nonce.len() != bs / 2 {
            log::debug!("rejected CTR nonce of {} bytes", nonce.len());
            return Err(GostCipherError::InvalidIvSize);
        }
        let mut counter = Zeroizing::new(vec![0u8; bs]);
        counter[..bs / 2].copy_from_slice(nonce);
        Ok(Ctr { cipher, counter })
    }

    /// XORs `data` with the counter keystream.
    pub fn encrypt(&mut self, data: &[u8]) -> Result<Vec<u8>, GostCipherError> {
        ensure_live(&self.cipher)?;
        let bs = self.block_size();
        let mut out = Vec::with_capacity(data.len());
        for block in data.chunks(bs) {
            let mut gamma = Zeroizing::new(self.counter.to_vec());
            self.cipher.encrypt_block(&mut gamma);
            out.extend_from_slice(&add_xor(block, &gamma));
            increment_be(&mut self.counter[bs / 2..]);
        }
        Ok(out)
    }

    /// Identical to [`encrypt`](Ctr::encrypt).
    pub fn decrypt(&mut self, data: &[u8]) -> Result<Vec<u8>, GostCipherError> {
        self.encrypt(data)
    }

    /// Current counter block: nonce followed by the block counter.
    pub fn counter(&self) -> Result<Vec<u8>, GostCipherError> {
        ensure_live(&self.cipher)?;
        Ok(self.counter.to_vec())
    }

    /// Block size of the wrapped cipher in bytes.
    pub fn block_size(&self) -> usize {
        self.cipher.block_size()
    }

    /// Zeroizes the round keys and the counter block.
    pub fn clear(&mut self) {
        self.cipher.clear();
        zero_fill(&mut self.counter);
    }

    /// Returns `true` once the wrapped cipher has been cleared.
    pub fn is_cleared(&self) -> bool {
        self.cipher.is_cleared()
    }
}

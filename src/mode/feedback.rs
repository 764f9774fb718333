//! Feedback shift register shared by CBC, CFB and OFB.
//!
//! The register holds `m = z * n` bytes. Its leading `n` bytes feed the
//! cipher; after each full block the register shifts left by `n` and the
//! new block enters at the tail.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::block::BlockCipher;
use crate::error::GostCipherError;
use crate::utils::bytes::zero_fill;

#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct FeedbackRegister {
    register: Vec<u8>,
    #[zeroize(skip)]
    block_size: usize,
}

impl FeedbackRegister {
    /// Loads the register from an initialization vector.
    ///
    /// # Errors
    /// Returns [`GostCipherError::InvalidIvSize`] unless `init_vect` is a
    /// non-empty multiple of `block_size`.
    pub(crate) fn new(init_vect: &[u8], block_size: usize) -> Result<Self, GostCipherError> {
        if init_vect.len() < block_size || init_vect.len() % block_size != 0 {
            log::debug!(
                "rejected IV of {} bytes for {}-byte blocks",
                init_vect.len(),
                block_size
            );
            return Err(GostCipherError::InvalidIvSize);
        }
        Ok(FeedbackRegister {
            register: init_vect.to_vec(),
            block_size,
        })
    }

    /// Leading block: the next cipher input.
    pub(crate) fn head(&self) -> &[u8] {
        &self.register[..self.block_size]
    }

    /// Most recently pushed block.
    pub(crate) fn tail(&self) -> &[u8] {
        &self.register[self.register.len() - self.block_size..]
    }

    /// Encrypted head, used as the gamma in CFB and OFB.
    pub(crate) fn keystream<C: BlockCipher>(&self, cipher: &C) -> Zeroizing<Vec<u8>> {
        let mut gamma = Zeroizing::new(self.head().to_vec());
        cipher.encrypt_block(&mut gamma);
        gamma
    }

    /// Shifts the register by one block and appends `block`.
    pub(crate) fn push(&mut self, block: &[u8]) {
        let len = self.register.len();
        self.register.rotate_left(self.block_size);
        self.register[len - self.block_size..].copy_from_slice(block);
    }

    /// Overwrites the register contents with zeros.
    pub(crate) fn clear(&mut self) {
        zero_fill(&mut self.register);
    }
}

impl fmt::Debug for FeedbackRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedbackRegister")
            .field("len", &self.register.len())
            .field("block_size", &self.block_size)
            .finish()
    }
}

//! Message authentication code (OMAC1 / CMAC) from GOST R 34.13-2015.
//!
//! Subkeys: `R = E(0^n)`, `K1 = R * x`, `K2 = K1 * x` in GF(2^n). Input is
//! chained block by block, holding back the last block so finalization can
//! pick `K1` (full block) or `K2` (padded block).

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::ensure_live;
use super::padding::{PadMode, PaddingScheme};
use crate::block::BlockCipher;
use crate::error::GostCipherError;
use crate::utils::bits::gf_double;
use crate::utils::bytes::{xor_in_place, zero_fill};

/// Running chaining value plus the held-back tail of the message.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
struct MacState {
    chain: Vec<u8>,
    pending: Vec<u8>,
}

/// Streaming MAC over any [`BlockCipher`].
///
/// # Examples
/// ```
/// use gostcipher::block::Kuznechik;
/// use gostcipher::mode::Mac;
///
/// let mut mac = Mac::new(Kuznechik::new(&[0x11u8; 32]).unwrap());
/// mac.update(b"part one, ").unwrap();
/// mac.update(b"part two").unwrap();
/// let tag = mac.digest(8).unwrap();
/// assert_eq!(tag.len(), 8);
/// ```
pub struct Mac<C: BlockCipher> {
    cipher: C,
    key_1: Zeroizing<Vec<u8>>,
    key_2: Zeroizing<Vec<u8>>,
    state: MacState,
}

impl<C: BlockCipher> Mac<C> {
    /// Derives the two subkeys and starts an empty message.
    pub fn new(cipher: C) -> Self {
        let bs = cipher.block_size();
        let mut key_1 = Zeroizing::new(vec![0u8; bs]);
        cipher.encrypt_block(&mut key_1);
        gf_double(&mut key_1);
        let mut key_2 = key_1.clone();
        gf_double(&mut key_2);

        Mac {
            cipher,
            key_1,
            key_2,
            state: MacState {
                chain: vec![0u8; bs],
                pending: Vec::with_capacity(bs),
            },
        }
    }

    /// Appends `data` to the message.
    ///
    /// Splitting a message across any number of calls yields the same tag
    /// as a single call.
    pub fn update(&mut self, data: &[u8]) -> Result<(), GostCipherError> {
        ensure_live(&self.cipher)?;
        let bs = self.block_size();
        let mut rest = data;
        while !rest.is_empty() {
            if self.state.pending.len() == bs {
                xor_in_place(&mut self.state.chain, &self.state.pending);
                self.cipher.encrypt_block(&mut self.state.chain);
                zero_fill(&mut self.state.pending);
                self.state.pending.clear();
            }
            let take = (bs - self.state.pending.len()).min(rest.len());
            self.state.pending.extend_from_slice(&rest[..take]);
            rest = &rest[take..];
        }
        Ok(())
    }

    /// Returns the first `size` bytes of the tag for the message so far.
    ///
    /// The running state is left untouched, so more data may follow.
    ///
    /// # Errors
    /// Returns [`GostCipherError::InvalidMacSize`] if `size` exceeds the
    /// block size.
    pub fn digest(&self, size: usize) -> Result<Vec<u8>, GostCipherError> {
        ensure_live(&self.cipher)?;
        let bs = self.block_size();
        if size > bs {
            log::debug!("rejected MAC size {} for {}-byte blocks", size, bs);
            return Err(GostCipherError::InvalidMacSize);
        }

        let mut state = self.state.clone();
        let (last, subkey) = if state.pending.len() == bs {
            (Zeroizing::new(state.pending.clone()), &self.key_1)
        } else {
            (PadMode::Mac.pad(&state.pending, bs), &self.key_2)
        };
        xor_in_place(&mut state.chain, &last);
        xor_in_place(&mut state.chain, subkey);
        self.cipher.encrypt_block(&mut state.chain);
        Ok(state.chain[..size].to_vec())
    }

    /// Lowercase hex form of [`digest`](Mac::digest).
    pub fn hexdigest(&self, size: usize) -> Result<String, GostCipherError> {
        self.digest(size).map(hex::encode)
    }

    /// Block size of the wrapped cipher in bytes.
    pub fn block_size(&self) -> usize {
        self.cipher.block_size()
    }

    /// Zeroizes the round keys, the subkeys and the running state.
    pub fn clear(&mut self) {
        self.cipher.clear();
        zero_fill(&mut self.key_1);
        zero_fill(&mut self.key_2);
        zero_fill(&mut self.state.chain);
        zero_fill(&mut self.state.pending);
    }

    /// Returns `true` once the wrapped cipher has been cleared.
    pub fn is_cleared(&self) -> bool {
        self.cipher.is_cleared()
    }
}

impl<C: BlockCipher> fmt::Debug for Mac<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mac")
            .field("block_size", &self.block_size())
            .field("pending", &self.state.pending.len())
            .finish_non_exhaustive()
    }
}

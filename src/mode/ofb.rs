//! Output feedback mode.

use super::ensure_live;
use super::feedback::FeedbackRegister;
use crate::block::BlockCipher;
use crate::error::GostCipherError;
use crate::utils::bytes::add_xor;

/// OFB over any [`BlockCipher`].
///
/// Each gamma block is fed back into the register, so encryption and
/// decryption are the same operation. A trailing partial block ends the
/// message as in [`Cfb`](super::Cfb).
#[derive(Debug)]
pub struct Ofb<C: BlockCipher> {
    cipher: C,
    register: FeedbackRegister,
    finalized: bool,
}

impl<C: BlockCipher> Ofb<C> {
    /// Wraps `cipher` in OFB mode.
    ///
    /// # Errors
    /// Returns [`GostCipherError::InvalidIvSize`] unless `init_vect` is a
    /// non-empty multiple of the block size.
    pub fn new(cipher: C, init_vect: &[u8]) -> Result<Self, GostCipherError> {
        let register = FeedbackRegister::new(init_vect, cipher.block_size())?;
        Ok(Ofb {
            cipher,
            register,
            finalized: false,
        })
    }

    /// XORs `data` with the output feedback keystream.
    ///
    /// # Errors
    /// - [`GostCipherError::StreamFinalized`] after a partial block.
    /// - [`GostCipherError::Cleared`] after [`clear`](Ofb::clear).
    pub fn encrypt(&mut self, data: &[u8]) -> Result<Vec<u8>, GostCipherError> {
        ensure_live(&self.cipher)?;
        if self.finalized {
            return Err(GostCipherError::StreamFinalized);
        }

        let bs = self.block_size();
        let mut out = Vec::with_capacity(data.len());
        for block in data.chunks(bs) {
            let gamma = self.register.keystream(&self.cipher);
            out.extend_from_slice(&add_xor(&gamma, block));
            if block.len() == bs {
                self.register.push(&gamma);
            } else {
                self.finalized = true;
            }
        }
        Ok(out)
    }

    /// Identical to [`encrypt`](Ofb::encrypt).
    pub fn decrypt(&mut self, data: &[u8]) -> Result<Vec<u8>, GostCipherError> {
        self.encrypt(data)
    }

    /// Last gamma block fed back into the register.
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Magma;

    const KEY: &str = "ffeeddccbbaa99887766554433221100f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff";
    const IV: &str = "1234567890abcdef234567890abcdef1";
    const PLAIN: &str = "92def06b3c130a59db54c704f8189d204a98fb2e67a8024c8912409b17b57e41";
    const CIPHER: &str = "db37e0e266903c830d46644c1f9a089ca0f83062430e327ec824efb8bd4fdb05";

    fn ofb() -> Ofb<Magma> {
        let cipher = Magma::new(&hex::decode(KEY).unwrap()).unwrap();
        Ofb::new(cipher, &hex::decode(IV).unwrap()).unwrap()
    }

    #[test]
    fn test_encrypt_known_answer() {
        let ct = ofb().encrypt(&hex::decode(PLAIN).unwrap()).unwrap();
        assert_eq!(hex::encode(ct), CIPHER);
    }

    #[test]
    fn test_decrypt_is_encrypt() {
        let pt = ofb().decrypt(&hex::decode(CIPHER).unwrap()).unwrap();
        assert_eq!(hex::encode(pt), PLAIN);
    }

    #[test]
    fn test_streaming_across_calls() {
        let plain = hex::decode(PLAIN).unwrap();
        let mut ofb = ofb();
        let mut ct = ofb.encrypt(&plain[..16]).unwrap();
        ct.extend(ofb.encrypt(&plain[16..]).unwrap());
        assert_eq!(hex::encode(ct), CIPHER);
    }

    #[test]
    fn test_partial_tail_finalizes() {
        let plain = hex::decode(PLAIN).unwrap();
        let mut ofb = ofb();
        let ct = ofb.encrypt(&plain[..29]).unwrap();
        assert_eq!(hex::encode(ct), &CIPHER[..58]);
        assert!(ofb.is_finalized());
        assert_eq!(ofb.encrypt(&plain), Err(GostCipherError::StreamFinalized));
    }

    #[test]
    fn test_clear() {
        let mut ofb = ofb();
        ofb.clear();
        assert!(ofb.is_cleared());
        assert_eq!(ofb.iv(), Err(GostCipherError::Cleared));
        assert_eq!(ofb.decrypt(&[1, 2, 3]), Err(GostCipherError::Cleared));
    }
}

//! Cipher block chaining mode.

use super::feedback::FeedbackRegister;
use super::padding::{PadMode, PaddingScheme};
use super::{check_aligned, check_block_padding, ensure_live};
use crate::block::BlockCipher;
use crate::error::GostCipherError;
use crate::utils::bytes::xor_in_place;

/// CBC over any [`BlockCipher`], with a feedback register of `z` blocks.
///
/// With `z > 1` the register interleaves `z` independent chains, as
/// GOST R 34.13-2015 allows.
#[derive(Debug)]
pub struct Cbc<C: BlockCipher> {
    cipher: C,
    register: FeedbackRegister,
    pad_mode: PadMode,
}

impl<C: BlockCipher> Cbc<C> {
    /// Wraps `cipher` in CBC mode.
    ///
    /// # Errors
    /// - [`GostCipherError::InvalidIvSize`] unless `init_vect` is a
    ///   non-empty multiple of the block size.
    /// - [`GostCipherError::InvalidPaddingMode`] for [`PadMode::Mac`].
    pub fn new(cipher: C, init_vect: &[u8], pad_mode: PadMode) -> Result<Self, GostCipherError> {
        check_block_padding(pad_mode)?;
        let register = FeedbackRegister::new(init_vect, cipher.block_size())?;
        Ok(Cbc {
            cipher,
            register,
            pad_mode,
        })
    }

    /// Pads and encrypts `data`, advancing the register by one ciphertext
    /// block per block.
    pub fn encrypt(&mut self, data: &[u8]) -> Result<Vec<u8>, GostCipherError> {
        ensure_live(&self.cipher)?;
        let bs = self.block_size();
        let mut out = self.pad_mode.pad(data, bs).to_vec();
        for block in out.chunks_exact_mut(bs) {
            xor_in_place(block, self.register.head());
            self.cipher.encrypt_block(block);
            self.register.push(block);
        }
        Ok(out)
    }

    /// Decrypts a block-aligned ciphertext. Padding is not removed.
    ///
    /// # Errors
    /// Returns [`GostCipherError::InvalidCiphertextLength`] if `data` is not
    /// a multiple of the block size.
    pub fn decrypt(&mut self, data: &[u8]) -> Result<Vec<u8>, GostCipherError> {
        ensure_live(&self.cipher)?;
        let bs = self.block_size();
        check_aligned(data.len(), bs)?;
        let mut out = data.to_vec();
        for (block, ciphertext) in out.chunks_exact_mut(bs).zip(data.chunks_exact(bs)) {
            self.cipher.decrypt_block(block);
            xor_in_place(block, self.register.head());
            self.register.push(ciphertext);
        }
        Ok(out)
    }

    /// Last ciphertext block pushed into the register (the IV before any
    /// data has been processed).
    pub fn iv(&self) -> Result<Vec<u8>, GostCipherError> {
        ensure_live(&self.cipher)?;
        Ok(self.register.tail().to_vec())
    }

    /// Block size of the wrapped cipher in bytes.
    pub fn block_size(&self) -> usize {
        self.cipher.block_size()
    }

    /// Padding procedure applied by `encrypt`.
    pub fn pad_mode(&self) -> PadMode {
        self.pad_mode
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
    const IV: &str = "1234567890abcdef234567890abcdef134567890abcdef12";
    const PLAIN: &str = "92def06b3c130a59db54c704f8189d204a98fb2e67a8024c8912409b17b57e41";
    const CIPHER: &str = "96d1b05eea683919aff76129abb937b95058b4a1c4bc001920b78b1a7cd7e667";

    fn cbc() -> Cbc<Magma> {
        let cipher = Magma::new(&hex::decode(KEY).unwrap()).unwrap();
        Cbc::new(cipher, &hex::decode(IV).unwrap(), PadMode::Zero).unwrap()
    }

    #[test]
    fn test_encrypt_known_answer() {
        let mut cbc = cbc();
        let ct = cbc.encrypt(&hex::decode(PLAIN).unwrap()).unwrap();
        assert_eq!(hex::encode(ct), CIPHER);
    }

    #[test]
    fn test_decrypt_known_answer() {
        let mut cbc = cbc();
        let pt = cbc.decrypt(&hex::decode(CIPHER).unwrap()).unwrap();
        assert_eq!(hex::encode(pt), PLAIN);
    }

    #[test]
    fn test_chaining_continues_across_calls() {
        let plain = hex::decode(PLAIN).unwrap();
        let mut cbc = cbc();
        let mut ct = cbc.encrypt(&plain[..8]).unwrap();
        ct.extend(cbc.encrypt(&plain[8..]).unwrap());
        assert_eq!(hex::encode(ct), CIPHER);
    }

    #[test]
    fn test_iv_tracks_last_ciphertext_block() {
        let mut cbc = cbc();
        assert_eq!(hex::encode(cbc.iv().unwrap()), "34567890abcdef12");
        cbc.encrypt(&hex::decode(PLAIN).unwrap()).unwrap();
        assert_eq!(hex::encode(cbc.iv().unwrap()), &CIPHER[48..]);
    }

    #[test]
    fn test_rejects_bad_iv() {
        let cipher = Magma::new(&hex::decode(KEY).unwrap()).unwrap();
        assert_eq!(
            Cbc::new(cipher, &[0u8; 12], PadMode::Zero).err(),
            Some(GostCipherError::InvalidIvSize)
        );
    }

    #[test]
    fn test_clear_wipes_register() {
        let mut cbc = cbc();
        cbc.clear();
        assert_eq!(cbc.register.tail(), &[0u8; 8]);
        assert_eq!(cbc.iv(), Err(GostCipherError::Cleared));
        assert_eq!(cbc.encrypt(&[0u8; 8]), Err(GostCipherError::Cleared));
    }
}

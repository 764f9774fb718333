//! Electronic codebook mode.

use super::padding::{PadMode, PaddingScheme};
use super::{check_aligned, check_block_padding, ensure_live};
use crate::block::BlockCipher;
use crate::error::GostCipherError;

/// ECB over any [`BlockCipher`].
///
/// Every block is transformed independently. Encryption pads with the
/// selected procedure; decryption leaves the padding in place.
#[derive(Debug)]
pub struct Ecb<C: BlockCipher> {
    cipher: C,
    pad_mode: PadMode,
}

impl<C: BlockCipher> Ecb<C> {
    /// Wraps `cipher` in ECB mode.
    ///
    /// # Errors
    /// Returns [`GostCipherError::InvalidPaddingMode`] for [`PadMode::Mac`].
    pub fn new(cipher: C, pad_mode: PadMode) -> Result<Self, GostCipherError> {
        check_block_padding(pad_mode)?;
        Ok(Ecb { cipher, pad_mode })
    }

    /// Pads `data` and encrypts every block.
    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, GostCipherError> {
        ensure_live(&self.cipher)?;
        let mut out = self.pad_mode.pad(data, self.block_size()).to_vec();
        for block in out.chunks_exact_mut(self.cipher.block_size()) {
            self.cipher.encrypt_block(block);
        }
        Ok(out)
    }

    /// Decrypts every block of a block-aligned ciphertext.
    ///
    /// # Errors
    /// Returns [`GostCipherError::InvalidCiphertextLength`] if `data` is not
    /// a multiple of the block size.
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, GostCipherError> {
        ensure_live(&self.cipher)?;
        check_aligned(data.len(), self.block_size())?;
        let mut out = data.to_vec();
        for block in out.chunks_exact_mut(self.cipher.block_size()) {
            self.cipher.decrypt_block(block);
        }
        Ok(out)
    }

    /// Block size of the wrapped cipher in bytes.
    pub fn block_size(&self) -> usize {
        self.cipher.block_size()
    }

    /// Padding procedure applied by `encrypt`.
    pub fn pad_mode(&self) -> PadMode {
        self.pad_mode
    }

    /// Zeroizes the round keys. Later calls fail with
    /// [`GostCipherError::Cleared`].
    pub fn clear(&mut self) {
        self.cipher.clear();
    }

    /// Returns `true` once the wrapped cipher has been cleared.
    pub fn is_cleared(&self) -> bool {
        self.cipher.is_cleared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Kuznechik, Magma};

    const KEY: &str = "ffeeddccbbaa99887766554433221100f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff";

    fn ecb(pad_mode: PadMode) -> Ecb<Magma> {
        Ecb::new(Magma::new(&hex::decode(KEY).unwrap()).unwrap(), pad_mode).unwrap()
    }

    #[test]
    fn test_rejects_mac_padding() {
        let cipher = Magma::new(&hex::decode(KEY).unwrap()).unwrap();
        assert_eq!(
            Ecb::new(cipher, PadMode::Mac).err(),
            Some(GostCipherError::InvalidPaddingMode)
        );
    }

    #[test]
    fn test_single_block() {
        let ecb = ecb(PadMode::Zero);
        let ct = ecb.encrypt(&hex::decode("fedcba9876543210").unwrap()).unwrap();
        assert_eq!(hex::encode(&ct), "4ee901e5c2d8ca3d");
        assert_eq!(hex::encode(ecb.decrypt(&ct).unwrap()), "fedcba9876543210");
    }

    #[test]
    fn test_zero_padding_extends_short_input() {
        let ecb = ecb(PadMode::Zero);
        let ct = ecb.encrypt(&[1, 2, 3]).unwrap();
        assert_eq!(ct.len(), 8);
        assert_eq!(ecb.decrypt(&ct).unwrap(), vec![1, 2, 3, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_decrypt_rejects_misaligned() {
        let ecb = ecb(PadMode::Zero);
        assert_eq!(
            ecb.decrypt(&[0u8; 9]),
            Err(GostCipherError::InvalidCiphertextLength)
        );
    }

    #[test]
    fn test_cleared() {
        let mut ecb = ecb(PadMode::Iso7816);
        ecb.clear();
        assert!(ecb.is_cleared());
        assert_eq!(ecb.encrypt(&[0u8; 8]), Err(GostCipherError::Cleared));
        assert_eq!(ecb.decrypt(&[0u8; 8]), Err(GostCipherError::Cleared));
    }

    #[test]
    fn test_zeroized_cipher_is_refused() {
        use zeroize::Zeroize;

        let mut cipher = Kuznechik::new(&[0x5au8; 32]).unwrap();
        cipher.zeroize();
        let ecb = Ecb::new(cipher, PadMode::Zero).unwrap();
        assert!(ecb.is_cleared());
        assert_eq!(ecb.encrypt(&[0u8; 16]), Err(GostCipherError::Cleared));
        assert_eq!(ecb.decrypt(&[0u8; 16]), Err(GostCipherError::Cleared));
    }
}

//! Error types for the gostcipher library.

use std::fmt;

/// Errors produced by the gostcipher library.
///
/// Every variant is a local validation failure. None of them carry key,
/// IV or message bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GostCipherError {
    /// Cipher algorithm name is not `kuznechik` or `magma`.
    UnsupportedAlgorithm,
    /// Mode code is unknown, or the operation is not available in this mode.
    UnsupportedMode,
    /// Key is not exactly 32 bytes long.
    InvalidKeySize,
    /// Initialization vector length does not fit the selected mode.
    InvalidIvSize,
    /// Padding mode is unknown or not allowed for the selected mode.
    InvalidPaddingMode,
    /// Ciphertext length is not a multiple of the block size.
    InvalidCiphertextLength,
    /// Requested MAC length exceeds the cipher block size.
    InvalidMacSize,
    /// A trailing partial block already ended this message.
    StreamFinalized,
    /// The instance was cleared and no longer holds key material.
    Cleared,
    /// Object identifier is malformed.
    InvalidOid,
}

impl fmt::Display for GostCipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GostCipherError::UnsupportedAlgorithm => {
                write!(f, "unsupported cipher algorithm")
            }
            GostCipherError::UnsupportedMode => write!(f, "unsupported cipher mode"),
            GostCipherError::InvalidKeySize => write!(f, "invalid key size"),
            GostCipherError::InvalidIvSize => {
                write!(f, "invalid initialization vector size")
            }
            GostCipherError::InvalidPaddingMode => write!(f, "invalid padding mode"),
            GostCipherError::InvalidCiphertextLength => {
                write!(
                    f,
                    "ciphertext length is not a multiple of the block size"
                )
            }
            GostCipherError::InvalidMacSize => {
                write!(f, "invalid message authentication code size")
            }
            GostCipherError::StreamFinalized => {
                write!(f, "message already ended with a partial block")
            }
            GostCipherError::Cleared => write!(f, "cipher object has been cleared"),
            GostCipherError::InvalidOid => write!(f, "invalid OID value"),
        }
    }
}

impl std::error::Error for GostCipherError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_key_size() {
        let err = GostCipherError::InvalidKeySize;
        assert_eq!(format!("{}", err), "invalid key size");
    }

    #[test]
    fn test_display_unsupported_algorithm() {
        let err = GostCipherError::UnsupportedAlgorithm;
        assert_eq!(format!("{}", err), "unsupported cipher algorithm");
    }

    #[test]
    fn test_display_invalid_mac_size() {
        let err = GostCipherError::InvalidMacSize;
        assert_eq!(
            format!("{}", err),
            "invalid message authentication code size"
        );
    }

    #[test]
    fn test_display_invalid_iv_size() {
        let err = GostCipherError::InvalidIvSize;
        assert_eq!(format!("{}", err), "invalid initialization vector size");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(GostCipherError::Cleared, GostCipherError::Cleared);
        assert_ne!(
            GostCipherError::InvalidKeySize,
            GostCipherError::InvalidIvSize
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&GostCipherError::InvalidPaddingMode);
    }
}

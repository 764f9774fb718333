//! GOST R 34.13-2015 modes of operation.
//!
//! Each mode owns its [`BlockCipher`] and its chaining state. The chaining
//! modes compose a private feedback register; the block modes compose a
//! [`PaddingScheme`].

mod cbc;
mod cfb;
mod ctr;
mod ecb;
mod feedback;
mod mac;
mod ofb;
pub mod padding;

use std::fmt;

use crate::block::BlockCipher;
use crate::error::GostCipherError;

pub use cbc::Cbc;
pub use cfb::Cfb;
pub use ctr::Ctr;
pub use ecb::Ecb;
pub use mac::Mac;
pub use ofb::Ofb;
pub use padding::{PadMode, PaddingScheme};

/// Numeric code of electronic codebook mode.
pub const MODE_ECB: u8 = 0x01;
/// Numeric code of cipher block chaining mode.
pub const MODE_CBC: u8 = 0x02;
/// Numeric code of cipher feedback mode.
pub const MODE_CFB: u8 = 0x03;
/// Numeric code of output feedback mode.
pub const MODE_OFB: u8 = 0x05;
/// Numeric code of counter mode.
pub const MODE_CTR: u8 = 0x06;
/// Numeric code of message authentication mode.
pub const MODE_MAC: u8 = 0xff;

/// Mode of operation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Electronic codebook.
    Ecb,
    /// Cipher block chaining.
    Cbc,
    /// Cipher feedback.
    Cfb,
    /// Output feedback.
    Ofb,
    /// Counter.
    Ctr,
    /// Message authentication code.
    Mac,
}

impl Mode {
    /// Numeric code of the mode.
    pub fn code(&self) -> u8 {
        match self {
            Mode::Ecb => MODE_ECB,
            Mode::Cbc => MODE_CBC,
            Mode::Cfb => MODE_CFB,
            Mode::Ofb => MODE_OFB,
            Mode::Ctr => MODE_CTR,
            Mode::Mac => MODE_MAC,
        }
    }

    /// Padding applied when none is requested.
    pub fn default_pad_mode(&self) -> PadMode {
        match self {
            Mode::Mac => PadMode::Mac,
            _ => PadMode::Zero,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Ecb => "ECB",
            Mode::Cbc => "CBC",
            Mode::Cfb => "CFB",
            Mode::Ofb => "OFB",
            Mode::Ctr => "CTR",
            Mode::Mac => "MAC",
        };
        f.write_str(name)
    }
}

impl TryFrom<u8> for Mode {
    type Error = GostCipherError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            MODE_ECB => Ok(Mode::Ecb),
            MODE_CBC => Ok(Mode::Cbc),
            MODE_CFB => Ok(Mode::Cfb),
            MODE_OFB => Ok(Mode::Ofb),
            MODE_CTR => Ok(Mode::Ctr),
            MODE_MAC => Ok(Mode::Mac),
            _ => Err(GostCipherError::UnsupportedMode),
        }
    }
}

// ──────── Shared checks ────────

pub(crate) fn ensure_live<C: BlockCipher>(cipher: &C) -> Result<(), GostCipherError> {
    if cipher.is_cleared() {
        return Err(GostCipherError::Cleared);
    }
    Ok(())
}

pub(crate) fn check_aligned(len: usize, block_size: usize) -> Result<(), GostCipherError> {
    if len % block_size != 0 {
        log::debug!(
            "rejected ciphertext of {} bytes for {}-byte blocks",
            len,
            block_size
        );
        return Err(GostCipherError::InvalidCiphertextLength);
    }
    Ok(())
}

/// ECB and CBC accept padding procedures 1 and 2 only.
pub(crate) fn check_block_padding(pad_mode: PadMode) -> Result<(), GostCipherError> {
    match pad_mode {
        PadMode::Zero | PadMode::Iso7816 => Ok(()),
        PadMode::Mac => {
            log::debug!("rejected padding {:?} for a block mode", pad_mode);
            Err(GostCipherError::InvalidPaddingMode)
        }
    }
}

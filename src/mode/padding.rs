//! Padding procedures from GOST R 34.13-2015.
//!
//! | Code         | Variant              | Rule                                   |
//! |--------------|----------------------|----------------------------------------|
//! | `0x800000f0` | [`PadMode::Zero`]    | zeros up to the block boundary         |
//! | `0x800000f1` | [`PadMode::Iso7816`] | `0x80`, then zeros through one extra block |
//! | `0x800000f2` | [`PadMode::Mac`]     | `0x80` and zeros, only when unaligned  |
//!
//! An empty input counts as one short block for every scheme.

use zeroize::Zeroizing;

use crate::error::GostCipherError;

/// Numeric code of padding procedure 1.
pub const PAD_MODE_1: u32 = 0x8000_00f0;

/// Numeric code of padding procedure 2.
pub const PAD_MODE_2: u32 = 0x8000_00f1;

/// Numeric code of padding procedure 3.
pub const PAD_MODE_3: u32 = 0x8000_00f2;

/// Padding marker byte for procedures 2 and 3.
const PAD_MARKER: u8 = 0x80;

/// Extends a message to a whole number of cipher blocks.
pub trait PaddingScheme {
    /// Returns the padded copy of `data` for blocks of `block_size` bytes.
    fn pad(&self, data: &[u8], block_size: usize) -> Zeroizing<Vec<u8>>;
}

/// Padding procedure selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadMode {
    /// Procedure 1: zero-fill to the block boundary.
    Zero,
    /// Procedure 2: `0x80` marker, then zeros through one extra block.
    Iso7816,
    /// Procedure 3: `0x80` marker and zero-fill, skipped for aligned input.
    Mac,
}

impl PadMode {
    /// Numeric code of the procedure.
    pub fn code(&self) -> u32 {
        match self {
            PadMode::Zero => PAD_MODE_1,
            PadMode::Iso7816 => PAD_MODE_2,
            PadMode::Mac => PAD_MODE_3,
        }
    }
}

impl TryFrom<u32> for PadMode {
    type Error = GostCipherError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            PAD_MODE_1 => Ok(PadMode::Zero),
            PAD_MODE_2 => Ok(PadMode::Iso7816),
            PAD_MODE_3 => Ok(PadMode::Mac),
            _ => Err(GostCipherError::InvalidPaddingMode),
        }
    }
}

impl PaddingScheme for PadMode {
    fn pad(&self, data: &[u8], block_size: usize) -> Zeroizing<Vec<u8>> {
        let fill = pad_size(data.len(), block_size);
        let extra = match self {
            PadMode::Zero | PadMode::Mac => fill,
            PadMode::Iso7816 => fill + block_size,
        };

        let mut padded = Zeroizing::new(Vec::with_capacity(data.len() + extra));
        padded.extend_from_slice(data);
        match self {
            PadMode::Zero => padded.resize(data.len() + extra, 0),
            PadMode::Iso7816 | PadMode::Mac if extra > 0 => {
                padded.push(PAD_MARKER);
                padded.resize(data.len() + extra, 0);
            }
            _ => {}
        }
        padded
    }
}

/// Bytes needed to reach the next block boundary.
///
/// Empty input needs a full block.
fn pad_size(len: usize, block_size: usize) -> usize {
    if len < block_size {
        block_size - len
    } else {
        (block_size - len % block_size) % block_size
    }
}

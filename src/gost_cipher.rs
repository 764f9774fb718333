//! GostCipher: runtime-selected cipher and mode behind one object.
//!
//! [`new`] validates the requested combination, expands the key, wraps the
//! cipher in the requested mode and returns a [`GostCipher`]. Operations a
//! mode does not support fail with [`GostCipherError::UnsupportedMode`].

use std::fmt;

use zeroize::Zeroizing;

use crate::block::{Algorithm, BlockCipher, Cipher};
use crate::error::GostCipherError;
use crate::mode::{Cbc, Cfb, Ctr, Ecb, Mac, Mode, Ofb, PadMode};
use crate::oid::ObjectIdentifier;

const KUZNECHIK_CTR_IV: [u8; 8] = [0x12, 0x34, 0x56, 0x78, 0x90, 0xab, 0xce, 0xf0];

const KUZNECHIK_IV: [u8; 32] = [
    0x12, 0x34, 0x56, 0x78, 0x90, 0xab, 0xce, 0xf0, 0xa1, 0xb2, 0xc3, 0xd4, 0xe5, 0xf0, 0x01, 0x12,
    0x23, 0x34, 0x45, 0x56, 0x67, 0x78, 0x89, 0x90, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19,
];

const MAGMA_CTR_IV: [u8; 4] = [0x12, 0x34, 0x56, 0x78];

const MAGMA_CBC_IV: [u8; 24] = [
    0x12, 0x34, 0x56, 0x78, 0x90, 0xab, 0xcd, 0xef, 0x23, 0x45, 0x67, 0x89, 0x0a, 0xbc, 0xde, 0xf1,
    0x34, 0x56, 0x78, 0x90, 0xab, 0xcd, 0xef, 0x12,
];

const MAGMA_IV: [u8; 16] = [
    0x12, 0x34, 0x56, 0x78, 0x90, 0xab, 0xcd, 0xef, 0x23, 0x45, 0x67, 0x89, 0x0a, 0xbc, 0xde, 0xf1,
];

/// Optional construction parameters.
///
/// # Examples
/// ```
/// use gostcipher::{ModeOptions, PadMode};
///
/// let options = ModeOptions::new()
///     .with_iv(vec![0u8; 16])
///     .with_pad_mode(PadMode::Iso7816);
/// assert_eq!(options.pad_mode, Some(PadMode::Iso7816));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ModeOptions {
    /// Initialization vector. CTR takes half a block; CBC, CFB and OFB take
    /// a non-empty multiple of the block size. ECB and MAC take none.
    pub init_vect: Option<Vec<u8>>,
    /// Padding procedure for ECB and CBC, or [`PadMode::Mac`] for MAC.
    pub pad_mode: Option<PadMode>,
    /// Initial message for MAC mode.
    pub data: Option<Vec<u8>>,
}

impl ModeOptions {
    /// Empty options: every field takes the per-mode default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initialization vector.
    ///
    /// # Parameters
    /// - `init_vect`: half a block for CTR, a non-empty multiple of the block
    ///   size for CBC, CFB and OFB.
    pub fn with_iv(mut self, init_vect: impl Into<Vec<u8>>) -> Self {
        self.init_vect = Some(init_vect.into());
        self
    }

    /// Sets the padding procedure.
    pub fn with_pad_mode(mut self, pad_mode: PadMode) -> Self {
        self.pad_mode = Some(pad_mode);
        self
    }

    /// Sets a message to feed into the MAC right after construction.
    pub fn with_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = Some(data.into());
        self
    }
}

impl fmt::Debug for ModeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeOptions")
            .field("init_vect", &self.init_vect.as_ref().map(Vec::len))
            .field("pad_mode", &self.pad_mode)
            .field("data", &self.data.as_ref().map(Vec::len))
            .finish()
    }
}

/// Default initialization vector for a cipher and mode, if the mode takes one.
pub fn default_iv(algorithm: Algorithm, mode: Mode) -> Option<&'static [u8]> {
    match (algorithm, mode) {
        (Algorithm::Kuznechik, Mode::Ctr) => Some(&KUZNECHIK_CTR_IV),
        (Algorithm::Kuznechik, Mode::Cbc | Mode::Cfb | Mode::Ofb) => Some(&KUZNECHIK_IV),
        (Algorithm::Magma, Mode::Ctr) => Some(&MAGMA_CTR_IV),
        (Algorithm::Magma, Mode::Cbc) => Some(&MAGMA_CBC_IV),
        (Algorithm::Magma, Mode::Cfb | Mode::Ofb) => Some(&MAGMA_IV),
        (_, Mode::Ecb | Mode::Mac) => None,
    }
}

enum Engine {
    Ecb(Ecb<Cipher>),
    Cbc(Cbc<Cipher>),
    Cfb(Cfb<Cipher>),
    Ofb(Ofb<Cipher>),
    Ctr(Ctr<Cipher>),
    Mac(Mac<Cipher>),
}

/// A block cipher bound to a mode of operation.
///
/// Built by [`new`]. Key material and chaining state are zeroized by
/// [`clear`](GostCipher::clear) and on drop.
pub struct GostCipher {
    algorithm: Algorithm,
    engine: Engine,
}

/// Builds a cipher object for `algorithm` in `mode`.
///
/// # Parameters
/// - `algorithm`: Kuznechik or Magma.
/// - `key`: 32-byte key.
/// - `mode`: mode of operation.
/// - `options`: IV, padding and initial MAC data; unset fields take the
///   per-mode defaults.
///
/// # Errors
/// - [`GostCipherError::InvalidKeySize`] if `key` is not 32 bytes.
/// - [`GostCipherError::InvalidIvSize`] if the IV does not fit the mode, or
///   an IV is given to ECB or MAC.
/// - [`GostCipherError::InvalidPaddingMode`] if the padding is not allowed
///   for the mode.
/// - [`GostCipherError::UnsupportedMode`] if `data` is given outside MAC.
///
/// # Examples
/// ```
/// use gostcipher::{Algorithm, Mode, ModeOptions};
///
/// let key = [0x5au8; 32];
/// let mut enc = gostcipher::new(Algorithm::Kuznechik, &key, Mode::Ctr, ModeOptions::new()).unwrap();
/// let mut dec = gostcipher::new(Algorithm::Kuznechik, &key, Mode::Ctr, ModeOptions::new()).unwrap();
///
/// let ct = enc.encrypt(b"attack at dawn").unwrap();
/// assert_eq!(dec.decrypt(&ct).unwrap(), b"attack at dawn");
/// ```
pub fn new(
    algorithm: Algorithm,
    key: &[u8],
    mode: Mode,
    options: ModeOptions,
) -> Result<GostCipher, GostCipherError> {
    let ModeOptions {
        init_vect,
        pad_mode,
        data,
    } = options;
    let init_vect = init_vect.map(Zeroizing::new);
    let data = data.map(Zeroizing::new);

    if data.is_some() && mode != Mode::Mac {
        log::debug!("initial data is only accepted in MAC mode, not {}", mode);
        return Err(GostCipherError::UnsupportedMode);
    }
    let pad_mode = check_pad_mode(mode, pad_mode)?;
    let init_vect = match (init_vect, default_iv(algorithm, mode)) {
        (Some(_), None) => {
            log::debug!("{} mode takes no initialization vector", mode);
            return Err(GostCipherError::InvalidIvSize);
        }
        (Some(iv), Some(_)) => iv,
        (None, default) => Zeroizing::new(default.map(<[u8]>::to_vec).unwrap_or_default()),
    };

    let cipher = algorithm.build(key).map_err(|err| {
        log::debug!("{} key rejected: {}", algorithm, err);
        err
    })?;

    let engine = match mode {
        Mode::Ecb => Engine::Ecb(Ecb::new(cipher, pad_mode)?),
        Mode::Cbc => Engine::Cbc(Cbc::new(cipher, &init_vect, pad_mode)?),
        Mode::Cfb => Engine::Cfb(Cfb::new(cipher, &init_vect)?),
        Mode::Ofb => Engine::Ofb(Ofb::new(cipher, &init_vect)?),
        Mode::Ctr => Engine::Ctr(Ctr::new(cipher, &init_vect)?),
        Mode::Mac => {
            let mut mac = Mac::new(cipher);
            if let Some(data) = data {
                mac.update(&data)?;
            }
            Engine::Mac(mac)
        }
    };

    log::debug!("constructed {} cipher in {} mode", algorithm, mode);
    Ok(GostCipher { algorithm, engine })
}

/// Resolves the padding for `mode`, falling back to its default.
fn check_pad_mode(mode: Mode, requested: Option<PadMode>) -> Result<PadMode, GostCipherError> {
    let Some(pad_mode) = requested else {
        return Ok(mode.default_pad_mode());
    };
    let allowed = match mode {
        Mode::Ecb | Mode::Cbc => pad_mode != PadMode::Mac,
        Mode::Mac => pad_mode == PadMode::Mac,
        Mode::Cfb | Mode::Ofb | Mode::Ctr => false,
    };
    if !allowed {
        log::debug!("padding {:?} is not allowed in {} mode", pad_mode, mode);
        return Err(GostCipherError::InvalidPaddingMode);
    }
    Ok(pad_mode)
}

impl GostCipher {
    /// Same as the free function [`new`].
    pub fn new(
        algorithm: Algorithm,
        key: &[u8],
        mode: Mode,
        options: ModeOptions,
    ) -> Result<Self, GostCipherError> {
        new(algorithm, key, mode, options)
    }

    // ──────── Encryption modes ────────

    /// Encrypts `data` (ECB, CBC, CFB, OFB, CTR).
    ///
    /// ECB and CBC pad the input first. CFB, OFB and CTR return exactly
    /// `data.len()` bytes.
    pub fn encrypt(&mut self, data: &[u8]) -> Result<Vec<u8>, GostCipherError> {
        match &mut self.engine {
            Engine::Ecb(m) => m.encrypt(data),
            Engine::Cbc(m) => m.encrypt(data),
            Engine::Cfb(m) => m.encrypt(data),
            Engine::Ofb(m) => m.encrypt(data),
            Engine::Ctr(m) => m.encrypt(data),
            Engine::Mac(_) => Err(unsupported("encrypt", Mode::Mac)),
        }
    }

    /// Decrypts `data` (ECB, CBC, CFB, OFB, CTR). Padding is not removed.
    ///
    /// # Errors
    /// ECB and CBC return [`GostCipherError::InvalidCiphertextLength`] for
    /// input that is not block-aligned.
    pub fn decrypt(&mut self, data: &[u8]) -> Result<Vec<u8>, GostCipherError> {
        match &mut self.engine {
            Engine::Ecb(m) => m.decrypt(data),
            Engine::Cbc(m) => m.decrypt(data),
            Engine::Cfb(m) => m.decrypt(data),
            Engine::Ofb(m) => m.decrypt(data),
            Engine::Ctr(m) => m.decrypt(data),
            Engine::Mac(_) => Err(unsupported("decrypt", Mode::Mac)),
        }
    }

    /// Current IV window: the last block fed back (CBC, CFB, OFB).
    pub fn iv(&self) -> Result<Vec<u8>, GostCipherError> {
        match &self.engine {
            Engine::Cbc(m) => m.iv(),
            Engine::Cfb(m) => m.iv(),
            Engine::Ofb(m) => m.iv(),
            _ => Err(unsupported("iv", self.mode())),
        }
    }

    /// Current counter block (CTR).
    pub fn counter(&self) -> Result<Vec<u8>, GostCipherError> {
        match &self.engine {
            Engine::Ctr(m) => m.counter(),
            _ => Err(unsupported("counter", self.mode())),
        }
    }

    // ──────── MAC mode ────────

    /// Appends `data` to the authenticated message.
    pub fn update(&mut self, data: &[u8]) -> Result<(), GostCipherError> {
        let mode = self.mode();
        match &mut self.engine {
            Engine::Mac(m) => m.update(data),
            _ => Err(unsupported("update", mode)),
        }
    }

    /// First `size` bytes of the tag over everything passed to `update`.
    ///
    /// # Errors
    /// Returns [`GostCipherError::InvalidMacSize`] if `size` exceeds the
    /// block size.
    pub fn digest(&self, size: usize) -> Result<Vec<u8>, GostCipherError> {
        match &self.engine {
            Engine::Mac(m) => m.digest(size),
            _ => Err(unsupported("digest", self.mode())),
        }
    }

    /// Lowercase hex form of [`digest`](GostCipher::digest).
    pub fn hexdigest(&self, size: usize) -> Result<String, GostCipherError> {
        match &self.engine {
            Engine::Mac(m) => m.hexdigest(size),
            _ => Err(unsupported("hexdigest", self.mode())),
        }
    }

    // ──────── Common ────────

    /// Cipher algorithm this object was built with.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Mode of operation this object was built with.
    pub fn mode(&self) -> Mode {
        match self.engine {
            Engine::Ecb(_) => Mode::Ecb,
            Engine::Cbc(_) => Mode::Cbc,
            Engine::Cfb(_) => Mode::Cfb,
            Engine::Ofb(_) => Mode::Ofb,
            Engine::Ctr(_) => Mode::Ctr,
            Engine::Mac(_) => Mode::Mac,
        }
    }

    /// Block size of the underlying cipher in bytes.
    ///
    /// # Returns
    /// 16 for Kuznechik, 8 for Magma.
    pub fn block_size(&self) -> usize {
        self.algorithm.block_size()
    }

    /// Object identifier of the underlying cipher.
    pub fn oid(&self) -> ObjectIdentifier {
        self.algorithm.oid()
    }

    /// Zeroizes round keys and chaining state.
    ///
    /// Every later operation fails with [`GostCipherError::Cleared`].
    pub fn clear(&mut self) {
        match &mut self.engine {
            Engine::Ecb(m) => m.clear(),
            Engine::Cbc(m) => m.clear(),
            Engine::Cfb(m) => m.clear(),
            Engine::Ofb(m) => m.clear(),
            Engine::Ctr(m) => m.clear(),
            Engine::Mac(m) => m.clear(),
        }
        log::debug!("cleared {} cipher in {} mode", self.algorithm, self.mode());
    }

    /// Returns `true` once [`clear`](GostCipher::clear) has run.
    pub fn is_cleared(&self) -> bool {
        match &self.engine {
            Engine::Ecb(m) => m.is_cleared(),
            Engine::Cbc(m) => m.is_cleared(),
            Engine::Cfb(m) => m.is_cleared(),
            Engine::Ofb(m) => m.is_cleared(),
            Engine::Ctr(m) => m.is_cleared(),
            Engine::Mac(m) => m.is_cleared(),
        }
    }
}

fn unsupported(operation: &str, mode: Mode) -> GostCipherError {
    log::debug!("{} is not available in {} mode", operation, mode);
    GostCipherError::UnsupportedMode
}

impl fmt::Debug for GostCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GostCipher")
            .field("algorithm", &self.algorithm)
            .field("mode", &self.mode())
            .finish_non_exhaustive()
    }
}

//! GOST block ciphers and modes of operation.
//!
//! This crate implements the two block ciphers of GOST R 34.12-2015,
//! Kuznechik (128-bit block) and Magma (64-bit block), and the modes of
//! operation of GOST R 34.13-2015: ECB, CBC, CFB, OFB, CTR and the
//! OMAC1-style MAC. Keys, round keys and chaining state are zeroized on
//! [`GostCipher::clear`] and on drop.
//!
//! # Architecture
//!
//! ```text
//! utils       (byte helpers, GF(2^8) multiply, GF(2^n) doubling)
//!     ↓
//! block       (BlockCipher trait: Kuznechik, Magma, runtime Cipher)
//!     ↓ owned by
//! mode        (Ecb / Cbc / Cfb / Ofb / Ctr / Mac + padding + feedback register)
//!     ↓ selected by
//! GostCipher  (factory object: algorithm × mode chosen at runtime)
//! ```
//!
//! # Examples
//!
//! Encrypt and decrypt with Magma in CBC mode:
//!
//! ```
//! use gostcipher::{Algorithm, Mode, ModeOptions, PadMode};
//!
//! let key = [0x11u8; 32];
//! let options = ModeOptions::new().with_pad_mode(PadMode::Iso7816);
//!
//! let mut encoder = gostcipher::new(Algorithm::Magma, &key, Mode::Cbc, options.clone()).unwrap();
//! let mut decoder = gostcipher::new(Algorithm::Magma, &key, Mode::Cbc, options).unwrap();
//!
//! let ct = encoder.encrypt(b"hello").unwrap();
//! assert_eq!(ct.len(), 16);
//!
//! let pt = decoder.decrypt(&ct).unwrap();
//! assert_eq!(&pt[..5], b"hello");
//! assert_eq!(pt[5], 0x80);
//! ```
//!
//! Compute a MAC incrementally:
//!
//! ```
//! use gostcipher::{Algorithm, Mode, ModeOptions};
//!
//! let key = [0x22u8; 32];
//! let mut mac = gostcipher::new(Algorithm::Kuznechik, &key, Mode::Mac, ModeOptions::new()).unwrap();
//! mac.update(b"first half, ").unwrap();
//! mac.update(b"second half").unwrap();
//!
//! let tag = mac.hexdigest(8).unwrap();
//! assert_eq!(tag.len(), 16);
//!
//! mac.clear();
//! assert!(mac.digest(8).is_err());
//! ```

#![deny(clippy::all)]

pub mod block;
pub mod error;
pub mod mode;
pub mod oid;
pub mod utils;

mod gost_cipher;

pub use block::{Algorithm, BlockCipher, Kuznechik, Magma};
pub use error::GostCipherError;
pub use gost_cipher::{default_iv, new, GostCipher, ModeOptions};
pub use mode::{Mode, PadMode};
pub use oid::ObjectIdentifier;

//! Byte and bit utilities.

pub(crate) mod bits;
pub mod bytes;

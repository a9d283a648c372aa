//! Block cipher capability consumed by the generator.
//!
//! The generator never names a concrete cipher. It is handed a
//! [`CipherFactory`] that turns key bytes into a [`BlockCipher`], so any
//! primitive with a fixed block size can drive it. [`RustCryptoFactory`]
//! adapts every RustCrypto block cipher; [`Aes256Factory`] is the usual
//! choice.

mod block;
mod rustcrypto;

pub use block::{BlockCipher, CipherError, CipherFactory};
pub use rustcrypto::{Aes256Factory, RustCryptoCipher, RustCryptoFactory};

//! Fortuna Generator Library
//!
//! The generator half of the Fortuna CSPRNG: a block cipher run in counter
//! mode under a secret key that the generator replaces with its own output
//! after every request. Compromising the current state therefore does not
//! reveal previously emitted randomness.
//!
//! # Architecture
//!
//! ```text
//! reseed(seed) ──SHA-256d──▶ key ──CipherFactory──▶ cipher
//!                                                    │
//!          counter ─────────encrypt─────────────────▶ output ─▶ caller
//!                                                    └─▶ next key
//! ```
//!
//! # Design Principles
//!
//! - **Pluggable cipher**: any [`CipherFactory`] works; [`Aes256Factory`] is the default
//! - **Fixed mixing hash**: reseeding uses double SHA-256
//! - **Bounded key epochs**: at most [`MAX_BLOCKS`] blocks per key
//! - **Errors, not aborts**: unseeded use returns [`GeneratorError::Unseeded`]
//! - **No entropy accumulation**: callers decide when and with what to reseed
//!
//! # Example
//!
//! ```
//! use fortuna_generator::{Aes256Factory, Generator, GeneratorError};
//!
//! let mut gen = Generator::new(Aes256Factory::new())?;
//! assert_eq!(gen.pseudo_random_data(16), Err(GeneratorError::Unseeded));
//!
//! gen.reseed(b"entropy from somewhere")?;
//! let bytes = gen.pseudo_random_data(100)?;
//! assert_eq!(bytes.len(), 100);
//!
//! // Reproducible stream
//! gen.seed(42)?;
//! let n = gen.int63()?;
//! assert!(n >= 0);
//! # Ok::<(), GeneratorError>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod cipher;
pub mod config;
pub mod generator;
pub mod metrics;

// Re-export commonly used types at crate root
pub use crate::cipher::{Aes256Factory, BlockCipher, CipherError, CipherFactory, RustCryptoFactory};
pub use config::FileConfig;
pub use generator::{Generator, GeneratorError, GeneratorStats, KEY_SIZE, MAX_BLOCKS};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Fortuna generator.
//!
//! A block cipher in counter mode that rekeys itself after every request,
//! plus the SHA-256d key mixing used by reseeding and the integer adapter
//! used by generic random-number consumers.

mod sha256d;
mod source;
mod state;

pub use sha256d::{Sha256d, DIGEST_SIZE};
pub use source::OS_SEED_SIZE;
pub use state::{Generator, GeneratorError, GeneratorStats, KEY_SIZE, MAX_BLOCKS};

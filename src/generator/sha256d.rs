//! Double SHA-256 used for key mixing.
//!
//! `SHA-256d(m) = SHA-256(SHA-256(m))`. Hashing the digest a second time
//! closes off length-extension on the mixed key.

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Digest size of [`Sha256d`] in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Incremental SHA-256d hasher.
#[derive(Clone, Default)]
pub struct Sha256d {
    inner: Sha256,
}

impl Sha256d {
    /// Creates an empty hasher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorbs `data`.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Consumes the hasher and returns the digest.
    ///
    /// The digest is returned in a [`Zeroizing`] buffer since it is usually
    /// key material.
    pub fn finalize(self) -> Zeroizing<[u8; DIGEST_SIZE]> {
        let first = self.inner.finalize();
        let second = Sha256::digest(first);

        let mut out = Zeroizing::new([0u8; DIGEST_SIZE]);
        out.copy_from_slice(&second);
        out
    }

    /// One-shot SHA-256d of `data`.
    pub fn digest(data: &[u8]) -> Zeroizing<[u8; DIGEST_SIZE]> {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }
}

impl std::fmt::Debug for Sha256d {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sha256d").finish_non_exhaustive()
    }
}

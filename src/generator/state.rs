//! Generator state, reseeding and counter-mode block generation.
//!
//! # Rekeying Model
//!
//! Output is produced by encrypting a little-endian block counter under the
//! current key. After every run of at most [`MAX_BLOCKS`] blocks, including
//! the final run of a request, the generator encrypts enough further counter
//! values to cover [`KEY_SIZE`] bytes and installs them as the new key.
//! Compromising the key after a request therefore reveals nothing about
//! output the request already returned.
//!
//! External entropy only enters through [`Generator::reseed`], which mixes
//! the seed into the key with SHA-256d.

use super::sha256d::{Sha256d, DIGEST_SIZE};
use crate::cipher::{BlockCipher, CipherError, CipherFactory};
use thiserror::Error;
use zeroize::{Zeroize, Zeroizing};

/// Maximum number of blocks produced under a single key before rekeying.
pub const MAX_BLOCKS: usize = 1 << 16;

/// Key length in bytes, equal to the SHA-256d digest size.
pub const KEY_SIZE: usize = DIGEST_SIZE;

/// Errors reported by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("generator not yet seeded")]
    Unseeded,
    #[error("cipher initialisation failed: {0}")]
    CipherInitFailed(#[from] CipherError),
    #[error("cipher reports a zero block size")]
    InvalidBlockSize,
    #[error("cipher block size changed from {expected} to {got} bytes")]
    BlockSizeMismatch { expected: usize, got: usize },
}

/// Running totals of generator activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorStats {
    /// Reseeds performed, including those triggered by `seed`.
    pub reseeds: u64,
    /// Keys replaced with generator output.
    pub rekeys: u64,
    /// Cipher blocks produced, including rekey blocks.
    pub blocks_generated: u64,
    /// Bytes handed out to callers.
    pub bytes_generated: u64,
}

/// Fortuna generator: a block cipher in counter mode with self-rekeying.
///
/// The generator must be seeded with [`reseed`](Self::reseed) or
/// [`seed`](Self::seed) before it produces output; until then every output
/// request fails with [`GeneratorError::Unseeded`].
///
/// All operations take `&mut self`. Sharing one generator between threads
/// needs external locking.
pub struct Generator<F: CipherFactory> {
    /// Derives a cipher from each new key.
    factory: F,
    /// Current secret key. Overwritten in place, zeroed on drop.
    key: Zeroizing<[u8; KEY_SIZE]>,
    /// Always `factory.new_cipher(key)`.
    cipher: F::Cipher,
    /// Block counter, least significant byte first. All zero until seeded.
    counter: Zeroizing<Vec<u8>>,
    stats: GeneratorStats,
}

impl<F: CipherFactory> Generator<F> {
    /// Creates an unseeded generator with an all-zero key.
    ///
    /// Fails if the factory rejects the all-zero key of [`KEY_SIZE`] bytes
    /// or produces a cipher with a zero block size; both mean the factory is
    /// unusable with this generator.
    pub fn new(factory: F) -> Result<Self, GeneratorError> {
        let key = Zeroizing::new([0u8; KEY_SIZE]);
        let cipher = factory.new_cipher(&key[..])?;

        let block_size = cipher.block_size();
        if block_size == 0 {
            return Err(GeneratorError::InvalidBlockSize);
        }

        tracing::debug!(block_size, "generator created");

        Ok(Self {
            factory,
            key,
            cipher,
            counter: Zeroizing::new(vec![0u8; block_size]),
            stats: GeneratorStats::default(),
        })
    }

    /// Returns the cipher block size in bytes.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.counter.len()
    }

    /// Returns true once the generator has been seeded.
    #[inline]
    pub fn is_seeded(&self) -> bool {
        self.counter.iter().any(|&b| b != 0)
    }

    /// Returns activity totals.
    #[inline]
    pub fn stats(&self) -> GeneratorStats {
        self.stats
    }

    /// Installs `key` together with the cipher derived from it.
    ///
    /// The cipher is built first, so on error neither field changes.
    pub(super) fn set_key(&mut self, key: &[u8; KEY_SIZE]) -> Result<(), GeneratorError> {
        let cipher = self.factory.new_cipher(key)?;

        let got = cipher.block_size();
        if got != self.counter.len() {
            return Err(GeneratorError::BlockSizeMismatch {
                expected: self.counter.len(),
                got,
            });
        }

        // Overwrite the old key bytes instead of dropping them.
        self.key.copy_from_slice(key);
        self.cipher = cipher;
        Ok(())
    }

    pub(super) fn reset_counter(&mut self) {
        self.counter[..].zeroize();
    }

    fn inc(&mut self) {
        for byte in self.counter.iter_mut() {
            *byte = byte.wrapping_add(1);
            if *byte != 0 {
                break;
            }
        }
    }

    fn num_blocks(&self, n: usize) -> usize {
        n.div_ceil(self.block_size())
    }

    /// Mixes `seed` into the key.
    ///
    /// The new key is `SHA-256d(key || seed)`, so the new state does not
    /// reveal the previous one. Marks the generator as seeded.
    pub fn reseed(&mut self, seed: &[u8]) -> Result<(), GeneratorError> {
        let mut hasher = Sha256d::new();
        hasher.update(&self.key[..]);
        hasher.update(seed);
        let new_key = hasher.finalize();

        self.set_key(&new_key)?;
        self.inc();
        self.stats.reseeds += 1;

        tracing::debug!(
            seed_len = seed.len(),
            reseeds = self.stats.reseeds,
            "setting the generator seed"
        );
        Ok(())
    }

    /// Appends `k` blocks of keystream to `out`.
    fn generate_blocks(&mut self, out: &mut Vec<u8>, k: usize) -> Result<(), GeneratorError> {
        if !self.is_seeded() {
            return Err(GeneratorError::Unseeded);
        }

        let mut block = Zeroizing::new(vec![0u8; self.block_size()]);
        out.reserve(k * block.len());
        for _ in 0..k {
            block.copy_from_slice(&self.counter);
            self.cipher.encrypt_block(&mut block);
            out.extend_from_slice(&block);
            self.inc();
        }

        self.stats.blocks_generated += k as u64;
        Ok(())
    }

    /// Replaces the key with fresh generator output.
    fn rekey(&mut self) -> Result<(), GeneratorError> {
        let blocks = self.num_blocks(KEY_SIZE);
        let mut material = Zeroizing::new(Vec::with_capacity(blocks * self.block_size()));
        self.generate_blocks(&mut material, blocks)?;

        let mut new_key = Zeroizing::new([0u8; KEY_SIZE]);
        new_key.copy_from_slice(&material[..KEY_SIZE]);
        self.set_key(&new_key)?;
        self.stats.rekeys += 1;

        tracing::trace!(rekeys = self.stats.rekeys, "generator rekeyed");
        Ok(())
    }

    /// Returns `n` pseudo-random bytes.
    ///
    /// Output is produced in runs of at most [`MAX_BLOCKS`] blocks, each
    /// followed by a rekey. `n == 0` returns an empty vector without
    /// touching the state, but still requires a seeded generator.
    pub fn pseudo_random_data(&mut self, n: usize) -> Result<Vec<u8>, GeneratorError> {
        if !self.is_seeded() {
            return Err(GeneratorError::Unseeded);
        }

        let mut remaining = self.num_blocks(n);
        let mut out = Vec::with_capacity(remaining * self.block_size());

        while remaining > 0 {
            let count = remaining.min(MAX_BLOCKS);
            self.generate_blocks(&mut out, count)?;
            remaining -= count;
            self.rekey()?;
        }

        // Padding past `n` is discarded, never handed out later.
        out[n..].zeroize();
        out.truncate(n);
        self.stats.bytes_generated += n as u64;

        tracing::trace!(bytes = n, "generated pseudo-random bytes");
        Ok(out)
    }

    /// Fills `dest` with pseudo-random bytes.
    ///
    /// Equivalent to [`pseudo_random_data`](Self::pseudo_random_data) with
    /// `dest.len()`.
    pub fn fill(&mut self, dest: &mut [u8]) -> Result<(), GeneratorError> {
        let data = Zeroizing::new(self.pseudo_random_data(dest.len())?);
        dest.copy_from_slice(&data);
        Ok(())
    }
}

impl<F: CipherFactory> std::fmt::Debug for Generator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("block_size", &self.block_size())
            .field("seeded", &self.is_seeded())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

//! Integer adapter and `rand_core` integration.
//!
//! [`Generator::int63`] and [`Generator::seed`] give the generator the shape
//! of a classic seedable integer source. The `RngCore`, `CryptoRng` and
//! `SeedableRng` impls let it drive anything in the `rand` ecosystem.

use super::state::{Generator, GeneratorError, KEY_SIZE};
use crate::cipher::{Aes256Factory, CipherFactory, RustCryptoFactory};
use cipher::{BlockEncrypt, KeyInit};
use rand_core::{CryptoRng, RngCore, SeedableRng};

/// Bytes of OS entropy used by [`Generator::from_os_entropy`].
pub const OS_SEED_SIZE: usize = 32;

impl<F: CipherFactory> Generator<F> {
    /// Creates a generator seeded from the operating system's entropy source.
    pub fn from_os_entropy(factory: F) -> Result<Self, GeneratorError> {
        let mut gen = Self::new(factory)?;
        gen.reseed_from_os(OS_SEED_SIZE)?;
        Ok(gen)
    }

    /// Mixes `len` bytes of OS entropy into the key.
    pub fn reseed_from_os(&mut self, len: usize) -> Result<(), GeneratorError> {
        let mut seed = zeroize::Zeroizing::new(vec![0u8; len]);
        rand_core::OsRng.fill_bytes(&mut seed);
        self.reseed(&seed)
    }

    /// Returns a uniformly distributed integer in `0..=i64::MAX`.
    pub fn int63(&mut self) -> Result<i64, GeneratorError> {
        let mut bytes = [0u8; 8];
        self.fill(&mut bytes)?;
        bytes[0] &= 0x7f;
        Ok(i64::from_be_bytes(bytes))
    }

    /// Discards all state and reseeds deterministically from `seed`.
    ///
    /// Unlike [`reseed`](Self::reseed), nothing of the previous state
    /// survives: the key is reset to zero and the counter restarts, so the
    /// following output depends only on `seed` and the cipher. Use this for
    /// reproducible streams, never for secrets.
    pub fn seed(&mut self, seed: i64) -> Result<(), GeneratorError> {
        self.set_key(&[0u8; KEY_SIZE])?;
        self.reset_counter();
        self.reseed(&seed.to_be_bytes())?;

        tracing::debug!(seed, "generator reset to deterministic seed");
        Ok(())
    }
}

impl From<GeneratorError> for rand_core::Error {
    fn from(err: GeneratorError) -> Self {
        rand_core::Error::new(err)
    }
}

impl<F: CipherFactory> RngCore for Generator<F> {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill_bytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    /// # Panics
    ///
    /// Panics if the generator has not been seeded. Use
    /// [`try_fill_bytes`](RngCore::try_fill_bytes) to handle that case.
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(err) = self.fill(dest) {
            panic!("fortuna generator failed: {}", err);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill(dest).map_err(rand_core::Error::from)
    }
}

impl<C: BlockEncrypt + KeyInit> CryptoRng for Generator<RustCryptoFactory<C>> {}

impl SeedableRng for Generator<Aes256Factory> {
    type Seed = [u8; KEY_SIZE];

    /// Creates a generator and reseeds it once with `seed`.
    fn from_seed(seed: Self::Seed) -> Self {
        let mut gen = aes256_generator();
        if let Err(err) = gen.reseed(&seed) {
            unreachable!("AES-256 rejected a generator key: {}", err);
        }
        gen
    }

    /// Same as [`Generator::seed`] with `state` reinterpreted as `i64`.
    fn seed_from_u64(state: u64) -> Self {
        let mut gen = aes256_generator();
        if let Err(err) = gen.seed(state as i64) {
            unreachable!("AES-256 rejected a generator key: {}", err);
        }
        gen
    }
}

fn aes256_generator() -> Generator<Aes256Factory> {
    match Generator::new(Aes256Factory::new()) {
        Ok(gen) => gen,
        Err(err) => unreachable!("AES-256 rejected a generator key: {}", err),
    }
}

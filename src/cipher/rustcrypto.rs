//! Adapter for RustCrypto block ciphers.

use super::block::{BlockCipher, CipherError, CipherFactory};
use cipher::generic_array::GenericArray;
use cipher::{BlockEncrypt, KeyInit};
use std::fmt;
use std::marker::PhantomData;

/// Factory for the AES-256 cipher, which takes the generator's 32-byte keys.
pub type Aes256Factory = RustCryptoFactory<aes::Aes256>;

/// A RustCrypto block cipher wrapped as a [`BlockCipher`].
///
/// Holds the expanded key schedule. With the `zeroize` feature of the
/// cipher crate enabled the schedule is wiped when the cipher is dropped.
pub struct RustCryptoCipher<C> {
    inner: C,
}

impl<C: BlockEncrypt> BlockCipher for RustCryptoCipher<C> {
    fn block_size(&self) -> usize {
        C::block_size()
    }

    /// # Panics
    ///
    /// Panics if `block` is not exactly one cipher block long.
    fn encrypt_block(&self, block: &mut [u8]) {
        self.inner.encrypt_block(GenericArray::from_mut_slice(block));
    }
}

/// Builds [`RustCryptoCipher`]s for any cipher implementing
/// `BlockEncrypt + KeyInit`.
///
/// Keys are passed through `KeyInit::new_from_slice`, so the cipher's own
/// key length rules apply: AES-128 rejects the generator's 32-byte keys,
/// AES-256 accepts them.
pub struct RustCryptoFactory<C> {
    _cipher: PhantomData<fn() -> C>,
}

impl<C> RustCryptoFactory<C> {
    /// Creates a new factory.
    pub fn new() -> Self {
        Self {
            _cipher: PhantomData,
        }
    }
}

impl<C> Default for RustCryptoFactory<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for RustCryptoFactory<C> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<C> Copy for RustCryptoFactory<C> {}

impl<C> fmt::Debug for RustCryptoFactory<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RustCryptoFactory")
            .field("cipher", &std::any::type_name::<C>())
            .finish()
    }
}

impl<C: BlockEncrypt + KeyInit> CipherFactory for RustCryptoFactory<C> {
    type Cipher = RustCryptoCipher<C>;

    fn new_cipher(&self, key: &[u8]) -> Result<Self::Cipher, CipherError> {
        C::new_from_slice(key)
            .map(|inner| RustCryptoCipher { inner })
            .map_err(|_| CipherError::InvalidKeyLength { len: key.len() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aes256_known_answer() {
        // FIPS-197 appendix C.3
        let key: Vec<u8> = (0u8..32).collect();
        let cipher = Aes256Factory::new().new_cipher(&key).unwrap();
        assert_eq!(cipher.block_size(), 16);

        let mut block: [u8; 16] = [
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
            0xee, 0xff,
        ];
        cipher.encrypt_block(&mut block);
        assert_eq!(
            block,
            [
                0x8e, 0xa2, 0xb7, 0xca, 0x51, 0x67, 0x45, 0xbf, 0xea, 0xfc, 0x49, 0x90, 0x4b, 0x49,
                0x60, 0x89
            ]
        );
    }

    #[test]
    fn test_wrong_key_length_rejected() {
        let factory = RustCryptoFactory::<aes::Aes128>::new();
        assert!(matches!(
            factory.new_cipher(&[0u8; 32]),
            Err(CipherError::InvalidKeyLength { len: 32 })
        ));
        assert!(factory.new_cipher(&[0u8; 16]).is_ok());
    }

    fn require_zeroize_on_drop<T: zeroize::ZeroizeOnDrop>() {}

    #[test]
    fn test_aes_key_schedule_wiped_on_drop() {
        // AES-256 round keys 0 and 1 are the raw key, so a replaced cipher
        // must not leave its schedule behind.
        require_zeroize_on_drop::<aes::Aes256>();
    }

    #[test]
    fn test_factory_is_deterministic() {
        let factory = Aes256Factory::default();
        let a = factory.new_cipher(&[7u8; 32]).unwrap();
        let b = factory.new_cipher(&[7u8; 32]).unwrap();

        let mut block_a = [1u8; 16];
        let mut block_b = [1u8; 16];
        a.encrypt_block(&mut block_a);
        b.encrypt_block(&mut block_b);
        assert_eq!(block_a, block_b);
    }
}

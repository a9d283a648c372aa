//! Cipher traits and construction errors.

use thiserror::Error;

/// Errors a [`CipherFactory`] can report when deriving a cipher from a key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    #[error("invalid key length: {len} bytes")]
    InvalidKeyLength { len: usize },
    #[error("cipher rejected key: {0}")]
    Rejected(String),
}

/// A keyed block cipher able to encrypt one block in place.
pub trait BlockCipher {
    /// Block size in bytes. Must be non-zero and fixed for the cipher.
    fn block_size(&self) -> usize;

    /// Encrypts `block` in place.
    ///
    /// Callers pass exactly [`block_size`](Self::block_size) bytes.
    fn encrypt_block(&self, block: &mut [u8]);
}

/// Derives a [`BlockCipher`] from key bytes.
///
/// Implementations must be deterministic: identical keys yield ciphers
/// that encrypt identically.
pub trait CipherFactory {
    /// The cipher produced by this factory.
    type Cipher: BlockCipher;

    /// Creates a cipher keyed with `key`.
    fn new_cipher(&self, key: &[u8]) -> Result<Self::Cipher, CipherError>;
}

impl<T: CipherFactory + ?Sized> CipherFactory for &T {
    type Cipher = T::Cipher;

    fn new_cipher(&self, key: &[u8]) -> Result<Self::Cipher, CipherError> {
        (**self).new_cipher(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct XorCipher {
        key_byte: u8,
    }

    impl BlockCipher for XorCipher {
        fn block_size(&self) -> usize {
            8
        }

        fn encrypt_block(&self, block: &mut [u8]) {
            block.iter_mut().for_each(|b| *b ^= self.key_byte);
        }
    }

    struct XorFactory;

    impl CipherFactory for XorFactory {
        type Cipher = XorCipher;

        fn new_cipher(&self, key: &[u8]) -> Result<XorCipher, CipherError> {
            match key.first() {
                Some(&key_byte) => Ok(XorCipher { key_byte }),
                None => Err(CipherError::InvalidKeyLength { len: 0 }),
            }
        }
    }

    fn build<F: CipherFactory>(factory: F, key: &[u8]) -> F::Cipher {
        factory.new_cipher(key).unwrap()
    }

    #[test]
    fn test_factory_by_reference() {
        let factory = XorFactory;
        let cipher = build(&factory, &[0x0f]);

        let mut block = [0xf0u8; 8];
        cipher.encrypt_block(&mut block);
        assert_eq!(block, [0xff; 8]);
    }

    #[test]
    fn test_error_display() {
        let err = CipherError::InvalidKeyLength { len: 7 };
        assert_eq!(err.to_string(), "invalid key length: 7 bytes");

        let factory = XorFactory;
        assert!(matches!(
            factory.new_cipher(&[]),
            Err(CipherError::InvalidKeyLength { len: 0 })
        ));
    }
}

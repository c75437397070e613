//! Payload encryption using AES-128-CBC with PKCS#7 padding.
//!
//! CBC provides confidentiality only. Integrity comes from the RSA layer that
//! protects the session key, plus the padding check on decryption.

use crate::error::{CryptoError, CryptoResult};
use openssl::symm::{self, Cipher};
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of the AES key in bytes (128 bits).
pub const AES_KEY_SIZE: usize = 16;

/// Size of the CBC initialization vector in bytes.
pub const IV_SIZE: usize = 16;

/// A single-use AES key and IV, zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SessionKey {
    key: [u8; AES_KEY_SIZE],
    iv: [u8; IV_SIZE],
}

impl SessionKey {
    /// Generates a random key and IV.
    pub fn generate() -> Self {
        let mut key = [0u8; AES_KEY_SIZE];
        let mut iv = [0u8; IV_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut key);
        rand::rngs::OsRng.fill_bytes(&mut iv);
        Self { key, iv }
    }

    /// Rebuilds a session key from recovered bytes.
    ///
    /// The key is checked before the IV so a malformed envelope reports the
    /// first bad field.
    pub fn from_slices(key: &[u8], iv: &[u8]) -> CryptoResult<Self> {
        let key: [u8; AES_KEY_SIZE] = key
            .try_into()
            .map_err(|_| CryptoError::decryption("AES encryption key is invalid"))?;
        let iv: [u8; IV_SIZE] = iv
            .try_into()
            .map_err(|_| CryptoError::decryption("AES IV is invalid"))?;
        Ok(Self { key, iv })
    }

    /// Returns the key bytes.
    pub fn key(&self) -> &[u8; AES_KEY_SIZE] {
        &self.key
    }

    /// Returns the IV bytes.
    pub fn iv(&self) -> &[u8; IV_SIZE] {
        &self.iv
    }

    /// Encrypts `plaintext` under this key and IV.
    pub fn encrypt(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        symm::encrypt(Cipher::aes_128_cbc(), &self.key, Some(&self.iv), plaintext)
            .map_err(|e| CryptoError::Encryption(e.to_string()))
    }

    /// Decrypts `ciphertext`. Fails on a bad block length or padding, which is
    /// how a wrong key or a corrupted payload usually shows up.
    pub fn decrypt(&self, ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
        symm::decrypt(Cipher::aes_128_cbc(), &self.key, Some(&self.iv), ciphertext)
            .map_err(|_| CryptoError::decryption("data could not be decrypted"))
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKey")
            .field("key", &"[REDACTED]")
            .field("iv", &"[REDACTED]")
            .finish()
    }
}

//! RSA key material.
//!
//! A license is produced with a private key and read back with the matching
//! public key. `RsaKey` holds either half; a private key also carries its
//! public components, so it can stand in wherever a public key is expected.

use crate::error::{CryptoError, CryptoResult};
use openssl::pkey::{Private, Public};
use openssl::rsa::{Padding, Rsa};
use sha2::{Digest, Sha256};

/// Default modulus size for generated key pairs.
pub const DEFAULT_KEY_BITS: u32 = 2048;

/// An RSA private or public key.
#[derive(Clone)]
pub enum RsaKey {
    /// Full key pair, usable for both encryption and decryption.
    Private(Rsa<Private>),
    /// Public half only, usable for decryption.
    Public(Rsa<Public>),
}

impl RsaKey {
    /// Parses a PEM-encoded RSA key.
    ///
    /// Accepts PKCS#1 and PKCS#8 private keys, SubjectPublicKeyInfo public keys
    /// (`BEGIN PUBLIC KEY`) and PKCS#1 public keys (`BEGIN RSA PUBLIC KEY`).
    pub fn from_pem(pem: &[u8]) -> CryptoResult<Self> {
        let text = String::from_utf8_lossy(pem);
        let parsed = if text.contains("PRIVATE KEY-----") {
            Rsa::private_key_from_pem(pem).map(Self::Private)
        } else if text.contains("BEGIN RSA PUBLIC KEY") {
            Rsa::public_key_from_pem_pkcs1(pem).map(Self::Public)
        } else if text.contains("BEGIN PUBLIC KEY") {
            Rsa::public_key_from_pem(pem).map(Self::Public)
        } else {
            return Err(CryptoError::KeyFormat("no RSA PEM block found".to_string()));
        };
        parsed.map_err(|_| CryptoError::KeyFormat("PEM block is not a valid RSA key".to_string()))
    }

    /// Returns true if this key can encrypt (holds the private exponent).
    #[must_use]
    pub fn is_private(&self) -> bool {
        matches!(self, Self::Private(_))
    }

    /// Returns true if this key can decrypt. Always true: private keys carry
    /// their public components.
    #[must_use]
    pub fn is_public(&self) -> bool {
        true
    }

    /// Returns the modulus size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Self::Private(rsa) => rsa.size() as usize,
            Self::Public(rsa) => rsa.size() as usize,
        }
    }

    /// Returns the public half of this key.
    pub fn public_key(&self) -> CryptoResult<Self> {
        match self {
            Self::Public(rsa) => Ok(Self::Public(rsa.clone())),
            Self::Private(rsa) => {
                let n = rsa.n().to_owned().map_err(key_error)?;
                let e = rsa.e().to_owned().map_err(key_error)?;
                Rsa::from_public_components(n, e)
                    .map(Self::Public)
                    .map_err(key_error)
            }
        }
    }

    /// Encodes the private key as PKCS#1 PEM (`BEGIN RSA PRIVATE KEY`).
    pub fn private_key_to_pem(&self) -> CryptoResult<String> {
        match self {
            Self::Private(rsa) => pem_string(rsa.private_key_to_pem().map_err(key_error)?),
            Self::Public(_) => Err(CryptoError::Key("provided key is not a private key".to_string())),
        }
    }

    /// Encodes the public key as SubjectPublicKeyInfo PEM (`BEGIN PUBLIC KEY`).
    pub fn public_key_to_pem(&self) -> CryptoResult<String> {
        let pem = match self {
            Self::Private(rsa) => rsa.public_key_to_pem(),
            Self::Public(rsa) => rsa.public_key_to_pem(),
        };
        pem_string(pem.map_err(key_error)?)
    }

    /// SHA-256 over the DER-encoded public key, base64 encoded.
    ///
    /// Identical for a private key and its public half, so it can be logged to
    /// tell keys apart without revealing anything about them.
    pub fn fingerprint(&self) -> CryptoResult<String> {
        use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine};
        let der = match self {
            Self::Private(rsa) => rsa.public_key_to_der(),
            Self::Public(rsa) => rsa.public_key_to_der(),
        }
        .map_err(key_error)?;
        let hash = Sha256::digest(&der);
        Ok(STANDARD_NO_PAD.encode(&hash[..16]))
    }

    /// Raw RSA private-key transform with PKCS#1 type 1 padding
    /// (OpenSSL `RSA_private_encrypt`).
    pub(crate) fn private_encrypt(&self, input: &[u8]) -> CryptoResult<Vec<u8>> {
        let Self::Private(rsa) = self else {
            return Err(CryptoError::Key("provided key is not a private key".to_string()));
        };
        let mut out = vec![0u8; rsa.size() as usize];
        let len = rsa
            .private_encrypt(input, &mut out, Padding::PKCS1)
            .map_err(|_| CryptoError::Encryption("RSA private encryption failed".to_string()))?;
        out.truncate(len);
        Ok(out)
    }

    /// Raw RSA public-key transform with PKCS#1 type 1 padding check
    /// (OpenSSL `RSA_public_decrypt`). Fails unless `input` was produced by
    /// the matching private key.
    pub(crate) fn public_decrypt(&self, input: &[u8]) -> CryptoResult<Vec<u8>> {
        let mut out = vec![0u8; self.size()];
        let result = match self {
            Self::Private(rsa) => rsa.public_decrypt(input, &mut out, Padding::PKCS1),
            Self::Public(rsa) => rsa.public_decrypt(input, &mut out, Padding::PKCS1),
        };
        let len = result
            .map_err(|_| CryptoError::decryption("AES encryption key could not be decrypted"))?;
        out.truncate(len);
        Ok(out)
    }
}

impl std::fmt::Debug for RsaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_private() { "private" } else { "public" };
        f.debug_struct("RsaKey")
            .field("kind", &kind)
            .field("bits", &(self.size() * 8))
            .finish()
    }
}

/// A freshly generated key pair.
#[derive(Clone, Debug)]
pub struct KeyPair {
    pub private_key: RsaKey,
    pub public_key: RsaKey,
}

impl KeyPair {
    /// Generates a new random RSA key pair with a `bits`-bit modulus.
    pub fn generate(bits: u32) -> CryptoResult<Self> {
        let rsa = Rsa::generate(bits).map_err(key_error)?;
        let private_key = RsaKey::Private(rsa);
        let public_key = private_key.public_key()?;
        Ok(Self {
            private_key,
            public_key,
        })
    }
}

fn key_error(e: openssl::error::ErrorStack) -> CryptoError {
    CryptoError::Key(e.to_string())
}

fn pem_string(bytes: Vec<u8>) -> CryptoResult<String> {
    String::from_utf8(bytes).map_err(|e| CryptoError::KeyFormat(e.to_string()))
}

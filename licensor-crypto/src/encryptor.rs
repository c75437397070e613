//! Hybrid RSA + AES encryption of license payloads.
//!
//! `encrypt` seals the payload with a fresh AES-128-CBC session key, then
//! transforms that session key with the RSA *private* key (PKCS#1 type 1,
//! the same operation as OpenSSL `RSA_private_encrypt`). Only the holder of
//! the private key can produce a `key` field that the public key recovers,
//! which is what makes an imported license trustworthy.
//!
//! This is not a confidentiality scheme against anyone holding the public
//! key, and CBC carries no MAC of its own. Keep it for reading and writing
//! existing license files; do not reuse it for new protocols.
//!
//! Wire format:
//!
//! ```text
//! base64( {"data": base64(aes_cbc(payload)), "key": base64(rsa(aes_key)), "iv": base64(iv)} )
//! ```

use crate::cipher::SessionKey;
use crate::encoding::{decode_lenient, encode_lines};
use crate::error::{CryptoError, CryptoResult};
use crate::key::RsaKey;
use serde::Serialize;
use serde_json::Value;

/// The decoded `{data, key, iv}` record carried inside a license blob.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    /// AES-128-CBC ciphertext of the payload.
    pub data: Vec<u8>,
    /// Session key transformed with the RSA private key.
    pub key: Vec<u8>,
    /// CBC initialization vector.
    pub iv: Vec<u8>,
}

#[derive(Serialize)]
struct EnvelopeFields {
    data: String,
    key: String,
    iv: String,
}

impl Envelope {
    /// Serializes the envelope to the outer base64 blob.
    pub fn to_blob(&self) -> CryptoResult<String> {
        let fields = EnvelopeFields {
            data: encode_lines(&self.data),
            key: encode_lines(&self.key),
            iv: encode_lines(&self.iv),
        };
        let json = serde_json::to_string(&fields)?;
        Ok(encode_lines(json.as_bytes()))
    }

    /// Parses an outer base64 blob back into its three fields.
    pub fn from_blob(blob: &str) -> CryptoResult<Self> {
        let json = decode_lenient(blob.trim_end())?;
        let value: Value = serde_json::from_slice(&json)
            .map_err(|_| CryptoError::decryption("encryption data is invalid JSON"))?;

        let field = |name: &str| -> CryptoResult<Vec<u8>> {
            let encoded = value
                .get(name)
                .and_then(Value::as_str)
                .ok_or_else(|| CryptoError::decryption("required field missing from encryption data"))?;
            decode_lenient(encoded)
        };

        Ok(Self {
            data: field("data")?,
            key: field("key")?,
            iv: field("iv")?,
        })
    }
}

/// Encrypts and decrypts license payloads with a borrowed RSA key.
///
/// The encryptor holds no state besides the key reference, so swapping keys
/// means building a new one.
#[derive(Clone, Copy, Debug)]
pub struct Encryptor<'k> {
    key: &'k RsaKey,
}

impl<'k> Encryptor<'k> {
    pub fn new(key: &'k RsaKey) -> Self {
        Self { key }
    }

    /// Returns the key this encryptor is bound to.
    pub fn key(&self) -> &'k RsaKey {
        self.key
    }

    /// Encrypts `plaintext` into an opaque blob.
    ///
    /// Output differs on every call, even for identical input, because each
    /// call draws a fresh session key and IV.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Key`] if the bound key is not a private key.
    pub fn encrypt(&self, plaintext: &[u8]) -> CryptoResult<String> {
        if !self.key.is_private() {
            return Err(CryptoError::Key("provided key is not a private key".to_string()));
        }

        let session = SessionKey::generate();
        let data = session.encrypt(plaintext)?;
        let key = self.key.private_encrypt(session.key())?;

        Envelope {
            data,
            key,
            iv: session.iv().to_vec(),
        }
        .to_blob()
    }

    /// Decrypts a blob produced by [`Encryptor::encrypt`] with the matching
    /// private key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Decryption`] when the envelope is malformed, the
    /// session key was not produced by the matching private key, or the
    /// payload fails its padding check.
    pub fn decrypt(&self, blob: &str) -> CryptoResult<Vec<u8>> {
        if !self.key.is_public() {
            return Err(CryptoError::Key("provided key is not a public key".to_string()));
        }

        let envelope = Envelope::from_blob(blob)?;
        let aes_key = zeroize::Zeroizing::new(self.key.public_decrypt(&envelope.key)?);
        let session = SessionKey::from_slices(&aes_key, &envelope.iv)?;
        session.decrypt(&envelope.data)
    }
}

//! Codec configuration: which keys sign and read licenses.
//!
//! `LicenseConfig` is an ordinary value passed to `License::export` and
//! `License::import`. Rotating keys means building a new config (or calling
//! a setter on one you own); nothing is cached between calls.

use crate::error::{ImportError, LicenseResult};
use crate::licensee::GranteePolicy;
use licensor_crypto::{CryptoError, Encryptor, RsaKey};
use tracing::{debug, info};

/// Key material and policy for exporting and importing licenses.
#[derive(Debug, Clone, Default)]
pub struct LicenseConfig {
    encryption_key: Option<RsaKey>,
    fallback_decryption_keys: Vec<RsaKey>,
    grantee_policy: GranteePolicy,
}

impl LicenseConfig {
    /// Creates a config with no keys and the default grantee policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config bound to `key`.
    pub fn with_key(key: RsaKey) -> Self {
        Self {
            encryption_key: Some(key),
            ..Self::default()
        }
    }

    /// Sets the primary key: a private key for exporting, or any key for
    /// importing.
    pub fn set_encryption_key(&mut self, key: Option<RsaKey>) {
        self.encryption_key = key;
    }

    /// Replaces the ordered list of keys tried after the primary key.
    pub fn set_fallback_decryption_keys(&mut self, keys: Vec<RsaKey>) {
        self.fallback_decryption_keys = keys;
    }

    /// Appends a key to the fallback list.
    pub fn add_fallback_decryption_key(&mut self, key: RsaKey) {
        self.fallback_decryption_keys.push(key);
    }

    #[must_use]
    pub fn with_fallback_decryption_keys(mut self, keys: Vec<RsaKey>) -> Self {
        self.fallback_decryption_keys = keys;
        self
    }

    #[must_use]
    pub fn with_grantee_policy(mut self, policy: GranteePolicy) -> Self {
        self.grantee_policy = policy;
        self
    }

    pub fn set_grantee_policy(&mut self, policy: GranteePolicy) {
        self.grantee_policy = policy;
    }

    pub fn encryption_key(&self) -> Option<&RsaKey> {
        self.encryption_key.as_ref()
    }

    pub fn fallback_decryption_keys(&self) -> &[RsaKey] {
        &self.fallback_decryption_keys
    }

    pub fn grantee_policy(&self) -> &GranteePolicy {
        &self.grantee_policy
    }

    /// Returns an encryptor bound to the primary key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Key`] if no primary key is configured.
    pub fn encryptor(&self) -> LicenseResult<Encryptor<'_>> {
        self.encryption_key
            .as_ref()
            .map(Encryptor::new)
            .ok_or_else(|| CryptoError::Key("no RSA encryption key provided".to_string()).into())
    }

    /// Keys tried on import: the primary key first, then each fallback key
    /// in order.
    pub fn decryption_keys(&self) -> impl Iterator<Item = &RsaKey> {
        self.encryption_key
            .iter()
            .chain(self.fallback_decryption_keys.iter())
    }

    /// Tries each decryption key once, in order, and returns the position of
    /// the first key that succeeds together with the plaintext.
    ///
    /// Individual failures are not reported; callers only learn whether some
    /// key worked.
    pub fn trial_decrypt(&self, blob: &str) -> Option<(usize, Vec<u8>)> {
        for (index, key) in self.decryption_keys().enumerate() {
            match Encryptor::new(key).decrypt(blob) {
                Ok(plaintext) => {
                    if index > 0 {
                        info!(index, fingerprint = %fingerprint(key), "license decrypted with fallback key");
                    }
                    return Some((index, plaintext));
                }
                Err(_) => {
                    debug!(index, fingerprint = %fingerprint(key), "key did not decrypt license");
                }
            }
        }
        None
    }

    /// Decrypts `blob` with the first key that works.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Key`] if no keys are configured at all, and
    /// [`ImportError::Undecryptable`] if every configured key fails.
    pub fn decrypt(&self, blob: &str) -> LicenseResult<Vec<u8>> {
        if self.decryption_keys().next().is_none() {
            return Err(CryptoError::Key("no RSA decryption key provided".to_string()).into());
        }
        self.trial_decrypt(blob)
            .map(|(_, plaintext)| plaintext)
            .ok_or_else(|| ImportError::Undecryptable.into())
    }
}

fn fingerprint(key: &RsaKey) -> String {
    key.fingerprint().unwrap_or_else(|_| "unknown".to_string())
}

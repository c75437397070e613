//! Shared test helpers for license tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use licensor_crypto::{Encryptor, KeyPair};
use licensor_license::{License, LicenseConfig, Licensee};
use std::sync::OnceLock;

/// Small keys keep generation fast; PKCS#1 padding still fits the AES key.
pub const TEST_KEY_BITS: u32 = 1024;

/// Returns one of three fixed key pairs shared across the test binary.
pub fn keypair(slot: usize) -> &'static KeyPair {
    static PAIRS: OnceLock<Vec<KeyPair>> = OnceLock::new();
    &PAIRS.get_or_init(|| {
        (0..3)
            .map(|_| KeyPair::generate(TEST_KEY_BITS).unwrap())
            .collect()
    })[slot]
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A config that exports with key pair `slot`.
pub fn signing_config(slot: usize) -> LicenseConfig {
    LicenseConfig::with_key(keypair(slot).private_key.clone())
}

/// A config that imports with the public half of key pair `slot`.
pub fn reading_config(slot: usize) -> LicenseConfig {
    LicenseConfig::with_key(keypair(slot).public_key.clone())
}

/// The license used in end-to-end examples.
pub fn sample_license() -> License {
    let mut license = License::new();
    license.licensee = Some(Licensee::new("A", "B", "a@b.com"));
    license.starts_at = Some(date(2000, 1, 1));
    license.expires_at = Some(date(2500, 1, 1));
    license.restrict("plan", "ultimate");
    license.restrict("active_user_count", 100_000_000);
    license
}

/// Encrypts an arbitrary payload with key pair `slot`, bypassing validation.
pub fn encrypt_raw(slot: usize, payload: &str) -> String {
    Encryptor::new(&keypair(slot).private_key)
        .encrypt(payload.as_bytes())
        .unwrap()
}

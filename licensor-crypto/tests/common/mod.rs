//! Shared key fixtures for crypto tests.

#![allow(dead_code)]

use licensor_crypto::KeyPair;
use std::sync::OnceLock;

/// Modulus size for test keys: large enough for PKCS#1 padding around a
/// 16-byte session key, small enough to generate quickly.
pub const TEST_KEY_BITS: u32 = 1024;

/// Returns a key pair shared by every test in the binary.
pub fn shared_keypair() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(|| KeyPair::generate(TEST_KEY_BITS).unwrap())
}

/// Returns a second, unrelated key pair.
pub fn other_keypair() -> &'static KeyPair {
    static PAIR: OnceLock<KeyPair> = OnceLock::new();
    PAIR.get_or_init(|| KeyPair::generate(TEST_KEY_BITS).unwrap())
}

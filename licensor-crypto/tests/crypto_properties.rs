//! Property-based tests for the hybrid envelope.
//!
//! These tests verify properties that must always hold:
//! - Encryption is reversible with the matching public key
//! - Output is randomized per call
//! - Tampering with the transformed session key is always detected
//! - Tampering with the payload never yields the original plaintext

mod common;

use common::shared_keypair;
use licensor_crypto::{decode_lenient, encode_lines, Encryptor, Envelope};
use proptest::prelude::*;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn plaintext_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..4096)
}

fn seal(plaintext: &[u8]) -> Envelope {
    let blob = Encryptor::new(&shared_keypair().private_key)
        .encrypt(plaintext)
        .unwrap();
    Envelope::from_blob(&blob).unwrap()
}

fn open(envelope: &Envelope) -> Result<Vec<u8>, licensor_crypto::CryptoError> {
    Encryptor::new(&shared_keypair().public_key).decrypt(&envelope.to_blob().unwrap())
}

// =============================================================================
// ENCRYPTION PROPERTIES
// =============================================================================

mod encryption_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Encryption followed by decryption returns the original plaintext
        #[test]
        fn roundtrip_preserves_data(plaintext in plaintext_strategy()) {
            prop_assert_eq!(open(&seal(&plaintext)).unwrap(), plaintext);
        }

        /// Every call draws a fresh session key and IV
        #[test]
        fn same_plaintext_different_envelopes(plaintext in plaintext_strategy()) {
            let e1 = seal(&plaintext);
            let e2 = seal(&plaintext);
            prop_assert_ne!(&e1.iv, &e2.iv);
            prop_assert_ne!(&e1.key, &e2.key);
        }

        /// Ciphertext is the plaintext padded up to the next whole block
        #[test]
        fn ciphertext_is_block_padded(plaintext in plaintext_strategy()) {
            let envelope = seal(&plaintext);
            prop_assert_eq!(envelope.data.len(), (plaintext.len() / 16 + 1) * 16);
        }

        /// Flipping any bit of the transformed session key is detected
        #[test]
        fn tampered_key_always_fails(bit in 0usize..(128 * 8)) {
            let mut envelope = seal(b"{\"plan\":\"ultimate\"}");
            let bit = bit % (envelope.key.len() * 8);
            envelope.key[bit / 8] ^= 1 << (bit % 8);
            prop_assert!(open(&envelope).is_err());
        }

        /// Flipping any bit of the payload never reproduces the plaintext
        #[test]
        fn tampered_data_never_matches(
            plaintext in prop::collection::vec(any::<u8>(), 1..512),
            bit in any::<usize>(),
        ) {
            let mut envelope = seal(&plaintext);
            let bit = bit % (envelope.data.len() * 8);
            envelope.data[bit / 8] ^= 1 << (bit % 8);
            if let Ok(garbled) = open(&envelope) {
                prop_assert_ne!(garbled, plaintext);
            }
        }
    }
}

// =============================================================================
// BASE64 ENCODING PROPERTIES
// =============================================================================

mod base64_properties {
    use super::*;

    proptest! {
        /// Line-wrapped encoding is reversible
        #[test]
        fn encode_lines_roundtrip(bytes in plaintext_strategy()) {
            prop_assert_eq!(decode_lenient(&encode_lines(&bytes)).unwrap(), bytes);
        }

        /// Lines never exceed sixty columns
        #[test]
        fn lines_are_bounded(bytes in plaintext_strategy()) {
            let encoded = encode_lines(&bytes);
            prop_assert!(encoded.lines().all(|line| line.len() <= 60));
        }
    }
}

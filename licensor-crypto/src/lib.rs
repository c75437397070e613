//! Encryption layer for license files.
//!
//! This crate provides:
//! - RSA key loading, generation and fingerprinting
//! - AES-128-CBC session encryption
//! - The hybrid envelope that binds the two (private-key transform of the
//!   session key, public-key recovery on the reading side)
//!
//! It knows nothing about license semantics; callers hand it bytes.

mod cipher;
mod encoding;
mod encryptor;
mod error;
mod key;

pub use cipher::{SessionKey, AES_KEY_SIZE, IV_SIZE};
pub use encoding::{decode_lenient, encode_lines, LINE_WIDTH};
pub use encryptor::{Encryptor, Envelope};
pub use error::{CryptoError, CryptoResult};
pub use key::{KeyPair, RsaKey, DEFAULT_KEY_BITS};

//! # licensor CLI
//!
//! Subcommand handlers for the `licensor` binary. Each handler returns the
//! process exit code on success; errors are reported by `main`.
//!
//! ```bash
//! licensor keygen --private-key license_key --public-key license_key.pub
//! licensor issue --private-key license_key -o result.license --label acme
//! licensor inspect --public-key license_key.pub -i result.license
//! ```

pub mod inspect;
pub mod issue;
pub mod keygen;

use std::path::Path;

use anyhow::{Context, Result};
use licensor_crypto::RsaKey;

/// Reads a PEM-encoded RSA key from `path`.
pub fn load_key(path: &Path) -> Result<RsaKey> {
    let pem = std::fs::read(path)
        .with_context(|| format!("failed to read key: {}", path.display()))?;
    RsaKey::from_pem(&pem).with_context(|| format!("invalid RSA key: {}", path.display()))
}

/// Short fingerprint for display; falls back to a placeholder.
pub(crate) fn display_fingerprint(key: &RsaKey) -> String {
    key.fingerprint().unwrap_or_else(|_| "<unavailable>".to_string())
}

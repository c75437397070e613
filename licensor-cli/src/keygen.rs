//! # Keygen Subcommand
//!
//! Generates the RSA key pair used to issue and read licenses.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use licensor_crypto::{KeyPair, DEFAULT_KEY_BITS};
use tracing::info;

use crate::display_fingerprint;

/// Arguments for `licensor keygen`.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Where to write the private key (PKCS#1 PEM).
    #[arg(long, default_value = "license_key")]
    pub private_key: PathBuf,

    /// Where to write the public key (SPKI PEM).
    #[arg(long, default_value = "license_key.pub")]
    pub public_key: PathBuf,

    /// RSA modulus size in bits.
    #[arg(long, default_value_t = DEFAULT_KEY_BITS)]
    pub bits: u32,
}

/// Generates a key pair. Existing key files are never overwritten.
pub fn run_keygen(args: &KeygenArgs) -> Result<u8> {
    for path in [&args.private_key, &args.public_key] {
        if path.exists() {
            bail!("refusing to overwrite existing key: {}", path.display());
        }
    }

    info!(bits = args.bits, "generating RSA key pair");
    let pair = KeyPair::generate(args.bits).context("failed to generate key pair")?;

    write_new(&args.private_key, &pair.private_key.private_key_to_pem()?)?;
    write_new(&args.public_key, &pair.public_key.public_key_to_pem()?)?;

    println!("OK: generated {}-bit RSA key pair", args.bits);
    println!("  Private key: {}", args.private_key.display());
    println!("  Public key:  {}", args.public_key.display());
    println!("  Fingerprint: {}", display_fingerprint(&pair.public_key));
    Ok(0)
}

fn write_new(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write key: {}", path.display()))
}

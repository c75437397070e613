//! # Inspect Subcommand
//!
//! Decrypts a license file and prints its attributes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use licensor_license::{License, LicenseConfig};
use serde_json::Value;
use tracing::warn;

use crate::load_key;

/// Exit code for a license that decrypts but fails validation.
pub const EXIT_INVALID: u8 = 2;

/// Arguments for `licensor inspect`.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Public (or private) key tried first.
    #[arg(long)]
    pub public_key: PathBuf,

    /// Keys tried in order when the primary key fails. Repeatable.
    #[arg(long = "fallback-key")]
    pub fallback_keys: Vec<PathBuf>,

    /// License file to read; armored or bare.
    #[arg(long, short)]
    pub input: PathBuf,
}

/// Prints the decrypted attributes. Returns [`EXIT_INVALID`] when the
/// license decrypts but breaks a validation rule.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    let mut config = LicenseConfig::with_key(load_key(&args.public_key)?);
    for path in &args.fallback_keys {
        config.add_fallback_decryption_key(load_key(path)?);
    }

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read license: {}", args.input.display()))?;
    let license = License::import(&config, &raw)
        .with_context(|| format!("failed to import license: {}", args.input.display()))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&Value::Object(license.attributes()))?
    );

    match license.validate_under(config.grantee_policy()) {
        Ok(()) => Ok(0),
        Err(violation) => {
            warn!(%violation, "license decrypted but is not valid");
            eprintln!("INVALID: {violation}");
            Ok(EXIT_INVALID)
        }
    }
}

//! # Issue Subcommand
//!
//! Builds, validates, encrypts and writes a license file.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Args;
use licensor_license::{
    parse_feature_list, License, LicenseConfig, Licensee, FEATURE_CEILING,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::{display_fingerprint, load_key};

/// Arguments for `licensor issue`.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Private key used to encrypt the license.
    #[arg(long)]
    pub private_key: PathBuf,

    /// Public key used to re-import the written license as a self-check.
    #[arg(long)]
    pub public_key: Option<PathBuf>,

    /// Output path for the license file.
    #[arg(long, short)]
    pub output: PathBuf,

    /// Feature catalog (JSON array or one name per line) granted at the
    /// feature ceiling.
    #[arg(long, short)]
    pub features: Option<PathBuf>,

    /// Also write the plaintext attributes as pretty JSON to this path.
    #[arg(long)]
    pub plain_license: Option<PathBuf>,

    /// Product label for the armor markers; omit for a bare blob.
    #[arg(long)]
    pub label: Option<String>,

    #[arg(long, default_value = "Demo User")]
    pub name: String,

    #[arg(long, default_value = "Demo Company")]
    pub company: String,

    #[arg(long, default_value = "demo@example.com")]
    pub email: String,

    /// Plan tier stored in the `plan` restriction.
    #[arg(long, default_value = "ultimate")]
    pub plan: String,

    /// Seat count stored in the `active_user_count` restriction.
    #[arg(long, default_value_t = FEATURE_CEILING)]
    pub user_count: i64,

    #[arg(long, default_value = "1976-04-01")]
    pub starts_at: NaiveDate,

    #[arg(long, default_value = "2500-04-01")]
    pub expires_at: NaiveDate,

    #[arg(long, default_value = "2500-04-01")]
    pub block_changes_at: NaiveDate,

    /// Enable cloud licensing.
    #[arg(long)]
    pub cloud_licensing: bool,

    /// Enable offline cloud licensing (requires --cloud-licensing).
    #[arg(long)]
    pub offline_cloud_licensing: bool,
}

/// Issues a license from `args`.
pub fn run_issue(args: &IssueArgs) -> Result<u8> {
    let private_key = load_key(&args.private_key)?;
    if !private_key.is_private() {
        bail!("not a private key: {}", args.private_key.display());
    }

    let license = build_license(args)?;
    let config = LicenseConfig::with_key(private_key);
    let exported = license
        .export(&config, args.label.as_deref())
        .context("failed to export license")?;

    std::fs::write(&args.output, &exported)
        .with_context(|| format!("failed to write license: {}", args.output.display()))?;
    info!(path = %args.output.display(), "license written");

    if let Some(path) = &args.plain_license {
        let pretty = serde_json::to_string_pretty(&Value::Object(license.attributes()))?;
        std::fs::write(path, pretty)
            .with_context(|| format!("failed to write plain license: {}", path.display()))?;
    }

    if let Some(path) = &args.public_key {
        let public_key = load_key(path)?;
        let fingerprint = display_fingerprint(&public_key);
        let imported = License::import(&LicenseConfig::with_key(public_key), &exported)
            .with_context(|| format!("written license does not import with {}", path.display()))?;
        if imported != license {
            bail!("re-imported license differs from the issued one");
        }
        debug!(%fingerprint, "self-check passed");
    }

    println!("OK: issued license for {} <{}>", args.company, args.email);
    println!("  License: {}", args.output.display());
    println!("  Restrictions: {}", license.restrictions.len());
    Ok(0)
}

fn build_license(args: &IssueArgs) -> Result<License> {
    let mut license = License::new();
    license.licensee = Some(Licensee::new(&*args.name, &*args.company, &*args.email));
    license.starts_at = Some(args.starts_at);
    license.expires_at = Some(args.expires_at);
    license.block_changes_at = Some(args.block_changes_at);
    license.cloud_licensing_enabled = args.cloud_licensing;
    license.offline_cloud_licensing_enabled = args.offline_cloud_licensing;
    license.restrict("plan", args.plan.as_str());
    license.restrict("active_user_count", args.user_count);

    if let Some(path) = &args.features {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read feature list: {}", path.display()))?;
        let features = parse_feature_list(&text)
            .with_context(|| format!("invalid feature list: {}", path.display()))?;
        info!(count = features.len(), "injecting features");
        license.inject_features(features, FEATURE_CEILING);
    }

    license.validate().context("license is invalid")?;
    Ok(license)
}

//! Error types for the licensing module.

use licensor_crypto::CryptoError;
use thiserror::Error;

/// Licensing-specific errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Importing a license failed. Messages are deliberately generic so the
    /// caller cannot tell which decryption step rejected the input.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// The license is well formed but violates a validation rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The attribute map declares a version this crate does not read.
    #[error("unsupported license version: {0}")]
    UnsupportedVersion(String),

    /// No armor boundary could be located.
    #[error(transparent)]
    Boundary(#[from] BoundaryError),

    /// Key misuse or an encryption failure on export.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures surfaced by `License::import`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The input was empty.
    #[error("no license data")]
    NoData,

    /// No configured key could decrypt the input.
    #[error("license data could not be decrypted")]
    Undecryptable,

    /// The decrypted payload is not a JSON object.
    #[error("license data is invalid JSON")]
    InvalidJson,
}

/// The first validation rule a license violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid license: licensee is not a hash or is empty")]
    MissingLicensee,

    #[error("invalid license: starts_at is not a date")]
    MissingStartDate,

    #[error("invalid license: expires_at is not a date")]
    MissingExpiryDate,

    #[error(
        "invalid license: offline_cloud_licensing_enabled is true but cloud_licensing_enabled is false"
    )]
    OfflineWithoutCloud,
}

/// Armor parsing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoundaryError {
    #[error("no license begin marker found")]
    MissingBeginMarker,
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;

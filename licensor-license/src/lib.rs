//! Software licenses: model, validation and the encrypted file format.
//!
//! This crate handles:
//! - The license attribute model and its validation rules
//! - Projection to and from the flat JSON attribute map
//! - Export (validate, serialize, encrypt, armor) and import (de-armor,
//!   decrypt with the primary or a fallback key, parse)
//! - Text armor for embedding licenses in e-mails and config files
//!
//! # License File Format
//!
//! ```text
//! ---------------------BEGIN ACME LICENSE---------------------
//! <base64 of {"data": ..., "key": ..., "iv": ...}>
//! ----------------------END ACME LICENSE----------------------
//! ```
//!
//! Only the private-key holder can produce a file that a given public key
//! accepts. See `licensor_crypto::Encryptor` for the envelope itself.

mod boundary;
mod config;
mod dates;
mod error;
mod features;
mod license;
mod licensee;

pub use boundary::{add_boundary, is_armored, remove_boundary, strip_boundary, BOUNDARY_WIDTH};
pub use config::LicenseConfig;
pub use dates::{format_date, format_datetime, parse_date_lenient, parse_datetime_lenient};
pub use error::{BoundaryError, ImportError, LicenseError, LicenseResult, ValidationError};
pub use features::{parse_feature_list, FEATURE_CEILING};
pub use license::{License, FLAG_ATTRIBUTES, LICENSE_VERSION};
pub use licensee::{GranteePolicy, Licensee, INTERNAL_BRAND, INTERNAL_EMAIL_DOMAINS};

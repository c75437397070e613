use licensor_crypto::CryptoError;
use licensor_license::{BoundaryError, ImportError, LicenseError, ValidationError};

#[test]
fn import_errors_are_generic() {
    assert_eq!(ImportError::NoData.to_string(), "no license data");
    assert_eq!(
        ImportError::Undecryptable.to_string(),
        "license data could not be decrypted"
    );
    assert_eq!(ImportError::InvalidJson.to_string(), "license data is invalid JSON");
}

#[test]
fn import_error_display_is_transparent() {
    let err: LicenseError = ImportError::Undecryptable.into();
    assert_eq!(err.to_string(), "license data could not be decrypted");
}

#[test]
fn validation_error_names_the_rule() {
    let cases = [
        (ValidationError::MissingLicensee, "licensee"),
        (ValidationError::MissingStartDate, "starts_at"),
        (ValidationError::MissingExpiryDate, "expires_at"),
        (ValidationError::OfflineWithoutCloud, "offline_cloud_licensing_enabled"),
    ];
    for (err, field) in cases {
        let msg = LicenseError::from(err).to_string();
        assert!(msg.starts_with("invalid license: "), "{msg}");
        assert!(msg.contains(field), "{msg}");
    }
}

#[test]
fn unsupported_version_display() {
    let err = LicenseError::UnsupportedVersion("2".into());
    assert_eq!(err.to_string(), "unsupported license version: 2");
}

#[test]
fn boundary_error_display() {
    let err: LicenseError = BoundaryError::MissingBeginMarker.into();
    assert!(err.to_string().contains("begin marker"));
}

#[test]
fn crypto_error_passes_through() {
    let err: LicenseError = CryptoError::Key("no key".into()).into();
    assert!(matches!(err, LicenseError::Crypto(CryptoError::Key(_))));
    assert!(err.to_string().contains("no key"));
}

#[test]
fn serialization_error_from_serde() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: LicenseError = json_err.into();
    assert!(err.to_string().contains("serialization error"));
}

#[test]
fn errors_are_debug() {
    let err = LicenseError::Import(ImportError::NoData);
    assert!(format!("{err:?}").contains("NoData"));
}

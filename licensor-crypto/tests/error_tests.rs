use licensor_crypto::CryptoError;

#[test]
fn error_display_key() {
    let err = CryptoError::Key("provided key is not a private key".into());
    let msg = format!("{err}");
    assert!(msg.contains("key error"));
    assert!(msg.contains("not a private key"));
}

#[test]
fn error_display_key_format() {
    let err = CryptoError::KeyFormat("no RSA PEM block found".into());
    assert!(format!("{err}").contains("invalid key format"));
}

#[test]
fn error_display_encryption() {
    let err = CryptoError::Encryption("oops".into());
    assert!(format!("{err}").contains("encryption failed"));
}

#[test]
fn error_display_decryption() {
    let err = CryptoError::Decryption("data could not be decrypted".into());
    let msg = format!("{err}");
    assert!(msg.contains("decryption failed"));
    assert!(msg.contains("data could not be decrypted"));
}

#[test]
fn error_from_serde_json() {
    let serde_err: Result<serde_json::Value, _> = serde_json::from_str("not json");
    let crypto_err: CryptoError = serde_err.unwrap_err().into();
    assert!(format!("{crypto_err}").contains("serialization"));
}

#[test]
fn error_is_debug() {
    let err = CryptoError::Encryption("test".into());
    let _ = format!("{err:?}");
}

//! Base64 in the shape existing license files use.
//!
//! Encoded output is split into 60-column lines, each terminated by `\n`.
//! Decoding is lenient: anything outside the standard alphabet (line breaks,
//! stray whitespace, padding) is skipped, and a dangling final character is
//! dropped rather than rejected.

use crate::error::{CryptoError, CryptoResult};
use base64::{
    alphabet,
    engine::{general_purpose::STANDARD, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};

/// Encoded characters per output line.
pub const LINE_WIDTH: usize = 60;

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Encodes `bytes` as line-wrapped base64.
pub fn encode_lines(bytes: &[u8]) -> String {
    let encoded = STANDARD.encode(bytes);
    let mut out = String::with_capacity(encoded.len() + encoded.len() / LINE_WIDTH + 1);
    let mut start = 0;
    while start < encoded.len() {
        let end = (start + LINE_WIDTH).min(encoded.len());
        // base64 output is ASCII, so byte offsets are char boundaries.
        out.push_str(&encoded[start..end]);
        out.push('\n');
        start = end;
    }
    out
}

/// Decodes base64 text, ignoring characters outside the alphabet.
pub fn decode_lenient(text: &str) -> CryptoResult<Vec<u8>> {
    let mut filtered: Vec<u8> = text
        .bytes()
        .filter(|b| b.is_ascii_alphanumeric() || *b == b'+' || *b == b'/')
        .collect();
    if filtered.len() % 4 == 1 {
        filtered.pop();
    }
    LENIENT
        .decode(&filtered)
        .map_err(|e| CryptoError::Decryption(format!("invalid base64: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_is_one_terminated_line() {
        assert_eq!(encode_lines(b"hello"), "aGVsbG8=\n");
    }

    #[test]
    fn empty_input_encodes_to_empty_string() {
        assert_eq!(encode_lines(b""), "");
    }

    #[test]
    fn long_input_wraps_at_sixty_columns() {
        let data = vec![0xABu8; 100];
        let encoded = encode_lines(&data);
        let lines: Vec<&str> = encoded.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), LINE_WIDTH);
        assert_eq!(lines[1].len(), LINE_WIDTH);
        assert!(encoded.ends_with('\n'));
    }

    #[test]
    fn decode_ignores_line_breaks_and_noise() {
        let data: Vec<u8> = (0..=255).collect();
        let encoded = encode_lines(&data);
        let noisy = format!("  {}\r\n\t", encoded.replace('\n', "\r\n"));
        assert_eq!(decode_lenient(&noisy).unwrap(), data);
    }

    #[test]
    fn decode_accepts_missing_padding() {
        assert_eq!(decode_lenient("aGVsbG8").unwrap(), b"hello");
    }

    #[test]
    fn decode_drops_dangling_character() {
        assert_eq!(decode_lenient("aGVs\nZ").unwrap(), b"hel");
    }
}

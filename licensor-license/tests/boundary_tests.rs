use licensor_license::{add_boundary, is_armored, remove_boundary, strip_boundary, BoundaryError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const BLOB: &str = "eyJkYXRhIjoi\nYWJj\n";

#[test]
fn markers_are_padded_to_sixty_columns() {
    let armored = add_boundary(BLOB, "acme");
    let lines: Vec<&str> = armored.lines().collect();
    assert_eq!(
        lines,
        [
            "---------------------BEGIN ACME LICENSE---------------------",
            "eyJkYXRhIjoi",
            "YWJj",
            "----------------------END ACME LICENSE----------------------",
        ]
    );
}

#[test]
fn remove_returns_inner_blob() {
    let armored = add_boundary(BLOB, "acme");
    assert_eq!(remove_boundary(&armored).unwrap(), BLOB.trim());
}

#[test]
fn surrounding_text_is_discarded() {
    let armored = add_boundary(BLOB, "Acme");
    let mail = format!("Dear customer,\n\n{armored}\n\nRegards,\nSales");
    assert_eq!(remove_boundary(&mail).unwrap(), BLOB.trim());
}

#[test]
fn crlf_line_endings_accepted() {
    let text = "intro\r\n--BEGIN ACME LICENSE--\r\nabc\r\ndef\r\n--END ACME LICENSE--\r\nouttro";
    assert_eq!(remove_boundary(text).unwrap(), "abc\r\ndef");
}

#[test]
fn marker_dashes_are_optional() {
    let text = "BEGIN ACME LICENSE\nabc\nEND ACME LICENSE";
    assert_eq!(remove_boundary(text).unwrap(), "abc");
}

#[test]
fn missing_end_marker_keeps_remainder() {
    let text = "-----BEGIN ACME LICENSE-----\nabc\ndef";
    assert_eq!(remove_boundary(text).unwrap(), "abc\ndef");
}

#[test]
fn missing_begin_marker_is_an_error() {
    assert_eq!(remove_boundary("abc\ndef"), Err(BoundaryError::MissingBeginMarker));
    assert_eq!(
        remove_boundary("abc\n-----END ACME LICENSE-----"),
        Err(BoundaryError::MissingBeginMarker)
    );
    assert_eq!(strip_boundary("  abc  "), "  abc  ");
    assert!(!is_armored("abc"));
}

#[test]
fn first_block_wins() {
    let text = format!("{}\n{}", add_boundary("first", "a"), add_boundary("second", "b"));
    assert_eq!(remove_boundary(&text).unwrap(), "first");
}

#[test]
fn multi_word_label() {
    let armored = add_boundary("abc", "acme enterprise");
    assert!(armored.starts_with("----------------BEGIN ACME ENTERPRISE LICENSE---------------\n"));
    assert_eq!(remove_boundary(&armored).unwrap(), "abc");
}

#[test]
fn overlong_label_is_unpadded() {
    let label = "x".repeat(70);
    let armored = add_boundary("abc", &label);
    let first = armored.lines().next().unwrap();
    assert_eq!(first, format!("BEGIN {} LICENSE", label.to_uppercase()));
    assert_eq!(remove_boundary(&armored).unwrap(), "abc");
}

#[test]
fn blank_label_leaves_blob_bare() {
    for label in ["", "   ", "\t\r\n"] {
        let once = add_boundary("abc\n", label);
        assert_eq!(once, "abc", "{label:?}");
        assert!(!is_armored(&once));
        assert_eq!(add_boundary(&once, label), once);
        assert_eq!(strip_boundary(&once), "abc");
    }
}

#[test]
fn blank_label_unwraps_existing_armor() {
    let armored = add_boundary("abc", "acme");
    assert_eq!(add_boundary(&armored, ""), "abc");
}

#[test]
fn label_with_line_break_stays_on_one_line() {
    let armored = add_boundary("abc", "acme\nenterprise");
    assert!(armored.starts_with("----------------BEGIN ACME ENTERPRISE LICENSE---------------\n"));
    assert_eq!(remove_boundary(&armored).unwrap(), "abc");
    assert_eq!(add_boundary(&armored, "acme\nenterprise"), armored);
}

proptest! {
    #[test]
    fn remove_inverts_add(blob in "[A-Za-z0-9+/=\n]{0,200}") {
        let armored = add_boundary(&blob, "acme");
        prop_assert_eq!(remove_boundary(&armored).unwrap(), blob.trim());
    }

    #[test]
    fn wrapping_is_idempotent(blob in "[A-Za-z0-9+/=\n]{1,200}", label in "[a-z \t]{0,12}") {
        let once = add_boundary(&blob, &label);
        let twice = add_boundary(&once, &label);
        prop_assert_eq!(&twice, &once);
        prop_assert_eq!(strip_boundary(&twice), strip_boundary(&once));
    }
}

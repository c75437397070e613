//! Text armor around license blobs.
//!
//! An armored license looks like:
//!
//! ```text
//! ---------------------BEGIN ACME LICENSE---------------------
//! <blob>
//! ----------------------END ACME LICENSE----------------------
//! ```
//!
//! Marker lines are padded with dashes to [`BOUNDARY_WIDTH`] columns, the
//! left side taking the extra dash when the padding is odd. Readers tolerate
//! any number of dashes and any text before or after the block, so a license
//! can be pasted into an e-mail or a config file as is.

use crate::error::BoundaryError;
use regex::Regex;
use std::sync::LazyLock;

/// Target width of a marker line including its dashes.
pub const BOUNDARY_WIDTH: usize = 60;

static BOUNDARY_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\A|\r?\n)-*BEGIN .+? LICENSE-*\r?\n").expect("begin marker pattern")
});

static BOUNDARY_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r?\n-*END .+? LICENSE-*(?:\r?\n|\z)").expect("end marker pattern")
});

/// Wraps `blob` in begin/end markers for `label`.
///
/// Any markers already around `blob` are removed first, so wrapping twice
/// yields the same text as wrapping once. Runs of whitespace in the label
/// collapse to a single space; a blank label yields the bare blob, since a
/// marker without a product name cannot be found again.
pub fn add_boundary(blob: &str, label: &str) -> String {
    let inner = strip_boundary(blob).trim();
    let label = normalize_label(label);
    if label.is_empty() {
        return inner.to_string();
    }
    format!(
        "{}\n{}\n{}",
        pad(&format!("BEGIN {label} LICENSE")),
        inner,
        pad(&format!("END {label} LICENSE")),
    )
}

/// Returns the text between the first begin marker and the first end marker
/// after it.
///
/// Text outside the markers is discarded. A missing end marker keeps
/// everything after the begin marker.
///
/// # Errors
///
/// Returns [`BoundaryError::MissingBeginMarker`] if `text` has no begin marker.
pub fn remove_boundary(text: &str) -> Result<&str, BoundaryError> {
    let start = BOUNDARY_START
        .find(text)
        .ok_or(BoundaryError::MissingBeginMarker)?;
    let rest = &text[start.end()..];
    Ok(match BOUNDARY_END.find(rest) {
        Some(end) => &rest[..end.start()],
        None => rest,
    })
}

/// Like [`remove_boundary`], but returns `text` unchanged when it is not
/// armored.
pub fn strip_boundary(text: &str) -> &str {
    remove_boundary(text).unwrap_or(text)
}

/// Returns true if `text` contains a begin marker.
pub fn is_armored(text: &str) -> bool {
    BOUNDARY_START.is_match(text)
}

/// Uppercases `label` and collapses its whitespace so the marker stays on
/// one line.
pub(crate) fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

fn pad(message: &str) -> String {
    let total = BOUNDARY_WIDTH.saturating_sub(message.chars().count());
    let left = total.div_ceil(2);
    let right = total / 2;
    format!("{}{message}{}", "-".repeat(left), "-".repeat(right))
}

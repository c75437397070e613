//! Feature catalogs merged into license restrictions before export.
//!
//! A catalog is either a JSON array of feature names or a plain text file
//! with one name per line.

use crate::error::LicenseResult;
use crate::license::License;
use serde_json::Value;
use std::collections::HashSet;

/// Ceiling written for every injected feature. Large enough to never be the
/// limiting factor, small enough to fit a signed 32-bit integer.
pub const FEATURE_CEILING: i64 = i32::MAX as i64;

/// Parses a feature catalog.
///
/// Entries are trimmed, blanks are dropped and duplicates keep their first
/// position.
///
/// # Errors
///
/// Returns a serialization error if the text looks like JSON (starts with
/// `[`) but is not an array of strings.
pub fn parse_feature_list(text: &str) -> LicenseResult<Vec<String>> {
    let trimmed = text.trim_start();
    let raw: Vec<String> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed)?
    } else {
        trimmed.lines().map(str::to_string).collect()
    };

    let mut seen = HashSet::new();
    Ok(raw
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty() && seen.insert(name.clone()))
        .collect())
}

impl License {
    /// Sets each feature in `features` as a restriction with `ceiling`.
    /// Existing entries with the same name are overwritten.
    pub fn inject_features<I, S>(&mut self, features: I, ceiling: i64)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for feature in features {
            self.restrictions.insert(feature.into(), Value::from(ceiling));
        }
    }
}

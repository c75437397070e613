//! The party a license is issued to, and the internal-grantee allowlist.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Brand substring identifying internal grantees (matched case-insensitively).
pub const INTERNAL_BRAND: &str = "GitLab";

/// E-mail suffixes identifying internal grantees.
pub const INTERNAL_EMAIL_DOMAINS: [&str; 2] = ["@gitlab.com", "@jihulab.com"];

/// Licensee details, keyed by `Name`, `Company` and `Email`.
///
/// Stored as an open map so extra keys written by other tools survive an
/// import/export round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Licensee(Map<String, Value>);

impl Licensee {
    /// Creates a licensee with the three standard fields.
    pub fn new(name: impl Into<String>, company: impl Into<String>, email: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("Name".to_string(), Value::String(name.into()));
        fields.insert("Company".to_string(), Value::String(company.into()));
        fields.insert("Email".to_string(), Value::String(email.into()));
        Self(fields)
    }

    /// Wraps an existing map.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Sets a field, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), Value::String(value.into()));
    }

    /// Returns the raw value of a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a field rendered as text; missing or null fields read as "".
    pub fn field(&self, key: &str) -> String {
        match self.0.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn name(&self) -> String {
        self.field("Name")
    }

    pub fn company(&self) -> String {
        self.field("Company")
    }

    pub fn email(&self) -> String {
        self.field("Email")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Decides which licensees may hold a license without an expiry date.
///
/// A licensee is exempt only if its company contains the brand substring
/// (ignoring case) *and* its e-mail ends with one of the designated domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GranteePolicy {
    brand: String,
    email_domains: Vec<String>,
}

impl Default for GranteePolicy {
    fn default() -> Self {
        Self::new(INTERNAL_BRAND, INTERNAL_EMAIL_DOMAINS)
    }
}

impl GranteePolicy {
    pub fn new<I, S>(brand: impl Into<String>, email_domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            brand: brand.into(),
            email_domains: email_domains.into_iter().map(Into::into).collect(),
        }
    }

    /// A policy that exempts nobody.
    pub fn none() -> Self {
        Self {
            brand: String::new(),
            email_domains: Vec::new(),
        }
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn email_domains(&self) -> &[String] {
        &self.email_domains
    }

    /// Returns true if `licensee` is an internal grantee under any domain.
    #[must_use]
    pub fn exempts(&self, licensee: &Licensee) -> bool {
        (0..self.email_domains.len()).any(|i| self.exempts_via(licensee, i))
    }

    /// Returns true if `licensee` matches the brand and the `index`-th domain.
    #[must_use]
    pub fn exempts_via(&self, licensee: &Licensee, index: usize) -> bool {
        let Some(domain) = self.email_domains.get(index) else {
            return false;
        };
        !self.brand.is_empty()
            && licensee
                .company()
                .to_lowercase()
                .contains(&self.brand.to_lowercase())
            && licensee.email().ends_with(domain.as_str())
    }
}

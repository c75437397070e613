//! The license model: typed attributes, validation and import/export.
//!
//! A license is built field by field (or reconstructed from an imported
//! attribute map), validated, serialized to a flat JSON object and encrypted.
//! Validity is a pure function of the current field values; nothing records
//! whether `validate` has been called.

use crate::boundary::{add_boundary, normalize_label, strip_boundary};
use crate::config::LicenseConfig;
use crate::dates::{format_date, format_datetime, parse_date_lenient, parse_datetime_lenient};
use crate::error::{ImportError, LicenseError, LicenseResult, ValidationError};
use crate::licensee::{GranteePolicy, Licensee};
use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use serde_json::{Map, Value};
use tracing::debug;

/// The only attribute-map version this crate reads and writes.
pub const LICENSE_VERSION: u64 = 1;

/// Serialized names of the boolean capability flags, in output order.
pub const FLAG_ATTRIBUTES: [&str; 7] = [
    "cloud_licensing_enabled",
    "offline_cloud_licensing_enabled",
    "auto_renew_enabled",
    "seat_reconciliation_enabled",
    "operational_metrics_enabled",
    "generated_from_customers_dot",
    "generated_from_cancellation",
];

/// A software license.
#[derive(Debug, Clone, PartialEq)]
pub struct License {
    version: u64,
    pub licensee: Option<Licensee>,
    /// Serialized under the legacy name `issued_at`.
    pub starts_at: Option<NaiveDate>,
    pub expires_at: Option<NaiveDate>,
    pub notify_admins_at: Option<NaiveDate>,
    pub notify_users_at: Option<NaiveDate>,
    pub block_changes_at: Option<NaiveDate>,
    pub last_synced_at: Option<DateTime<FixedOffset>>,
    pub next_sync_at: Option<DateTime<FixedOffset>>,
    pub activated_at: Option<DateTime<FixedOffset>>,
    /// Entitlements: plan tier, seat count, feature ceilings.
    pub restrictions: Map<String, Value>,
    pub cloud_licensing_enabled: bool,
    pub offline_cloud_licensing_enabled: bool,
    pub auto_renew_enabled: bool,
    pub seat_reconciliation_enabled: bool,
    pub operational_metrics_enabled: bool,
    pub generated_from_customers_dot: bool,
    pub generated_from_cancellation: bool,
}

impl Default for License {
    fn default() -> Self {
        Self {
            version: LICENSE_VERSION,
            licensee: None,
            starts_at: None,
            expires_at: None,
            notify_admins_at: None,
            notify_users_at: None,
            block_changes_at: None,
            last_synced_at: None,
            next_sync_at: None,
            activated_at: None,
            restrictions: Map::new(),
            cloud_licensing_enabled: false,
            offline_cloud_licensing_enabled: false,
            auto_renew_enabled: false,
            seat_reconciliation_enabled: false,
            operational_metrics_enabled: false,
            generated_from_customers_dot: false,
            generated_from_cancellation: false,
        }
    }
}

impl License {
    /// Creates an empty license at the current version.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Legacy name for [`License::starts_at`].
    pub fn issued_at(&self) -> Option<NaiveDate> {
        self.starts_at
    }

    pub fn set_issued_at(&mut self, date: Option<NaiveDate>) {
        self.starts_at = date;
    }

    // ── Reconstruction ───────────────────────────────────────────

    /// Rebuilds a license from a flat attribute map.
    ///
    /// Unknown keys are ignored. Dates that cannot be parsed, and values of
    /// the wrong JSON type, are treated as absent; validation reports any
    /// required field that ends up missing.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::UnsupportedVersion`] unless `version` is
    /// missing, null or 1.
    pub fn from_attributes(attributes: &Map<String, Value>) -> LicenseResult<Self> {
        let version = match attributes.get("version") {
            None | Some(Value::Null) => LICENSE_VERSION,
            Some(v) if v.as_u64() == Some(LICENSE_VERSION) || v.as_f64() == Some(1.0) => {
                LICENSE_VERSION
            }
            Some(other) => return Err(LicenseError::UnsupportedVersion(other.to_string())),
        };

        let date = |key: &str| attributes.get(key).and_then(parse_date_lenient);
        let datetime = |key: &str| attributes.get(key).and_then(parse_datetime_lenient);
        let flag = |key: &str| attributes.get(key) == Some(&Value::Bool(true));

        Ok(Self {
            version,
            licensee: match attributes.get("licensee") {
                Some(Value::Object(fields)) => Some(Licensee::from_map(fields.clone())),
                _ => None,
            },
            starts_at: date("issued_at"),
            expires_at: date("expires_at"),
            notify_admins_at: date("notify_admins_at"),
            notify_users_at: date("notify_users_at"),
            block_changes_at: date("block_changes_at"),
            last_synced_at: datetime("last_synced_at"),
            next_sync_at: datetime("next_sync_at"),
            activated_at: datetime("activated_at"),
            restrictions: match attributes.get("restrictions") {
                Some(Value::Object(map)) => map.clone(),
                _ => Map::new(),
            },
            cloud_licensing_enabled: flag("cloud_licensing_enabled"),
            offline_cloud_licensing_enabled: flag("offline_cloud_licensing_enabled"),
            auto_renew_enabled: flag("auto_renew_enabled"),
            seat_reconciliation_enabled: flag("seat_reconciliation_enabled"),
            operational_metrics_enabled: flag("operational_metrics_enabled"),
            generated_from_customers_dot: flag("generated_from_customers_dot"),
            generated_from_cancellation: flag("generated_from_cancellation"),
        })
    }

    // ── Validation ───────────────────────────────────────────────

    /// Checks the license under the default grantee policy.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_under(&GranteePolicy::default())
    }

    /// Checks the license, reporting the first rule it violates.
    pub fn validate_under(&self, policy: &GranteePolicy) -> Result<(), ValidationError> {
        let result = self.first_violation(policy);
        match &result {
            Ok(()) => debug!("license is valid"),
            Err(violation) => debug!(%violation, "license failed validation"),
        }
        result
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    #[must_use]
    pub fn is_valid_under(&self, policy: &GranteePolicy) -> bool {
        self.validate_under(policy).is_ok()
    }

    fn first_violation(&self, policy: &GranteePolicy) -> Result<(), ValidationError> {
        let Some(licensee) = self.licensee.as_ref().filter(|l| !l.is_empty()) else {
            return Err(ValidationError::MissingLicensee);
        };
        if self.starts_at.is_none() {
            return Err(ValidationError::MissingStartDate);
        }
        if self.expires_at.is_none() && !policy.exempts(licensee) {
            return Err(ValidationError::MissingExpiryDate);
        }
        if self.offline_cloud_licensing_enabled && !self.cloud_licensing_enabled {
            return Err(ValidationError::OfflineWithoutCloud);
        }
        Ok(())
    }

    /// Returns true if the licensee may hold a license without an expiry date.
    #[must_use]
    pub fn internal_grantee(&self, policy: &GranteePolicy) -> bool {
        self.licensee.as_ref().is_some_and(|l| policy.exempts(l))
    }

    // ── Date predicates ──────────────────────────────────────────

    pub fn will_expire(&self) -> bool {
        self.expires_at.is_some()
    }

    pub fn will_notify_admins(&self) -> bool {
        self.notify_admins_at.is_some()
    }

    pub fn will_notify_users(&self) -> bool {
        self.notify_users_at.is_some()
    }

    pub fn will_block_changes(&self) -> bool {
        self.block_changes_at.is_some()
    }

    pub fn will_sync(&self) -> bool {
        self.next_sync_at.is_some()
    }

    pub fn is_activated(&self) -> bool {
        self.activated_at.is_some()
    }

    /// True once `today` reaches the expiry date.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        reached(self.expires_at, today)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_on(local_today())
    }

    pub fn should_notify_admins_on(&self, today: NaiveDate) -> bool {
        reached(self.notify_admins_at, today)
    }

    pub fn should_notify_admins(&self) -> bool {
        self.should_notify_admins_on(local_today())
    }

    pub fn should_notify_users_on(&self, today: NaiveDate) -> bool {
        reached(self.notify_users_at, today)
    }

    pub fn should_notify_users(&self) -> bool {
        self.should_notify_users_on(local_today())
    }

    pub fn should_block_changes_on(&self, today: NaiveDate) -> bool {
        reached(self.block_changes_at, today)
    }

    pub fn should_block_changes(&self) -> bool {
        self.should_block_changes_on(local_today())
    }

    // ── Restrictions ─────────────────────────────────────────────

    /// True if any restriction is set.
    pub fn is_restricted(&self) -> bool {
        !self.restrictions.is_empty()
    }

    /// True if the restriction `key` is set.
    pub fn is_restricted_by(&self, key: &str) -> bool {
        self.restrictions.contains_key(key)
    }

    pub fn restriction(&self, key: &str) -> Option<&Value> {
        self.restrictions.get(key)
    }

    /// Sets a restriction, replacing any previous value.
    pub fn restrict(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.restrictions.insert(key.into(), value.into());
    }

    // ── Serialization ────────────────────────────────────────────

    /// Projects the license onto its serialized attribute map.
    ///
    /// `version`, `licensee`, `issued_at` and every flag are always present;
    /// optional dates appear only when set, and `restrictions` only when
    /// non-empty.
    pub fn attributes(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("version".into(), Value::from(self.version));
        map.insert(
            "licensee".into(),
            self.licensee
                .as_ref()
                .map_or(Value::Null, |l| Value::Object(l.as_map().clone())),
        );
        map.insert(
            "issued_at".into(),
            self.starts_at.map_or(Value::Null, |d| Value::String(format_date(d))),
        );

        let dates = [
            ("expires_at", self.expires_at),
            ("notify_admins_at", self.notify_admins_at),
            ("notify_users_at", self.notify_users_at),
            ("block_changes_at", self.block_changes_at),
        ];
        for (key, date) in dates {
            if let Some(date) = date {
                map.insert(key.into(), Value::String(format_date(date)));
            }
        }

        let datetimes = [
            ("next_sync_at", &self.next_sync_at),
            ("last_synced_at", &self.last_synced_at),
            ("activated_at", &self.activated_at),
        ];
        for (key, datetime) in datetimes {
            if let Some(datetime) = datetime {
                map.insert(key.into(), Value::String(format_datetime(datetime)));
            }
        }

        for (key, enabled) in FLAG_ATTRIBUTES.into_iter().zip(self.flags()) {
            map.insert(key.into(), Value::Bool(enabled));
        }

        if self.is_restricted() {
            map.insert("restrictions".into(), Value::Object(self.restrictions.clone()));
        }
        map
    }

    fn flags(&self) -> [bool; 7] {
        [
            self.cloud_licensing_enabled,
            self.offline_cloud_licensing_enabled,
            self.auto_renew_enabled,
            self.seat_reconciliation_enabled,
            self.operational_metrics_enabled,
            self.generated_from_customers_dot,
            self.generated_from_cancellation,
        ]
    }

    /// Compact JSON of [`License::attributes`], the plaintext that gets
    /// encrypted.
    pub fn to_json(&self) -> LicenseResult<String> {
        Ok(serde_json::to_string(&Value::Object(self.attributes()))?)
    }

    // ── Import / export ──────────────────────────────────────────

    /// Validates, serializes and encrypts the license with the config's
    /// primary key, armoring the result when `boundary` names a product.
    /// A blank `boundary` is the same as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::Validation`] for an invalid license and
    /// [`LicenseError::Crypto`] when no private key is configured.
    pub fn export(&self, config: &LicenseConfig, boundary: Option<&str>) -> LicenseResult<String> {
        self.validate_under(config.grantee_policy())?;
        let json = self.to_json()?;
        let blob = config.encryptor()?.encrypt(json.as_bytes())?;
        Ok(match boundary.filter(|label| !normalize_label(label).is_empty()) {
            Some(label) => add_boundary(&blob, label),
            None => blob,
        })
    }

    /// Decrypts and parses a license, trying the primary key and then each
    /// fallback key.
    ///
    /// The result is not validated, so a license that decrypts but breaks a
    /// rule can still be inspected.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError`] for empty input, undecryptable data or a
    /// payload that is not a JSON object, and
    /// [`LicenseError::UnsupportedVersion`] for a newer attribute map.
    pub fn import(config: &LicenseConfig, raw: &str) -> LicenseResult<Self> {
        if raw.trim().is_empty() {
            return Err(ImportError::NoData.into());
        }

        let blob = strip_boundary(raw);
        let plaintext = config.decrypt(blob)?;

        let attributes = match serde_json::from_slice::<Value>(&plaintext) {
            Ok(Value::Object(map)) => map,
            _ => return Err(ImportError::InvalidJson.into()),
        };
        Self::from_attributes(&attributes)
    }
}

fn reached(date: Option<NaiveDate>, today: NaiveDate) -> bool {
    date.is_some_and(|d| today >= d)
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

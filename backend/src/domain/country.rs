//! Country aggregate and its mutation inputs.
//!
//! A [`Country`] only exists once storage has assigned it an identifier.
//! Candidates for creation are [`NewCountry`] values and partial updates are
//! [`CountryPatch`] values; neither carries identity.

use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;

/// Storage-assigned country identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryId(i64);

impl CountryId {
    /// Wrap a raw identifier.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for CountryId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for CountryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted country.
///
/// Equality is identity based: two values are equal when their ids match,
/// whatever their other fields hold.
#[derive(Debug, Clone)]
pub struct Country {
    /// Storage-assigned identifier.
    pub id: CountryId,
    /// Display name, unique ignoring case.
    pub name: String,
    /// Short country code, unique ignoring case.
    pub code: String,
    /// Creation instant, truncated to milliseconds.
    pub date_created: DateTime<Utc>,
    /// Last modification instant; equals `date_created` until the first
    /// update.
    pub date_updated: DateTime<Utc>,
}

impl PartialEq for Country {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Country {}

impl std::hash::Hash for Country {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Country {
    /// Merge `patch` into this country.
    ///
    /// Absent or empty patch values keep the current value. The id and
    /// `date_created` are carried over; `date_updated` becomes `updated_at`.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use country_service::domain::{Country, CountryId, CountryPatch};
    ///
    /// let now = Utc::now();
    /// let japan = Country {
    ///     id: CountryId::new(1),
    ///     name: "Japan".into(),
    ///     code: "JP".into(),
    ///     date_created: now,
    ///     date_updated: now,
    /// };
    /// let merged = japan.merged_with(&CountryPatch::new(None, Some("JPN".into())), now);
    /// assert_eq!(merged.name, "Japan");
    /// assert_eq!(merged.code, "JPN");
    /// ```
    #[must_use]
    pub fn merged_with(&self, patch: &CountryPatch, updated_at: DateTime<Utc>) -> Self {
        Self {
            id: self.id,
            name: patch.name().unwrap_or(&self.name).to_owned(),
            code: patch.code().unwrap_or(&self.code).to_owned(),
            date_created: self.date_created,
            date_updated: updated_at,
        }
    }
}

/// Candidate country awaiting its first persist.
///
/// Not comparable: unpersisted candidates have no identity.
#[derive(Debug, Clone)]
pub struct NewCountry {
    /// Validated name.
    pub name: String,
    /// Validated code.
    pub code: String,
}

impl NewCountry {
    /// Build a candidate from its name and code.
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

/// Partial replacement of a country's name and/or code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryPatch {
    name: Option<String>,
    code: Option<String>,
}

impl CountryPatch {
    /// Build a patch; empty strings are treated like absent values.
    pub fn new(name: Option<String>, code: Option<String>) -> Self {
        Self {
            name: name.filter(|value| !value.is_empty()),
            code: code.filter(|value| !value.is_empty()),
        }
    }

    /// Replacement name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Replacement code, if any.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

/// Current time from `clock`, truncated to millisecond precision.
pub fn now_millis(clock: &dyn Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(3)
}

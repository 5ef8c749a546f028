//! Specification engine turning a [`CountryFilter`] into a storage predicate.
//!
//! The predicate is an ordered list of partial-text clauses joined with AND.
//! Each filterable field has one clause producer; a producer emits nothing
//! when its filter value is absent or blank, so absence never turns into an
//! always-true or always-false clause. An empty clause list matches every
//! row.
//!
//! Clauses are plain data so every storage adapter can evaluate them: the
//! in-memory repository calls [`CountrySpecification::matches`], the Diesel
//! repository translates each clause into an `ILIKE` filter.

use crate::domain::{Country, CountryFilter};

/// Country fields that accept partial-text filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountryField {
    Name,
    Code,
}

impl CountryField {
    /// Read this field from a country.
    pub fn value_of(self, country: &Country) -> &str {
        match self {
            Self::Name => &country.name,
            Self::Code => &country.code,
        }
    }
}

/// Case-insensitive "field contains needle" condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialTextClause {
    field: CountryField,
    needle: String,
}

impl PartialTextClause {
    /// Clause for `field`, or `None` when `value` is absent or blank.
    pub fn specify(field: CountryField, value: Option<&str>) -> Option<Self> {
        let value = value?;
        if value.trim().is_empty() {
            return None;
        }
        Some(Self {
            field,
            needle: value.to_lowercase(),
        })
    }

    /// Field the clause applies to.
    pub fn field(&self) -> CountryField {
        self.field
    }

    /// Lower-cased substring to look for.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Evaluate the clause against a country.
    pub fn matches(&self, country: &Country) -> bool {
        self.field
            .value_of(country)
            .to_lowercase()
            .contains(&self.needle)
    }
}

type ClauseProducer = fn(&CountryFilter) -> Option<PartialTextClause>;

/// One producer per filterable field, in evaluation order.
const CLAUSE_PRODUCERS: [ClauseProducer; 2] = [
    |filter| PartialTextClause::specify(CountryField::Name, filter.name.as_deref()),
    |filter| PartialTextClause::specify(CountryField::Code, filter.code.as_deref()),
];

/// Conjunction of partial-text clauses.
///
/// # Examples
/// ```
/// use country_service::domain::{CountryFilter, CountrySpecification};
///
/// let spec = CountrySpecification::from_filter(&CountryFilter::new(Some("an".into()), None));
/// assert_eq!(spec.clauses().len(), 1);
///
/// let unrestricted = CountrySpecification::from_filter(&CountryFilter::default());
/// assert!(unrestricted.is_unrestricted());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountrySpecification {
    clauses: Vec<PartialTextClause>,
}

impl CountrySpecification {
    /// Build the predicate for `filter`.
    pub fn from_filter(filter: &CountryFilter) -> Self {
        let clauses = CLAUSE_PRODUCERS
            .iter()
            .filter_map(|produce| produce(filter))
            .collect();
        Self { clauses }
    }

    /// Emitted clauses in evaluation order.
    pub fn clauses(&self) -> &[PartialTextClause] {
        &self.clauses
    }

    /// True when no clause restricts the result.
    pub fn is_unrestricted(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate the conjunction against a country.
    pub fn matches(&self, country: &Country) -> bool {
        self.clauses.iter().all(|clause| clause.matches(country))
    }
}

//! Driven port for country storage.
//!
//! Storage owns identity assignment, single-row durability and predicate
//! evaluation. The domain hands it a [`CountrySpecification`] and a page
//! request and receives a [`Page`] back; no query syntax leaks upward.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::Page;

use crate::domain::{Country, CountryId, CountryPageRequest, CountrySpecification, NewCountry};

use super::define_port_error;

define_port_error! {
    /// Errors raised by country storage adapters.
    pub enum CountryRepositoryError {
        /// Storage could not be reached.
        Connection { message: String } => "country repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "country repository query failed: {message}",
        /// A storage-level uniqueness constraint rejected the write.
        Conflict { message: String } => "country repository constraint violated: {message}",
    }
}

/// Port for persisting and querying countries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryRepository: Send + Sync {
    /// Persist a new country stamped with `created_at`; storage assigns the id.
    async fn insert(
        &self,
        candidate: &NewCountry,
        created_at: DateTime<Utc>,
    ) -> Result<Country, CountryRepositoryError>;

    /// Overwrite the row identified by `country.id`.
    async fn save(&self, country: &Country) -> Result<Country, CountryRepositoryError>;

    /// Remove the row identified by `id`.
    async fn delete(&self, id: CountryId) -> Result<(), CountryRepositoryError>;

    /// Fetch a country by identifier.
    async fn find_by_id(&self, id: CountryId) -> Result<Option<Country>, CountryRepositoryError>;

    /// True when a row other than `excluding` has `name` or `code`, compared
    /// case-insensitively.
    async fn exists_by_name_or_code(
        &self,
        name: &str,
        code: &str,
        excluding: Option<CountryId>,
    ) -> Result<bool, CountryRepositoryError>;

    /// Rows satisfying `spec`, ordered and windowed by `request`.
    async fn find_matching(
        &self,
        spec: &CountrySpecification,
        request: &CountryPageRequest,
    ) -> Result<Page<Country>, CountryRepositoryError>;

    /// Every stored row, ordered by id.
    async fn find_all(&self) -> Result<Vec<Country>, CountryRepositoryError>;
}

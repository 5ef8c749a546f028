//! Driving port for country operations.
//!
//! Every transport adapter (REST, GraphQL, gRPC) depends on
//! [`CountryService`] only, never on storage. The uniqueness guard that
//! wraps create and update lives in [`crate::domain::country_commands`] so
//! all adapters share it.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{
    Country, CountryFilter, CountryId, CountryPageRequest, CountryPatch, Error, NewCountry,
};

/// Capability set the transport adapters consume.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryService: Send + Sync {
    /// Persist `candidate`, stamping both timestamps with the current time.
    ///
    /// Uniqueness is not re-checked here; callers go through
    /// [`crate::domain::country_commands::create_country`].
    async fn add(&self, candidate: NewCountry) -> Result<Country, Error>;

    /// True when any country has `name` or `code`, ignoring case.
    async fn exists_by_name_or_code(&self, name: &str, code: &str) -> Result<bool, Error>;

    /// Same as [`Self::exists_by_name_or_code`] but ignores `excluded`.
    async fn exists_by_name_or_code_excluding(
        &self,
        name: &str,
        code: &str,
        excluded: CountryId,
    ) -> Result<bool, Error>;

    /// Look a country up by id.
    async fn find_by_id(&self, id: CountryId) -> Result<Option<Country>, Error>;

    /// Filtered, sorted page of countries.
    async fn find_all(
        &self,
        filter: CountryFilter,
        request: CountryPageRequest,
    ) -> Result<Page<Country>, Error>;

    /// Merge `patch` into `existing` and persist the result.
    async fn update(&self, existing: Country, patch: CountryPatch) -> Result<Country, Error>;

    /// Remove `existing`.
    async fn delete(&self, existing: Country) -> Result<(), Error>;

    /// Every country, ordered by id.
    async fn list_all(&self) -> Result<Vec<Country>, Error>;

    /// Up to `count` countries in random order.
    async fn sample(&self, count: usize) -> Result<Vec<Country>, Error>;
}

//! Country domain service implementing the [`CountryService`] driving port.
//!
//! Stamps timestamps, merges patches and hands predicates to storage. The
//! uniqueness guard sits one layer up in [`super::country_commands`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::Page;
use rand::seq::SliceRandom;

use crate::domain::ports::{CountryRepository, CountryRepositoryError, CountryService};
use crate::domain::{
    Country, CountryFilter, CountryId, CountryPageRequest, CountryPatch, CountrySpecification,
    Error, NewCountry, now_millis,
};

/// Domain service backed by a [`CountryRepository`].
#[derive(Clone)]
pub struct CountryDomainService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CountryDomainService<R> {
    /// Create a new service.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use country_service::domain::CountryDomainService;
    /// use country_service::outbound::memory::InMemoryCountryRepository;
    ///
    /// let service = CountryDomainService::new(
    ///     Arc::new(InMemoryCountryRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

fn map_repository_error(error: CountryRepositoryError) -> Error {
    match error {
        CountryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("country repository unavailable: {message}"))
        }
        CountryRepositoryError::Query { message } => {
            Error::internal(format!("country repository error: {message}"))
        }
        CountryRepositoryError::Conflict { .. } => Error::conflict("Country already exists"),
    }
}

#[async_trait]
impl<R> CountryService for CountryDomainService<R>
where
    R: CountryRepository,
{
    async fn add(&self, candidate: NewCountry) -> Result<Country, Error> {
        let now = now_millis(self.clock.as_ref());
        self.repo
            .insert(&candidate, now)
            .await
            .map_err(map_repository_error)
    }

    async fn exists_by_name_or_code(&self, name: &str, code: &str) -> Result<bool, Error> {
        self.repo
            .exists_by_name_or_code(name, code, None)
            .await
            .map_err(map_repository_error)
    }

    async fn exists_by_name_or_code_excluding(
        &self,
        name: &str,
        code: &str,
        excluded: CountryId,
    ) -> Result<bool, Error> {
        self.repo
            .exists_by_name_or_code(name, code, Some(excluded))
            .await
            .map_err(map_repository_error)
    }

    async fn find_by_id(&self, id: CountryId) -> Result<Option<Country>, Error> {
        self.repo.find_by_id(id).await.map_err(map_repository_error)
    }

    async fn find_all(
        &self,
        filter: CountryFilter,
        request: CountryPageRequest,
    ) -> Result<Page<Country>, Error> {
        let spec = CountrySpecification::from_filter(&filter);
        self.repo
            .find_matching(&spec, &request)
            .await
            .map_err(map_repository_error)
    }

    async fn update(&self, existing: Country, patch: CountryPatch) -> Result<Country, Error> {
        let merged = existing.merged_with(&patch, now_millis(self.clock.as_ref()));
        self.repo.save(&merged).await.map_err(map_repository_error)
    }

    async fn delete(&self, existing: Country) -> Result<(), Error> {
        self.repo
            .delete(existing.id)
            .await
            .map_err(map_repository_error)
    }

    async fn list_all(&self) -> Result<Vec<Country>, Error> {
        self.repo.find_all().await.map_err(map_repository_error)
    }

    async fn sample(&self, count: usize) -> Result<Vec<Country>, Error> {
        let mut countries = self.list_all().await?;
        countries.shuffle(&mut rand::rng());
        countries.truncate(count);
        Ok(countries)
    }
}

#[cfg(test)]
#[path = "country_service_tests.rs"]
mod tests;

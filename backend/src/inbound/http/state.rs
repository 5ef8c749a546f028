//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend on
//! the [`CountryService`] port only and stay testable without I/O.

use std::sync::Arc;

use actix_web::HttpRequest;

use crate::domain::Error;
use crate::domain::ports::CountryService;
use crate::inbound::http::error::HttpError;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Country port.
    pub countries: Arc<dyn CountryService>,
    /// Version string stamped on every error envelope.
    pub api_version: Arc<str>,
}

impl HttpState {
    /// Construct state from the country port and the advertised API version.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use mockable::DefaultClock;
    /// use country_service::domain::CountryDomainService;
    /// use country_service::inbound::http::state::HttpState;
    /// use country_service::outbound::memory::InMemoryCountryRepository;
    ///
    /// let service = CountryDomainService::new(
    ///     Arc::new(InMemoryCountryRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let state = HttpState::new(Arc::new(service), "1.0");
    /// assert_eq!(&*state.api_version, "1.0");
    /// ```
    pub fn new(countries: Arc<dyn CountryService>, api_version: impl Into<Arc<str>>) -> Self {
        Self {
            countries,
            api_version: api_version.into(),
        }
    }

    /// Render `error` as the envelope for `req`.
    pub fn reject(&self, req: &HttpRequest, error: Error) -> HttpError {
        HttpError::new(&error, &self.api_version, req.path())
    }
}

//! Shared helpers for the country service integration tests.
//!
//! Each integration test compiles as its own crate, so helpers live here and
//! are pulled in with `mod support;`.

use std::sync::Arc;

use actix_web::web;
use country_service::domain::CountryDomainService;
use country_service::domain::ports::CountryService;
use country_service::inbound::http::health::HealthState;
use country_service::outbound::memory::InMemoryCountryRepository;
use country_service::server::AppDependencies;
use mockable::DefaultClock;

/// Countries used by the listing scenarios, in insertion order.
pub const FOUR_COUNTRIES: [(&str, &str); 4] = [
    ("Spain", "SP"),
    ("Japan", "JP"),
    ("France", "FR"),
    ("Peru", "PE"),
];

/// Domain service over an empty in-memory repository.
pub fn memory_service() -> Arc<dyn CountryService> {
    Arc::new(CountryDomainService::new(
        Arc::new(InMemoryCountryRepository::default()),
        Arc::new(DefaultClock),
    ))
}

/// Application dependencies around `countries`, already marked ready.
pub fn app_dependencies(countries: Arc<dyn CountryService>) -> AppDependencies {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    AppDependencies::new(health, countries, Arc::from("1.0"))
}

//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod country_repository;
mod country_service;

#[cfg(test)]
pub use country_repository::MockCountryRepository;
pub use country_repository::{CountryRepository, CountryRepositoryError};
#[cfg(test)]
pub use country_service::MockCountryService;
pub use country_service::CountryService;

//! Test helpers for HTTP handlers.

use std::sync::Arc;

use actix_web::{App, web};
use mockable::DefaultClock;

use crate::Trace;
use crate::domain::CountryDomainService;
use crate::inbound::http::countries::configure;
use crate::inbound::http::error::{json_config, path_config, query_config};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryCountryRepository;

/// State backed by an empty in-memory repository.
pub fn memory_state() -> HttpState {
    let service = CountryDomainService::new(
        Arc::new(InMemoryCountryRepository::default()),
        Arc::new(DefaultClock),
    );
    HttpState::new(Arc::new(service), "1.0")
}

/// App serving the country routes with `state`.
pub fn country_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Trace)
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .configure(configure)
}

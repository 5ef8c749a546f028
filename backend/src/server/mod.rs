//! Server construction and middleware wiring.
//!
//! One actix-web app serves REST, GraphQL and the health probes; a tonic
//! server carries gRPC on its own address. Both share a single
//! [`CountryService`] instance.

mod config;

pub use config::ServerConfig;

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::CountryDomainService;
use crate::domain::ports::CountryService;
use crate::inbound::graphql::{self, CountrySchema, build_schema};
use crate::inbound::grpc::GrpcCountryService;
use crate::inbound::http::countries;
use crate::inbound::http::error::{json_config, path_config, query_config};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryCountryRepository;
use crate::outbound::persistence::DieselCountryRepository;

/// Build the country service for `config`.
///
/// Uses the Diesel repository when a pool is configured and the in-memory
/// repository otherwise.
pub fn build_country_service(config: &ServerConfig) -> Arc<dyn CountryService> {
    let clock = Arc::new(DefaultClock);
    match &config.db_pool {
        Some(pool) => Arc::new(CountryDomainService::new(
            Arc::new(DieselCountryRepository::new(pool.clone())),
            clock,
        )),
        None => Arc::new(CountryDomainService::new(
            Arc::new(InMemoryCountryRepository::default()),
            clock,
        )),
    }
}

/// Shared state handed to every actix worker.
#[derive(Clone)]
pub struct AppDependencies {
    /// Readiness and liveness flags.
    pub health_state: web::Data<HealthState>,
    /// State for the REST handlers.
    pub http_state: web::Data<HttpState>,
    /// GraphQL schema.
    pub schema: web::Data<CountrySchema>,
}

impl AppDependencies {
    /// Wire the REST and GraphQL adapters to one country service.
    pub fn new(
        health_state: web::Data<HealthState>,
        countries: Arc<dyn CountryService>,
        api_version: Arc<str>,
    ) -> Self {
        Self {
            health_state,
            http_state: web::Data::new(HttpState::new(
                Arc::clone(&countries),
                Arc::clone(&api_version),
            )),
            schema: web::Data::new(build_schema(countries, api_version)),
        }
    }
}

/// Assemble the actix-web application.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        schema,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(schema)
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .wrap(Trace)
        .configure(countries::configure)
        .configure(graphql::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the HTTP server.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(deps: AppDependencies, bind_addr: SocketAddr) -> std::io::Result<Server> {
    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();
    info!(%bind_addr, "HTTP listener bound");
    Ok(server)
}

/// Serve gRPC on `addr` until the future is dropped.
///
/// # Errors
/// Returns the transport error when binding or serving fails.
pub async fn serve_grpc(
    countries: Arc<dyn CountryService>,
    api_version: Arc<str>,
    addr: SocketAddr,
) -> Result<(), tonic::transport::Error> {
    info!(%addr, "gRPC listener starting");
    tonic::transport::Server::builder()
        .add_service(GrpcCountryService::new(countries, api_version).into_server())
        .serve(addr)
        .await
}

//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the country endpoints, the health probes and the
//! shared error envelope. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::OpenApi;

use crate::inbound::envelope::{ApiError, ErrorBody, ErrorItem};
use crate::inbound::http::dto::{
    AddCountryRequest, CountryPageResponse, CountryResponse, UpdateCountryRequest,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Country service API",
        description = "Create, read, list, update and delete countries."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::countries::add_country,
        crate::inbound::http::countries::list_countries,
        crate::inbound::http::countries::get_country,
        crate::inbound::http::countries::patch_country,
        crate::inbound::http::countries::remove_country,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CountryResponse,
        CountryPageResponse,
        AddCountryRequest,
        UpdateCountryRequest,
        ApiError,
        ErrorBody,
        ErrorItem
    )),
    tags(
        (name = "countries", description = "Country catalogue operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
/// OpenAPI document for the REST surface.
pub struct ApiDoc;

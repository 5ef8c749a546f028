//! gRPC inbound adapter for `country.v1.CountryService`.
//!
//! Every call runs inside its own [`TraceId`] scope. Failures become
//! [`Status`] values whose code follows the domain error and whose details
//! carry the JSON [`ApiError`] envelope.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use prost_types::Timestamp;
use tonic::codegen::Bytes;
use tonic::{Code, Request, Response, Status};
use tracing::debug;

use crate::domain::country_commands::{create_country, find_country_or_not_found};
use crate::domain::ports::CountryService;
use crate::domain::{Country, CountryId, Error, ErrorCode, TraceId};
use crate::inbound::envelope::ApiError;
use crate::inbound::validation::validate_new_country;

/// Generated protobuf types and service stubs.
#[expect(
    missing_docs,
    clippy::pedantic,
    reason = "code generated by tonic-build from proto/country.proto"
)]
pub mod proto {
    tonic::include_proto!("country.v1");
}

use proto::country_service_server::{CountryService as CountryRpc, CountryServiceServer};
use proto::{AddCountryRequest, CountRequest, CountriesResponse, CountryResponse, IdRequest};

const FIND_BY_ID: &str = "/country.v1.CountryService/FindById";
const ADD: &str = "/country.v1.CountryService/Add";
const RANDOM_COUNTRIES: &str = "/country.v1.CountryService/RandomCountries";

/// tonic service backed by the country port.
#[derive(Clone)]
pub struct GrpcCountryService {
    countries: Arc<dyn CountryService>,
    api_version: Arc<str>,
}

impl GrpcCountryService {
    /// Serve `countries`, stamping `api_version` on every error envelope.
    #[must_use]
    pub fn new(countries: Arc<dyn CountryService>, api_version: Arc<str>) -> Self {
        Self {
            countries,
            api_version,
        }
    }

    /// Wrap the service in the generated tonic server.
    pub fn into_server(self) -> CountryServiceServer<Self> {
        CountryServiceServer::new(self)
    }

    fn reject(&self, error: Error, method: &str) -> Status {
        to_status(&self.api_version, &error, method)
    }
}

fn code_for(code: ErrorCode) -> Code {
    match code {
        ErrorCode::InvalidRequest => Code::InvalidArgument,
        ErrorCode::NotFound => Code::NotFound,
        ErrorCode::Conflict => Code::AlreadyExists,
        ErrorCode::ServiceUnavailable => Code::Unavailable,
        ErrorCode::InternalError => Code::Internal,
    }
}

/// Convert `error` raised by `method` into a status with the envelope as
/// details.
pub fn to_status(api_version: &str, error: &Error, method: &str) -> Status {
    let envelope = ApiError::from_error(api_version, error, method);
    let details = serde_json::to_vec(&envelope).unwrap_or_else(|err| {
        debug!(error = %err, "failed to encode error envelope");
        Vec::new()
    });
    Status::with_details(
        code_for(error.code()),
        envelope.error.message,
        Bytes::from(details),
    )
}

fn to_timestamp(value: DateTime<Utc>) -> Timestamp {
    Timestamp {
        seconds: value.timestamp(),
        nanos: i32::try_from(value.timestamp_subsec_nanos()).unwrap_or_default(),
    }
}

impl From<Country> for CountryResponse {
    fn from(value: Country) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            code: value.code,
            date_created: Some(to_timestamp(value.date_created)),
            date_updated: Some(to_timestamp(value.date_updated)),
        }
    }
}

#[tonic::async_trait]
impl CountryRpc for GrpcCountryService {
    async fn find_by_id(
        &self,
        request: Request<IdRequest>,
    ) -> Result<Response<CountryResponse>, Status> {
        let id = CountryId::new(request.into_inner().id);
        TraceId::scope(TraceId::generate(), async move {
            find_country_or_not_found(self.countries.as_ref(), id)
                .await
                .map(|country| Response::new(country.into()))
                .map_err(|err| self.reject(err, FIND_BY_ID))
        })
        .await
    }

    async fn add(
        &self,
        request: Request<AddCountryRequest>,
    ) -> Result<Response<CountryResponse>, Status> {
        let input = request.into_inner();
        TraceId::scope(TraceId::generate(), async move {
            let candidate = validate_new_country(input.name.as_deref(), input.code.as_deref())
                .map_err(|err| self.reject(err, ADD))?;
            create_country(self.countries.as_ref(), candidate)
                .await
                .map(|country| Response::new(country.into()))
                .map_err(|err| self.reject(err, ADD))
        })
        .await
    }

    async fn random_countries(
        &self,
        request: Request<CountRequest>,
    ) -> Result<Response<CountriesResponse>, Status> {
        let count = usize::try_from(request.into_inner().count).unwrap_or(usize::MAX);
        TraceId::scope(TraceId::generate(), async move {
            let countries = self
                .countries
                .sample(count)
                .await
                .map_err(|err| self.reject(err, RANDOM_COUNTRIES))?;
            Ok(Response::new(CountriesResponse {
                countries: countries.into_iter().map(CountryResponse::from).collect(),
            }))
        })
        .await
    }
}

#[cfg(test)]
mod tests;

//! Country REST handlers.
//!
//! ```text
//! POST   /api/v1/countries            {"name":"Spain","code":"SP"}
//! GET    /api/v1/countries?name=an&page=0&size=10&sort=name,desc
//! GET    /api/v1/country/{id}
//! PATCH  /api/v1/country/{id}         {"code":"ESP"}
//! DELETE /api/v1/country/{id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, web};

use crate::domain::country_commands::{
    create_country, delete_country, find_country_or_not_found, update_country,
};
use crate::domain::{CountryFilter, CountryId, CountryPageRequest};
use crate::inbound::envelope::ApiError;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    AddCountryRequest, CountryListQuery, CountryPageResponse, CountryResponse,
    UpdateCountryRequest,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::validation::{validate_new_country, validate_patch};

/// Create a country.
#[utoipa::path(
    post,
    path = "/api/v1/countries",
    request_body = AddCountryRequest,
    responses(
        (status = 201, description = "Country created", body = CountryResponse),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 409, description = "Name or code already taken", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["countries"],
    operation_id = "addCountry"
)]
#[post("/countries")]
pub async fn add_country(
    state: web::Data<HttpState>,
    req: HttpRequest,
    payload: web::Json<AddCountryRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let candidate = validate_new_country(payload.name.as_deref(), payload.code.as_deref())
        .map_err(|err| state.reject(&req, err))?;
    let created = create_country(state.countries.as_ref(), candidate)
        .await
        .map_err(|err| state.reject(&req, err))?;
    Ok(HttpResponse::Created().json(CountryResponse::from(created)))
}

/// List countries matching optional name and code fragments.
#[utoipa::path(
    get,
    path = "/api/v1/countries",
    params(CountryListQuery),
    responses(
        (status = 200, description = "Page of countries", body = CountryPageResponse),
        (status = 400, description = "Invalid paging or sort", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["countries"],
    operation_id = "listCountries"
)]
#[get("/countries")]
pub async fn list_countries(
    state: web::Data<HttpState>,
    req: HttpRequest,
    query: web::Query<CountryListQuery>,
) -> ApiResult<web::Json<CountryPageResponse>> {
    let query = query.into_inner();
    let request = CountryPageRequest::from_parts(query.page, query.size, query.sort.as_deref())
        .map_err(|err| state.reject(&req, err))?;
    let page = state
        .countries
        .find_all(CountryFilter::new(query.name, query.code), request)
        .await
        .map_err(|err| state.reject(&req, err))?;
    Ok(web::Json(CountryPageResponse::from(page)))
}

/// Fetch one country.
#[utoipa::path(
    get,
    path = "/api/v1/country/{id}",
    params(("id" = i64, Path, description = "Country identifier")),
    responses(
        (status = 200, description = "Country", body = CountryResponse),
        (status = 404, description = "Unknown id", body = ApiError)
    ),
    tags = ["countries"],
    operation_id = "getCountry"
)]
#[get("/country/{id}")]
pub async fn get_country(
    state: web::Data<HttpState>,
    req: HttpRequest,
    id: web::Path<i64>,
) -> ApiResult<web::Json<CountryResponse>> {
    let country = find_country_or_not_found(state.countries.as_ref(), CountryId::new(*id))
        .await
        .map_err(|err| state.reject(&req, err))?;
    Ok(web::Json(country.into()))
}

/// Partially update one country.
#[utoipa::path(
    patch,
    path = "/api/v1/country/{id}",
    params(("id" = i64, Path, description = "Country identifier")),
    request_body = UpdateCountryRequest,
    responses(
        (status = 200, description = "Updated country", body = CountryResponse),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "Unknown id", body = ApiError),
        (status = 409, description = "Name or code already taken", body = ApiError)
    ),
    tags = ["countries"],
    operation_id = "updateCountry"
)]
#[patch("/country/{id}")]
pub async fn patch_country(
    state: web::Data<HttpState>,
    req: HttpRequest,
    id: web::Path<i64>,
    payload: web::Json<UpdateCountryRequest>,
) -> ApiResult<web::Json<CountryResponse>> {
    let payload = payload.into_inner();
    let patch = validate_patch(payload.name, payload.code).map_err(|err| state.reject(&req, err))?;
    let updated = update_country(state.countries.as_ref(), CountryId::new(*id), patch)
        .await
        .map_err(|err| state.reject(&req, err))?;
    Ok(web::Json(updated.into()))
}

/// Delete one country.
#[utoipa::path(
    delete,
    path = "/api/v1/country/{id}",
    params(("id" = i64, Path, description = "Country identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Unknown id", body = ApiError)
    ),
    tags = ["countries"],
    operation_id = "deleteCountry"
)]
#[delete("/country/{id}")]
pub async fn remove_country(
    state: web::Data<HttpState>,
    req: HttpRequest,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    delete_country(state.countries.as_ref(), CountryId::new(*id))
        .await
        .map_err(|err| state.reject(&req, err))?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register every country route on a `/api/v1` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(add_country)
            .service(list_countries)
            .service(get_country)
            .service(patch_country)
            .service(remove_country),
    );
}

#[cfg(test)]
#[path = "countries_tests.rs"]
mod tests;

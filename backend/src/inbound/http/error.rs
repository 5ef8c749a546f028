//! HTTP adapter mapping for domain errors.
//!
//! Purpose: render domain failures as the shared [`ApiError`] envelope with
//! the matching status code, and route actix extractor failures (bad JSON,
//! bad query strings, bad path segments) through the same envelope.

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};

use crate::domain::Error;
use crate::inbound::envelope::{ApiError, status_for};
use crate::inbound::http::state::HttpState;
use crate::middleware::TRACE_ID_HEADER;

/// Violation reason used when a request cannot be decoded at all.
pub const MALFORMED_REQUEST: &str = "MalformedRequest";

/// Version reported when a request fails before state is reachable.
const FALLBACK_API_VERSION: &str = "1.0";

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, HttpError>;

/// Rendered error envelope plus the status it is served with.
#[derive(Debug, Clone)]
pub struct HttpError {
    status: StatusCode,
    envelope: ApiError,
    trace_id: Option<String>,
}

impl HttpError {
    /// Render `error` for the request at `path`.
    pub fn new(error: &Error, api_version: &str, path: &str) -> Self {
        let status = StatusCode::from_u16(status_for(error.code()).status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self {
            status,
            envelope: ApiError::from_error(api_version, error, path),
            trace_id: error.trace_id().map(str::to_owned),
        }
    }

    /// The envelope sent to the client.
    pub fn envelope(&self) -> &ApiError {
        &self.envelope
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.envelope.error.code, self.envelope.error.message)
    }
}

impl ResponseError for HttpError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status);
        if let Some(id) = &self.trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.clone()));
        }
        builder.json(&self.envelope)
    }
}

fn malformed_request(detail: impl std::fmt::Display, req: &HttpRequest) -> actix_web::Error {
    let error = Error::invalid_request(MALFORMED_REQUEST, detail.to_string());
    let rendered = match req.app_data::<web::Data<HttpState>>() {
        Some(state) => state.reject(req, error),
        None => HttpError::new(&error, FALLBACK_API_VERSION, req.path()),
    };
    rendered.into()
}

/// JSON body settings rendering decode failures through the envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| malformed_request(err, req))
}

/// Query string settings rendering decode failures through the envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| malformed_request(err, req))
}

/// Path segment settings rendering decode failures through the envelope.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| malformed_request(err, req))
}

//! Error envelope rendered by every transport adapter.
//!
//! ```json
//! {"apiVersion":"1.0","error":{"code":"404 NOT_FOUND","message":"Country not found",
//!  "errors":[{"domain":"/api/v1/country/7","reason":"Country with id = [7] not found",
//!  "message":"Country not found"}]}}
//! ```
//!
//! The REST adapter returns it as the response body, GraphQL copies it into
//! error extensions and gRPC attaches it to the status details.

use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};

/// Message clients see in place of internal failure details.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

/// Numeric status and reason phrase used in the envelope `code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine {
    /// HTTP status number.
    pub status: u16,
    /// Upper snake case reason, e.g. `NOT_FOUND`.
    pub reason: &'static str,
}

impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.reason)
    }
}

/// Status line for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusLine {
    let (status, reason) = match code {
        ErrorCode::InvalidRequest => (400, "BAD_REQUEST"),
        ErrorCode::NotFound => (404, "NOT_FOUND"),
        ErrorCode::Conflict => (409, "CONFLICT"),
        ErrorCode::ServiceUnavailable => (503, "SERVICE_UNAVAILABLE"),
        ErrorCode::InternalError => (500, "INTERNAL_SERVER_ERROR"),
    };
    StatusLine { status, reason }
}

/// Replace internal failures with a generic error, keeping the trace id.
pub fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal(INTERNAL_SERVER_ERROR_MESSAGE);
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

/// One entry of the envelope's `errors` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorItem {
    /// Request path, GraphQL field path or gRPC method path.
    pub domain: String,
    /// Rule or cause identifier.
    pub reason: String,
    /// Human-readable detail.
    pub message: String,
}

/// Body of the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Status rendered as `"<number> <REASON>"`, e.g. `"409 CONFLICT"`.
    pub code: String,
    /// Summary shown to clients.
    pub message: String,
    /// Items in detection order.
    pub errors: Vec<ErrorItem>,
}

/// Versioned error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Service API version.
    pub api_version: String,
    /// Failure details.
    pub error: ErrorBody,
}

impl ApiError {
    /// Render `error` for a call identified by `domain`.
    ///
    /// Client errors are logged at info level; internal failures are logged
    /// in full at error level before being redacted.
    ///
    /// # Examples
    /// ```
    /// use country_service::domain::Error;
    /// use country_service::inbound::envelope::ApiError;
    ///
    /// let err = Error::conflict("Country already exists");
    /// let envelope = ApiError::from_error("1.0", &err, "/api/v1/countries");
    /// assert_eq!(envelope.error.code, "409 CONFLICT");
    /// assert_eq!(envelope.error.errors[0].reason, "Country already exists");
    /// ```
    pub fn from_error(api_version: &str, error: &Error, domain: &str) -> Self {
        log_failure(error, domain);
        let shown = redact_if_internal(error);
        let errors = if shown.violations().is_empty() {
            vec![ErrorItem {
                domain: domain.to_owned(),
                reason: shown.reason().unwrap_or(shown.message()).to_owned(),
                message: shown.message().to_owned(),
            }]
        } else {
            shown
                .violations()
                .iter()
                .map(|violation| ErrorItem {
                    domain: domain.to_owned(),
                    reason: violation.reason().to_owned(),
                    message: violation.message().to_owned(),
                })
                .collect()
        };
        Self {
            api_version: api_version.to_owned(),
            error: ErrorBody {
                code: status_for(shown.code()).to_string(),
                message: shown.message().to_owned(),
                errors,
            },
        }
    }
}

fn log_failure(error: &Error, domain: &str) {
    match error.code() {
        ErrorCode::InternalError | ErrorCode::ServiceUnavailable => {
            error!(domain, trace_id = error.trace_id(), error = %error, "request failed");
        }
        _ => {
            info!(domain, trace_id = error.trace_id(), message = %error, "request rejected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Violation;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(ErrorCode::InvalidRequest, "400 BAD_REQUEST")]
    #[case(ErrorCode::NotFound, "404 NOT_FOUND")]
    #[case(ErrorCode::Conflict, "409 CONFLICT")]
    #[case(ErrorCode::ServiceUnavailable, "503 SERVICE_UNAVAILABLE")]
    #[case(ErrorCode::InternalError, "500 INTERNAL_SERVER_ERROR")]
    fn status_lines_render_number_and_reason(#[case] code: ErrorCode, #[case] expected: &str) {
        assert_eq!(status_for(code).to_string(), expected);
    }

    #[rstest]
    fn conflict_envelope_matches_wire_shape() {
        let envelope = ApiError::from_error(
            "1.0",
            &Error::conflict("Country already exists"),
            "/api/v1/countries",
        );
        let value = serde_json::to_value(&envelope).expect("serialise envelope");
        assert_eq!(
            value,
            json!({
                "apiVersion": "1.0",
                "error": {
                    "code": "409 CONFLICT",
                    "message": "Country already exists",
                    "errors": [{
                        "domain": "/api/v1/countries",
                        "reason": "Country already exists",
                        "message": "Country already exists"
                    }]
                }
            })
        );
    }

    #[rstest]
    fn not_found_item_carries_the_detailed_reason() {
        let err = Error::not_found("Country not found")
            .with_reason("Country with id = [3] not found");
        let envelope = ApiError::from_error("1.0", &err, "/api/v1/country/3");
        assert_eq!(envelope.error.message, "Country not found");
        assert_eq!(envelope.error.errors[0].reason, "Country with id = [3] not found");
        assert_eq!(envelope.error.errors[0].message, "Country not found");
    }

    #[rstest]
    fn violations_become_items_in_order() {
        let err = Error::validation(vec![
            Violation::new("Size", "invalid country name"),
            Violation::new("NotBlank", "must not be blank"),
        ]);
        let envelope = ApiError::from_error("2.0", &err, "/api/v1/countries");
        let reasons: Vec<_> = envelope
            .error
            .errors
            .iter()
            .map(|item| item.reason.as_str())
            .collect();
        assert_eq!(reasons, vec!["Size", "NotBlank"]);
        assert_eq!(envelope.api_version, "2.0");
    }

    #[rstest]
    fn internal_failures_are_redacted() {
        let err = Error::internal("connection string leaked").with_trace_id("abc");
        let redacted = redact_if_internal(&err);
        assert_eq!(redacted.message(), INTERNAL_SERVER_ERROR_MESSAGE);
        assert_eq!(redacted.trace_id(), Some("abc"));

        let envelope = ApiError::from_error("1.0", &err, "/graphql");
        assert_eq!(envelope.error.code, "500 INTERNAL_SERVER_ERROR");
        assert_eq!(envelope.error.message, INTERNAL_SERVER_ERROR_MESSAGE);
    }

    #[rstest]
    fn envelope_survives_json() {
        let envelope = ApiError::from_error("1.0", &Error::not_found("Country not found"), "/x");
        let text = serde_json::to_string(&envelope).expect("serialise");
        let back: ApiError = serde_json::from_str(&text).expect("deserialise");
        assert_eq!(back, envelope);
    }
}

//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters render them through
//! the shared [`ApiError`](crate::inbound::envelope::ApiError) envelope as
//! HTTP responses, GraphQL errors or gRPC statuses.

use crate::domain::TraceId;

/// Message used for validation failures carrying more than one violation.
pub const MULTIPLE_VALIDATION_ERRORS: &str = "Bad request. Multiple validation errors";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// One or more field-level rules were violated.
    InvalidRequest,
    /// The referenced country does not exist.
    NotFound,
    /// The uniqueness invariant would be violated.
    Conflict,
    /// Storage is temporarily unreachable.
    ServiceUnavailable,
    /// An unexpected failure occurred inside the service.
    InternalError,
}

/// A single field-level rule violation.
///
/// `reason` names the rule (for example `Size`), `message` is the human
/// readable description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    reason: String,
    message: String,
}

impl Violation {
    /// Create a violation from a rule name and message.
    pub fn new(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            message: message.into(),
        }
    }

    /// Name of the violated rule.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
/// - `violations` keep the order in which they were detected.
/// - `trace_id`, when present, is non-empty.
///
/// # Examples
/// ```
/// use country_service::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Country not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    reason: Option<String>,
    violations: Vec<Violation>,
    trace_id: Option<String>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The message was blank.
    #[error("error message must not be empty")]
    EmptyMessage,
    /// The trace identifier was blank.
    #[error("trace identifier must not be empty")]
    EmptyTraceId,
}

impl Error {
    /// Create a new error, panicking if the message is blank.
    ///
    /// Intended for literal messages; use [`Error::try_new`] for dynamic
    /// input.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    ///
    /// Captures the [`TraceId`] in scope, if any.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            reason: None,
            violations: Vec::new(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        })
    }

    /// Aggregate field-level violations into a single validation failure.
    ///
    /// A single violation yields `"Bad request. <message>"`; more than one
    /// yields [`MULTIPLE_VALIDATION_ERRORS`].
    ///
    /// # Examples
    /// ```
    /// use country_service::domain::{Error, Violation, MULTIPLE_VALIDATION_ERRORS};
    ///
    /// let err = Error::validation(vec![
    ///     Violation::new("Size", "invalid country name"),
    ///     Violation::new("Size", "invalid country code"),
    /// ]);
    /// assert_eq!(err.message(), MULTIPLE_VALIDATION_ERRORS);
    /// assert_eq!(err.violations().len(), 2);
    /// ```
    pub fn validation(violations: Vec<Violation>) -> Self {
        let message = match violations.as_slice() {
            [single] => format!("Bad request. {}", single.message()),
            [] => "Bad request".to_owned(),
            _ => MULTIPLE_VALIDATION_ERRORS.to_owned(),
        };
        let mut error = Self::new(ErrorCode::InvalidRequest, message);
        error.violations = violations;
        error
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable summary.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Detailed cause, when it differs from the summary.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Field-level violations in detection order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Trace identifier captured at construction time.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach a detailed cause.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attach a trace identifier, panicking when blank.
    #[must_use]
    pub fn with_trace_id(self, trace_id: impl Into<String>) -> Self {
        match self.try_with_trace_id(trace_id) {
            Ok(value) => value,
            Err(err) => panic!("trace identifiers must satisfy validation: {err}"),
        }
    }

    /// Fallible variant of [`Error::with_trace_id`].
    pub fn try_with_trace_id(
        mut self,
        trace_id: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let trace_id = trace_id.into();
        if trace_id.trim().is_empty() {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        self.trace_id = Some(trace_id);
        Ok(self)
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`] with one
    /// violation.
    pub fn invalid_request(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self::validation(vec![Violation::new(reason, message)])
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{}: {reason}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for Error {}

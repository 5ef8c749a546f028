//! Domain primitives, services and ports.
//!
//! Purpose: own the country aggregate, the uniqueness invariant and the
//! filter predicate. Nothing here knows about HTTP, GraphQL, gRPC or SQL.
//!
//! Public surface:
//! - `Country`, `NewCountry`, `CountryPatch`, `CountryId`: the aggregate and
//!   its mutation inputs.
//! - `CountryFilter`, `CountryPageRequest`, `CountrySort`: list query inputs.
//! - `CountrySpecification`: AND of partial-text clauses built from a filter.
//! - `CountryDomainService`: implementation of the `CountryService` port.
//! - `country_commands`: existence-check-then-mutate guards for adapters.
//! - `Error`, `ErrorCode`, `Violation`: transport-agnostic failures.

pub mod country;
pub mod country_commands;
pub mod country_query;
pub mod country_service;
pub mod error;
pub mod ports;
pub mod specification;
pub mod trace_id;

pub use self::country::{Country, CountryId, CountryPatch, NewCountry, now_millis};
pub use self::country_query::{
    CountryFilter, CountryPageRequest, CountrySort, CountrySortField, SortDirection,
};
pub use self::country_service::CountryDomainService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, MULTIPLE_VALIDATION_ERRORS, Violation};
pub use self::specification::{CountryField, CountrySpecification, PartialTextClause};
pub use self::trace_id::TraceId;

//! Rendering of domain errors as GraphQL errors.
//!
//! The error message is the envelope message; `apiVersion`, `code` and the
//! `errors` item list are copied into the error extensions.

use async_graphql::{Context, ErrorExtensions, Value};

use crate::domain::Error;
use crate::inbound::envelope::ApiError;
use crate::inbound::graphql::GraphqlContext;

/// Convert `error` raised while resolving the field at `ctx`.
pub fn to_graphql_error(ctx: &Context<'_>, error: Error) -> async_graphql::Error {
    let domain = ctx
        .path_node
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let api_version = ctx
        .data::<GraphqlContext>()
        .map(|data| data.api_version.to_string())
        .unwrap_or_default();
    let envelope = ApiError::from_error(&api_version, &error, &domain);
    let items = async_graphql::to_value(&envelope.error.errors).unwrap_or(Value::Null);

    async_graphql::Error::new(envelope.error.message.clone()).extend_with(|_, extensions| {
        extensions.set("apiVersion", envelope.api_version.clone());
        extensions.set("code", envelope.error.code.clone());
        extensions.set("errors", items);
    })
}

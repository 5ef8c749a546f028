//! Inbound adapters translating REST, GraphQL and gRPC calls into domain
//! service calls while keeping framework details at the edge.
//!
//! All three share [`validation`] for request rules and [`envelope`] for
//! error rendering.

pub mod envelope;
pub mod graphql;
pub mod grpc;
pub mod http;
pub mod validation;

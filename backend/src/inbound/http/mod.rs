//! HTTP inbound adapter exposing the REST endpoints and health probes.

pub mod countries;
pub mod dto;
pub mod error;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

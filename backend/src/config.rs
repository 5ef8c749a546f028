//! Service settings loaded via OrthoConfig.
//!
//! Values layer CLI flags over `COUNTRY_*` environment variables over
//! configuration files. Every field is optional; accessors apply defaults.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_API_VERSION: &str = "1.0";
const DEFAULT_HTTP_BIND: &str = "0.0.0.0:8080";
const DEFAULT_GRPC_BIND: &str = "0.0.0.0:9090";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// A setting was present but unusable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A listen address did not parse.
    #[error("{field} is not a socket address: {value}")]
    InvalidBind {
        /// Setting name.
        field: &'static str,
        /// Raw value as supplied.
        value: String,
        /// Parser failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// A pool of zero connections was requested.
    #[error("db_max_connections must be at least 1")]
    EmptyPool,
}

/// Runtime settings for the country service.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COUNTRY")]
pub struct CountryServiceSettings {
    /// Version string echoed in error envelopes.
    pub api_version: Option<String>,
    /// Listen address for REST and GraphQL.
    pub http_bind: Option<String>,
    /// Listen address for gRPC.
    pub grpc_bind: Option<String>,
    /// PostgreSQL URL; in-memory storage is used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

fn parse_bind(
    field: &'static str,
    value: Option<&str>,
    default: &str,
) -> Result<SocketAddr, ConfigError> {
    let raw = value.unwrap_or(default);
    raw.parse().map_err(|source| ConfigError::InvalidBind {
        field,
        value: raw.to_owned(),
        source,
    })
}

impl CountryServiceSettings {
    /// Configured API version, or `1.0` when unset or blank.
    #[must_use]
    pub fn api_version(&self) -> &str {
        self.api_version
            .as_deref()
            .filter(|version| !version.trim().is_empty())
            .unwrap_or(DEFAULT_API_VERSION)
    }

    /// REST and GraphQL listen address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBind`] when the value is not a socket
    /// address.
    pub fn http_bind(&self) -> Result<SocketAddr, ConfigError> {
        parse_bind("http_bind", self.http_bind.as_deref(), DEFAULT_HTTP_BIND)
    }

    /// gRPC listen address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBind`] when the value is not a socket
    /// address.
    pub fn grpc_bind(&self) -> Result<SocketAddr, ConfigError> {
        parse_bind("grpc_bind", self.grpc_bind.as_deref(), DEFAULT_GRPC_BIND)
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Pool size, defaulting to ten.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPool`] for an explicit zero.
    pub fn db_max_connections(&self) -> Result<u32, ConfigError> {
        match self.db_max_connections {
            Some(0) => Err(ConfigError::EmptyPool),
            Some(max) => Ok(max),
            None => Ok(DEFAULT_DB_MAX_CONNECTIONS),
        }
    }
}

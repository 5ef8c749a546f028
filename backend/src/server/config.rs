//! Server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::outbound::persistence::DbPool;

/// Builder-style configuration for the HTTP and gRPC listeners.
#[derive(Clone)]
pub struct ServerConfig {
    pub(crate) http_addr: SocketAddr,
    pub(crate) grpc_addr: SocketAddr,
    pub(crate) api_version: Arc<str>,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Listeners on `http_addr` and `grpc_addr` with in-memory storage.
    #[must_use]
    pub fn new(
        http_addr: SocketAddr,
        grpc_addr: SocketAddr,
        api_version: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            http_addr,
            grpc_addr,
            api_version: api_version.into(),
            db_pool: None,
        }
    }

    /// Attach a database pool; without one the in-memory repository backs
    /// the service.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// REST and GraphQL listen address.
    #[must_use]
    pub fn http_addr(&self) -> SocketAddr {
        self.http_addr
    }

    /// gRPC listen address.
    #[must_use]
    pub fn grpc_addr(&self) -> SocketAddr {
        self.grpc_addr
    }

    /// Version echoed in error envelopes.
    #[must_use]
    pub fn api_version(&self) -> Arc<str> {
        Arc::clone(&self.api_version)
    }
}

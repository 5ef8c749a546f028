//! Service entry-point: loads settings, prepares storage, and runs the HTTP
//! and gRPC listeners side by side.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use country_service::config::CountryServiceSettings;
use country_service::inbound::http::health::HealthState;
use country_service::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
use country_service::server::{
    AppDependencies, ServerConfig, build_country_service, create_server, serve_grpc,
};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = CountryServiceSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let http_addr = settings.http_bind().map_err(std::io::Error::other)?;
    let grpc_addr = settings.grpc_bind().map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(http_addr, grpc_addr, settings.api_version());
    match settings.database_url() {
        Some(url) => {
            apply_migrations(url).await.map_err(std::io::Error::other)?;
            let pool_config = PoolConfig::new(url)
                .with_max_size(settings.db_max_connections().map_err(std::io::Error::other)?);
            let pool = DbPool::new(pool_config)
                .await
                .map_err(std::io::Error::other)?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; using in-memory storage"),
    }

    let countries = build_country_service(&config);
    let health_state = web::Data::new(HealthState::new());
    let deps = AppDependencies::new(health_state.clone(), countries.clone(), config.api_version());
    let http = create_server(deps, config.http_addr())?;
    let grpc = serve_grpc(countries, config.api_version(), config.grpc_addr());

    health_state.mark_ready();
    info!("country service ready");

    tokio::select! {
        result = http => result,
        result = grpc => {
            health_state.mark_unhealthy();
            result.map_err(|e| {
                error!(error = %e, "gRPC server stopped");
                std::io::Error::other(e)
            })
        }
    }
}

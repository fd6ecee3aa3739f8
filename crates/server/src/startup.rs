use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::init_logging;
use configs::{AppConfig, LogFormat, ServerConfig};
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Connect, migrate and wire the router for an already validated configuration.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let db_cfg = models::db::DatabaseConfig::from_settings(&cfg.database);
    let db = models::db::connect_and_migrate(&db_cfg)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    let state = ServerState::new(db, cfg.service.clone());
    Ok(routes::build_router(state))
}

/// Load `.env` and the validated configuration, then install the subscriber it asks for.
pub fn load_config_and_logging() -> Result<AppConfig, StartupError> {
    dotenv().ok();
    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    init_logging(&cfg.service.log_level, cfg.service.log_format == LogFormat::Json);
    Ok(cfg)
}

/// Serve until Ctrl+C.
pub async fn serve(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, prefix = %cfg.service.prefix, "starting todo service");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("received Ctrl+C, shutting down");
            }
        })
        .await?;
    Ok(())
}

/// Public entry: load configuration, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    let cfg = load_config_and_logging()?;
    serve(cfg).await
}

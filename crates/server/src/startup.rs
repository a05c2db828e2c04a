use std::net::SocketAddr;

use axum::Router;
use common::env::{ensure_sqlite_dir, ensure_static_dir};
use configs::{AppConfig, ServerConfig};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{routes, state::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl_c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Connect, migrate and build the router for `cfg`.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    ensure_static_dir(&cfg.server.static_dir).await;
    ensure_sqlite_dir(&cfg.database.url).await?;

    let db = models::db::connect_and_migrate(&cfg.database).await?;
    let state = ServerState::new(db, cfg)?;
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and serve it until ctrl_c.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting valve api");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("valve api stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let addr = bind_addr(&ServerConfig::default()).unwrap();
        assert_eq!(addr.port(), 5000);
        assert!(addr.ip().is_loopback());

        let bad = ServerConfig { host: "not a host".into(), ..ServerConfig::default() };
        assert!(bind_addr(&bad).is_err());
    }
}

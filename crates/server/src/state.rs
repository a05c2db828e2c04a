use configs::{AppConfig, CompatConfig};
use sea_orm::DatabaseConnection;
use service::url_to_pdf::UrlToPdfClient;

/// Shared handler state: one pooled connection, one outbound HTTP client.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub pdf: UrlToPdfClient,
    pub compat: CompatConfig,
    pub static_dir: String,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, cfg: &AppConfig) -> anyhow::Result<Self> {
        let pdf = UrlToPdfClient::new(cfg.pdf_proxy.clone())?;
        Ok(Self {
            db,
            pdf,
            compat: cfg.compat.clone(),
            static_dir: cfg.server.static_dir.clone(),
        })
    }
}

//! Client for the third-party HTML-to-PDF service (RapidAPI `html2pdf-rocket`).
//!
//! Endpoint, credential and page URL all come from [`PdfProxyConfig`].

use std::time::Duration;

use configs::PdfProxyConfig;
use serde_json::json;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Error)]
pub enum UrlToPdfError {
    #[error("pdf proxy api key is not configured")]
    MissingApiKey,
    #[error("http client error: {0}")]
    Client(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("upstream returned status {0}")]
    Upstream(u16),
}

#[derive(Clone)]
pub struct UrlToPdfClient {
    http: reqwest::Client,
    cfg: PdfProxyConfig,
}

impl UrlToPdfClient {
    pub fn new(cfg: PdfProxyConfig) -> Result<Self, UrlToPdfError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| UrlToPdfError::Client(e.to_string()))?;
        Ok(Self { http, cfg })
    }

    /// Page to convert: the caller's URL only when the config allows it.
    pub fn target_url<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested {
            Some(url) if self.cfg.allow_caller_url && !url.trim().is_empty() => url,
            _ => &self.cfg.target_url,
        }
    }

    /// POST `{"value": url}` to the service and return the PDF bytes on 200.
    #[instrument(skip(self))]
    pub async fn convert(&self, requested: Option<&str>) -> Result<Vec<u8>, UrlToPdfError> {
        if self.cfg.api_key.trim().is_empty() {
            return Err(UrlToPdfError::MissingApiKey);
        }
        let target = self.target_url(requested);
        let resp = self
            .http
            .post(&self.cfg.endpoint)
            .header("X-RapidAPI-Key", &self.cfg.api_key)
            .header("X-RapidAPI-Host", &self.cfg.rapidapi_host)
            .json(&json!({ "value": target }))
            .send()
            .await
            .map_err(|e| UrlToPdfError::Transport(e.to_string()))?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            warn!(status = status.as_u16(), %target, "pdf service rejected request");
            return Err(UrlToPdfError::Upstream(status.as_u16()));
        }
        let body = resp.bytes().await.map_err(|e| UrlToPdfError::Transport(e.to_string()))?;
        info!(%target, bytes = body.len(), "url converted to pdf");
        Ok(body.to_vec())
    }
}

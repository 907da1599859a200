//! Wire contract with the translation backend and the reqwest client that speaks it.

use crate::config::Config;
use crate::error::TranslateError;
use crate::languages::Language;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslateRequest {
    pub text: String,
    pub source_language: Language,
    pub target_language: Language,
}

/// `success` is absent on the backend's 400 replies, which only carry `error`.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateResponse {
    #[serde(default)]
    pub success: bool,
    pub translated_text: Option<String>,
    pub error: Option<String>,
}

impl TranslateResponse {
    pub fn into_result(self) -> Result<String, TranslateError> {
        if self.success {
            self.translated_text
                .ok_or_else(|| TranslateError::MalformedResponse("success without translated_text".into()))
        } else {
            Err(TranslateError::Backend(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: String,
}

#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate(&self, req: &TranslateRequest) -> Result<String, TranslateError>;
}

pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
    health_endpoint: String,
}

impl HttpBackend {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(cfg.request_timeout())
            .build()?;
        Ok(Self {
            client,
            endpoint: cfg.endpoint.clone(),
            health_endpoint: cfg.health_endpoint.clone(),
        })
    }

    pub async fn health(&self) -> Result<HealthStatus, TranslateError> {
        let resp = self.client.get(&self.health_endpoint).send().await?;
        let bytes = resp.error_for_status()?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl TranslationBackend for HttpBackend {
    async fn translate(&self, req: &TranslateRequest) -> Result<String, TranslateError> {
        log::debug!(
            "POST {} ({} chars, {} -> {})",
            self.endpoint,
            req.text.chars().count(),
            req.source_language,
            req.target_language
        );
        let resp = self.client.post(&self.endpoint).json(req).send().await?;

        // Error replies still carry a JSON body, so don't bail on the status.
        let status = resp.status();
        if !status.is_success() {
            log::warn!("Backend answered {}", status);
        }
        let bytes = resp.bytes().await?;
        let parsed: TranslateResponse = serde_json::from_slice(&bytes)?;
        parsed.into_result()
    }
}

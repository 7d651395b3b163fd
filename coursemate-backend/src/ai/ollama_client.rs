//! Typed HTTP client for a local Ollama server.

use std::time::Duration;

use async_trait::async_trait;
use ollama_types::{ErrorResponse, GenerateRequest, GenerateResponse, TagsResponse};
use reqwest::StatusCode;

use super::{AiBridge, PromptKind};
use crate::config::Config;
use crate::error::AiError;

pub struct OllamaClient {
    base_url: String,
    client: reqwest::Client,
    health_timeout: Duration,
}

impl OllamaClient {
    pub fn new(base_url: &str, request_timeout: Duration, health_timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("[AI] Failed to build HTTP client ({}), using defaults", e);
                reqwest::Client::new()
            });
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            health_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.ollama_host, config.ollama_timeout, config.health_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_tags(&self) -> Result<TagsResponse, AiError> {
        let resp = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        let body = resp.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        serde_json::from_str(&body)
            .map_err(|e| AiError::InvalidResponse(format!("Parse tags response: {}", e)))
    }
}

#[async_trait]
impl AiBridge for OllamaClient {
    async fn is_available(&self) -> bool {
        match self.fetch_tags().await {
            Ok(_) => true,
            Err(e) => {
                log::debug!("[AI] Health check failed: {}", e);
                false
            }
        }
    }

    async fn generate(&self, kind: PromptKind, input: &str, model: &str) -> Result<String, AiError> {
        let body = GenerateRequest::new(model, input)
            .with_system(kind.system_prompt())
            .with_temperature(kind.temperature());

        log::debug!("[AI] {} request to model {}", kind.as_ref(), model);
        let resp = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        let text = resp.text().await.map_err(transport_error)?;
        if !status.is_success() {
            let err = status_error(status, &text);
            log::warn!("[AI] {} request failed: {}", kind.as_ref(), err);
            return Err(err);
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| AiError::InvalidResponse(format!("Parse generate response: {}", e)))?;
        if let Some(error) = parsed.error {
            return Err(AiError::Model(error));
        }
        Ok(parsed.response)
    }

    async fn list_models(&self) -> Vec<String> {
        match self.fetch_tags().await {
            Ok(tags) => tags.model_names(),
            Err(e) => {
                log::debug!("[AI] Could not list models: {}", e);
                Vec::new()
            }
        }
    }
}

/// Failures before a status line arrives: the service is down or too slow.
fn transport_error(e: reqwest::Error) -> AiError {
    if e.is_timeout() {
        AiError::Unavailable(format!("request timed out, the model may be slow or overloaded: {}", e))
    } else {
        AiError::Unavailable(format!("request failed: {}", e))
    }
}

/// Non-2xx replies. Client errors and server errors carrying an `error`
/// message point at the model; anything else means the service is unwell.
fn status_error(status: StatusCode, body: &str) -> AiError {
    let message = serde_json::from_str::<ErrorResponse>(body).ok().map(|e| e.error);
    match message {
        Some(message) => AiError::Model(format!("HTTP {}: {}", status, message)),
        None if status.is_client_error() => AiError::Model(format!("HTTP {}: {}", status, body.trim())),
        None => AiError::Unavailable(format!("HTTP {}: {}", status, body.trim())),
    }
}

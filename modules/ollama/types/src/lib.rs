//! Wire types for the local Ollama HTTP API used by the CourseMate AI bridge.

use serde::{Deserialize, Serialize};

// =====================================================
// Request Types
// =====================================================

/// Body of `POST /api/generate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// CourseMate never streams; the whole response arrives in one body.
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub options: GenerateOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    pub temperature: f32,
    /// Upper bound on generated tokens
    pub num_predict: u32,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
            system: None,
            options: GenerateOptions {
                temperature: 0.2,
                num_predict: 512,
            },
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.options.temperature = temperature;
        self
    }
}

// =====================================================
// Response Types
// =====================================================

/// Body returned by `POST /api/generate` when `stream` is false
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub done: bool,
    /// Present instead of `response` when the server rejects the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error body Ollama sends with non-2xx statuses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body returned by `GET /api/tags`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

/// A locally installed model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
}

impl TagsResponse {
    pub fn model_names(&self) -> Vec<String> {
        self.models
            .iter()
            .map(|m| m.name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_omits_missing_system() {
        let body = serde_json::to_value(GenerateRequest::new("llama3", "hi")).unwrap();
        assert_eq!(body["stream"], false);
        assert!(body.get("system").is_none());
        assert_eq!(body["options"]["num_predict"], 512);
    }

    #[test]
    fn test_tags_response_skips_blank_names() {
        let tags: TagsResponse = serde_json::from_str(
            r#"{"models":[{"name":"llama3:latest"},{"name":"  "},{"name":"mistral","size":42}]}"#,
        )
        .unwrap();
        assert_eq!(tags.model_names(), vec!["llama3:latest", "mistral"]);
    }

    #[test]
    fn test_generate_response_tolerates_error_body() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"error":"model 'nope' not found"}"#).unwrap();
        assert!(resp.response.is_empty());
        assert_eq!(resp.error.as_deref(), Some("model 'nope' not found"));
    }
}

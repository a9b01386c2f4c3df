//! OpenAI-compatible chat completions adapter.
//!
//! Implements [`InferenceGateway`] against any endpoint speaking the OpenAI
//! `/chat/completions` wire format. The default configuration targets the
//! DeepSeek API, but the base URL and model are plain config values, so the
//! same adapter serves OpenAI proper, Azure deployments, or a local server.

use crate::config::FileInferenceConfig;
use async_trait::async_trait;
use rostrum_application::ports::inference::{GatewayError, InferenceGateway};
use rostrum_domain::prompt::StagePrompt;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Adapter for OpenAI-compatible chat completions endpoints.
pub struct OpenAiCompatGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiCompatGateway {
    /// Build the adapter from file configuration.
    ///
    /// The API key comes from `api_key` when set, otherwise from the
    /// environment variable named by `api_key_env`. A missing key is a
    /// construction error, surfaced before any debate starts.
    pub fn from_config(config: &FileInferenceConfig) -> Result<Self, GatewayError> {
        let api_key = match &config.api_key {
            Some(key) => key.clone(),
            None => std::env::var(&config.api_key_env).map_err(|_| {
                GatewayError::Other(format!(
                    "API key not found: set {} or [inference].api_key",
                    config.api_key_env
                ))
            })?,
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Other(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    fn request_body(&self, prompt: &StagePrompt) -> Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": prompt.system },
                { "role": "user", "content": prompt.user },
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        })
    }
}

#[async_trait]
impl InferenceGateway for OpenAiCompatGateway {
    async fn infer(&self, prompt: &StagePrompt) -> Result<String, GatewayError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %self.model, user_bytes = prompt.user.len(), "inference request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else if e.is_connect() {
                    GatewayError::ConnectionError(e.to_string())
                } else {
                    GatewayError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "{status}: {detail}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;
        extract_content(&body)
    }
}

/// Pull the assistant text out of a chat completions response.
fn extract_content(body: &Value) -> Result<String, GatewayError> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            GatewayError::MalformedResponse("missing choices[0].message.content".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> OpenAiCompatGateway {
        let config = FileInferenceConfig {
            api_key: Some("test-key".to_string()),
            base_url: "https://api.deepseek.com/v1/".to_string(),
            ..FileInferenceConfig::default()
        };
        OpenAiCompatGateway::from_config(&config).unwrap()
    }

    #[test]
    fn test_request_body_shape() {
        let gw = gateway();
        let prompt = StagePrompt {
            system: "You are The Economist.".to_string(),
            user: "Deliver your opening statement.".to_string(),
        };
        let body = gw.request_body(&prompt);
        assert_eq!(body["model"], "deepseek-chat");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Deliver your opening statement.");
        assert_eq!(body["max_tokens"], 2000);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let gw = gateway();
        assert_eq!(gw.base_url, "https://api.deepseek.com/v1");
    }

    #[test]
    fn test_extract_content() {
        let body = serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "A fine point." } }
            ]
        });
        assert_eq!(extract_content(&body).unwrap(), "A fine point.");
    }

    #[test]
    fn test_extract_content_missing_is_malformed() {
        let body = serde_json::json!({ "choices": [] });
        assert!(matches!(
            extract_content(&body),
            Err(GatewayError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_missing_api_key_is_construction_error() {
        let config = FileInferenceConfig {
            api_key: None,
            api_key_env: "ROSTRUM_TEST_KEY_THAT_DOES_NOT_EXIST".to_string(),
            ..FileInferenceConfig::default()
        };
        assert!(OpenAiCompatGateway::from_config(&config).is_err());
    }
}

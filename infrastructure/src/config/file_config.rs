//! TOML configuration file schema
//!
//! Mirrors the sections of `rostrum.toml`. Every field has a default, so a
//! missing file or a partial file always yields a usable configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Debate composition (`[debate]` section)
    pub debate: FileDebateConfig,
    /// Inference provider settings (`[inference]` section)
    pub inference: FileInferenceConfig,
    /// Retrieval settings (`[retrieval]` section)
    pub retrieval: FileRetrievalConfig,
    /// Transcript logging settings (`[logging]` section)
    pub logging: FileLoggingConfig,
}

/// Debate composition from TOML (`[debate]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// Participant keys, in panel order.
    pub participants: Vec<String>,
    /// Free-debate rounds.
    pub max_rounds: usize,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            participants: vec![
                "environmentalist".to_string(),
                "economist".to_string(),
                "technologist".to_string(),
            ],
            max_rounds: 2,
        }
    }
}

/// Inference provider configuration (`[inference]` section)
///
/// Targets any OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInferenceConfig {
    /// Environment variable name for the API key.
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL of the chat completions API.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Max tokens per turn.
    pub max_tokens: u32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FileInferenceConfig {
    fn default() -> Self {
        Self {
            api_key_env: "DEEPSEEK_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.deepseek.com/v1".to_string(),
            model: "deepseek-chat".to_string(),
            temperature: 0.8,
            max_tokens: 2000,
            timeout_secs: 60,
        }
    }
}

/// Retrieval configuration (`[retrieval]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetrievalConfig {
    /// Whether reference material is fetched at all.
    pub enabled: bool,
    /// Upper bound on items per participant.
    pub max_items: usize,
}

impl Default for FileRetrievalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_items: 3,
        }
    }
}

/// Transcript logging configuration (`[logging]` section)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript log path; None disables the transcript log.
    pub transcript_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.debate.participants.len(), 3);
        assert_eq!(config.debate.max_rounds, 2);
        assert_eq!(config.inference.model, "deepseek-chat");
        assert_eq!(config.inference.api_key_env, "DEEPSEEK_API_KEY");
        assert!(config.retrieval.enabled);
        assert!(config.logging.transcript_path.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [debate]
            max_rounds = 4

            [inference]
            model = "deepseek-reasoner"
            "#,
        )
        .unwrap();
        assert_eq!(config.debate.max_rounds, 4);
        assert_eq!(config.debate.participants.len(), 3);
        assert_eq!(config.inference.model, "deepseek-reasoner");
        assert_eq!(config.inference.max_tokens, 2000);
    }
}

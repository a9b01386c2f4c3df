//! Inference gateway port
//!
//! Defines the interface for obtaining spoken turn content from an external
//! text-generation service. The core never retries; any retry policy belongs
//! to the adapter behind this port.

use async_trait::async_trait;
use rostrum_domain::prompt::StagePrompt;
use thiserror::Error;

/// Errors that can occur during inference gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for turn content generation
///
/// This port defines how the application layer talks to the inference
/// service. Implementations (adapters) live in the infrastructure layer.
/// A failure here never fails a turn; the turn generator substitutes a
/// placeholder and the debate advances.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// Generate prose for one composed prompt
    async fn infer(&self, prompt: &StagePrompt) -> Result<String, GatewayError>;
}

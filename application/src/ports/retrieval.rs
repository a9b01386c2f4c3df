//! Context retrieval port
//!
//! Defines the interface for fetching reference material for a participant.
//! The orchestrator calls it at most once per participant per debate; the
//! result (including "nothing found") is cached on the debate state.

use async_trait::async_trait;
use rostrum_domain::{ParticipantProfile, Topic};
use thiserror::Error;

/// Errors that can occur during retrieval operations
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Outcome of a successful retrieval call
///
/// `Nothing` is an authoritative answer, not an error: the service was
/// reached and had no material. Both outcomes are cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievedContext {
    /// Formatted reference material
    Found(String),
    /// The service answered with no usable material
    Nothing,
}

/// Retriever of per-participant reference material
#[async_trait]
pub trait ContextRetriever: Send + Sync {
    /// Fetch reference material for one participant on one topic
    async fn retrieve(
        &self,
        profile: &ParticipantProfile,
        topic: &Topic,
        max_items: usize,
    ) -> Result<RetrievedContext, RetrievalError>;
}

/// Retriever used when retrieval is switched off; always finds nothing
pub struct DisabledRetriever;

#[async_trait]
impl ContextRetriever for DisabledRetriever {
    async fn retrieve(
        &self,
        _profile: &ParticipantProfile,
        _topic: &Topic,
        _max_items: usize,
    ) -> Result<RetrievedContext, RetrievalError> {
        Ok(RetrievedContext::Nothing)
    }
}

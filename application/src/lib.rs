//! Application layer for rostrum
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DebateParams, RetrievalOptions};
pub use ports::{
    inference::{GatewayError, InferenceGateway},
    progress::{DebateProgress, NoDebateProgress},
    retrieval::{ContextRetriever, DisabledRetriever, RetrievalError, RetrievedContext},
    transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger},
};
pub use use_cases::run_debate::{
    DebateEvent, DebateReport, DebateRun, RunDebateError, RunDebateInput, RunDebateUseCase,
};

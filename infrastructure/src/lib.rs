//! Infrastructure layer for rostrum
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod retrieval;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileDebateConfig, FileInferenceConfig, FileLoggingConfig,
    FileRetrievalConfig,
};
pub use logging::JsonlTranscriptLogger;
pub use providers::OpenAiCompatGateway;
pub use retrieval::DuckDuckGoRetriever;

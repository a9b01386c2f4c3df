//! Configuration file loading

pub mod file_config;
pub mod loader;

pub use file_config::{
    FileConfig, FileDebateConfig, FileInferenceConfig, FileLoggingConfig, FileRetrievalConfig,
};
pub use loader::ConfigLoader;

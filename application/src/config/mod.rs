//! Application configuration

pub mod execution;

pub use execution::{DebateParams, RetrievalOptions};

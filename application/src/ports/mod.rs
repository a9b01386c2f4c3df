//! Port definitions (interfaces to the infrastructure layer)

pub mod inference;
pub mod progress;
pub mod retrieval;
pub mod transcript_logger;

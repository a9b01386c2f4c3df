//! Core domain types shared across modules

pub mod error;
pub mod topic;

pub use error::DomainError;
pub use topic::Topic;

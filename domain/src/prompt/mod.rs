//! Stage-specific prompt composition

pub mod template;

pub use template::{PromptTemplate, StagePrompt};

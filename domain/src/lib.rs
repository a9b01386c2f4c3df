//! Domain layer for rostrum
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Four-Stage Debate
//!
//! A debate runs a fixed panel of 3-6 participants through four sequential
//! stages:
//!
//! - **Opening**: every participant states their position once, in panel order
//! - **Questioning**: every participant authors exactly one question; the
//!   addressed participant always answers on the very next turn
//! - **Free debate**: `max_rounds` rotations of rebuttals in panel order
//! - **Closing**: every participant sums up once, in panel order
//!
//! ## Scheduling
//!
//! The [`scheduler`](debate::scheduler) is the state machine at the heart of
//! the engine: given the current [`DebateState`] it decides who speaks next,
//! when a stage boundary is crossed, and when the debate terminates.

pub mod core;
pub mod debate;
pub mod participant;
pub mod prompt;

// Re-export commonly used types
pub use core::{error::DomainError, topic::Topic};
pub use debate::{
    qa::QaRecord,
    scheduler::{Actor, next_actor, select_questioner, select_target},
    stage::Stage,
    state::{DebatePanel, DebateState, TurnDelta},
    transcript::{TurnKind, TurnRecord},
};
pub use participant::{
    profile::ParticipantProfile,
    registry::{ParticipantId, ParticipantRegistry},
};
pub use prompt::template::PromptTemplate;

//! Domain error types

use thiserror::Error;

/// Panel size bounds for a debate.
pub const MIN_PARTICIPANTS: usize = 3;
pub const MAX_PARTICIPANTS: usize = 6;

/// Domain-level errors
///
/// All of these are configuration errors: they are surfaced before any turn
/// executes and terminate the debate construction.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(
        "A debate requires between {MIN_PARTICIPANTS} and {MAX_PARTICIPANTS} participants, got {0}"
    )]
    InvalidPanelSize(usize),

    #[error("Participant {0} appears more than once in the panel")]
    DuplicateParticipant(String),

    #[error("Unknown participant key: {0}")]
    UnknownParticipant(String),

    #[error("max_rounds must be at least 1")]
    InvalidRoundCount,

    #[error("Invalid topic: {0}")]
    InvalidTopic(String),
}

impl DomainError {
    /// Check if this error concerns the panel composition
    pub fn is_panel_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidPanelSize(_)
                | DomainError::DuplicateParticipant(_)
                | DomainError::UnknownParticipant(_)
        )
    }
}

//! Transcript turn records

use super::stage::Stage;
use crate::participant::registry::ParticipantId;
use serde::{Deserialize, Serialize};

/// What kind of contribution a turn is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    /// Opening or closing statement
    Statement,
    /// A question posed during the questioning stage
    Question,
    /// The answer paired with the most recent question
    Answer,
    /// A free-debate contribution
    Rebuttal,
    /// System announcement of a stage boundary; carries no participant
    StageAnnouncement,
}

impl TurnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnKind::Statement => "statement",
            TurnKind::Question => "question",
            TurnKind::Answer => "answer",
            TurnKind::Rebuttal => "rebuttal",
            TurnKind::StageAnnouncement => "stage_announcement",
        }
    }

    /// Whether this turn consumes a scheduling slot (announcements do not)
    pub fn is_spoken(&self) -> bool {
        !matches!(self, TurnKind::StageAnnouncement)
    }
}

impl std::fmt::Display for TurnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the append-only transcript
///
/// There is exactly one content representation: a required text field. A
/// spoken turn always has a speaker; a stage announcement never does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    /// The participant who spoke; None for stage announcements
    pub speaker: Option<ParticipantId>,
    /// The stage this turn belongs to
    pub stage: Stage,
    /// Stage-relative round number; only set during free debate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<usize>,
    /// What kind of contribution this is
    pub kind: TurnKind,
    /// The canonical turn content (name-prefixed for spoken turns)
    pub content: String,
}

impl TurnRecord {
    /// Create a spoken turn record
    pub fn spoken(
        speaker: ParticipantId,
        stage: Stage,
        kind: TurnKind,
        content: impl Into<String>,
    ) -> Self {
        Self {
            speaker: Some(speaker),
            stage,
            round: None,
            kind,
            content: content.into(),
        }
    }

    /// Create a system announcement for entry into a stage
    pub fn announcement(stage: Stage) -> Self {
        Self {
            speaker: None,
            stage,
            round: None,
            kind: TurnKind::StageAnnouncement,
            content: stage.announcement().to_string(),
        }
    }

    /// Attach the stage-relative round number (free debate only)
    pub fn with_round(mut self, round: usize) -> Self {
        self.round = Some(round);
        self
    }

    /// Whether this record consumes a scheduling slot
    pub fn is_spoken(&self) -> bool {
        self.kind.is_spoken()
    }
}

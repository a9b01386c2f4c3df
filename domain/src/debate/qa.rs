//! Question/answer ledger records

use crate::participant::registry::ParticipantId;
use serde::{Deserialize, Serialize};

/// One question paired with its (initially empty) answer
///
/// Appended when a question-turn executes; the `answer` field is filled by
/// the forced answer-turn that immediately follows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaRecord {
    /// Who asked
    pub questioner: ParticipantId,
    /// Who was addressed
    pub target: ParticipantId,
    /// The question content
    pub question: String,
    /// The answer content; empty until the answer-turn executes
    pub answer: String,
}

impl QaRecord {
    /// Create a new record with an empty answer
    pub fn new(
        questioner: ParticipantId,
        target: ParticipantId,
        question: impl Into<String>,
    ) -> Self {
        Self {
            questioner,
            target,
            question: question.into(),
            answer: String::new(),
        }
    }

    /// Whether the paired answer has been recorded
    pub fn is_answered(&self) -> bool {
        !self.answer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_unanswered() {
        let record = QaRecord::new(
            ParticipantId::Sociologist,
            ParticipantId::Technologist,
            "The Sociologist: Who bears the cost of automation?",
        );
        assert!(!record.is_answered());
        assert!(record.answer.is_empty());
    }
}

//! The mutable debate aggregate
//!
//! [`DebateState`] is the single record of an in-progress debate. It has a
//! single-writer discipline: the orchestrator commits [`TurnDelta`]s and
//! stage entries; every other component only reads. All fields carry fixed
//! defaults from construction, so readers never need to default-fill.

use super::qa::QaRecord;
use super::stage::Stage;
use super::transcript::{TurnKind, TurnRecord};
use crate::core::error::{DomainError, MAX_PARTICIPANTS, MIN_PARTICIPANTS};
use crate::core::topic::Topic;
use crate::participant::registry::ParticipantId;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// The ordered, validated panel of active participants (Value Object)
///
/// Construction fails fast on an invalid panel, before any turn executes.
/// The order fixes the opening, closing, and free-debate rotation.
#[derive(Debug, Clone, Serialize)]
pub struct DebatePanel {
    members: Vec<ParticipantId>,
}

impl DebatePanel {
    /// Validate and create a panel
    ///
    /// Fails if the panel has fewer than 3 or more than 6 members, or if any
    /// member appears twice.
    pub fn new(members: Vec<ParticipantId>) -> Result<Self, DomainError> {
        if !(MIN_PARTICIPANTS..=MAX_PARTICIPANTS).contains(&members.len()) {
            return Err(DomainError::InvalidPanelSize(members.len()));
        }
        let mut seen = HashSet::new();
        for member in &members {
            if !seen.insert(*member) {
                return Err(DomainError::DuplicateParticipant(member.to_string()));
            }
        }
        Ok(Self { members })
    }

    /// Parse and validate a panel from string keys
    pub fn from_keys<S: AsRef<str>>(keys: &[S]) -> Result<Self, DomainError> {
        let members = keys
            .iter()
            .map(|k| k.as_ref().parse())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(members)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[ParticipantId] {
        &self.members
    }

    /// The member at a rotation position
    pub fn get(&self, index: usize) -> Option<ParticipantId> {
        self.members.get(index).copied()
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.members.contains(&id)
    }

    /// Position of a member in the rotation order
    pub fn position(&self, id: ParticipantId) -> Option<usize> {
        self.members.iter().position(|m| *m == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.members.iter().copied()
    }
}

/// The state change produced by one spoken turn
///
/// Produced by the turn content generator, committed by the orchestrator via
/// [`DebateState::apply`]. The content is always the canonical name-prefixed
/// text.
#[derive(Debug, Clone)]
pub enum TurnDelta {
    /// Opening statement: archived into `opening_statements`
    Opening {
        speaker: ParticipantId,
        content: String,
    },
    /// Question turn: appends a QA record and arms the answer cursor
    Question {
        questioner: ParticipantId,
        target: ParticipantId,
        content: String,
    },
    /// Answer turn: fills the latest QA record and clears the cursor
    Answer {
        responder: ParticipantId,
        content: String,
    },
    /// Free-debate rebuttal: transcript only
    Rebuttal {
        speaker: ParticipantId,
        content: String,
    },
    /// Closing statement: archived into `closing_statements`
    Closing {
        speaker: ParticipantId,
        content: String,
    },
}

impl TurnDelta {
    /// The participant this delta is attributed to
    pub fn speaker(&self) -> ParticipantId {
        match self {
            TurnDelta::Opening { speaker, .. }
            | TurnDelta::Rebuttal { speaker, .. }
            | TurnDelta::Closing { speaker, .. } => *speaker,
            TurnDelta::Question { questioner, .. } => *questioner,
            TurnDelta::Answer { responder, .. } => *responder,
        }
    }

    /// The transcript kind this delta produces
    pub fn kind(&self) -> TurnKind {
        match self {
            TurnDelta::Opening { .. } | TurnDelta::Closing { .. } => TurnKind::Statement,
            TurnDelta::Question { .. } => TurnKind::Question,
            TurnDelta::Answer { .. } => TurnKind::Answer,
            TurnDelta::Rebuttal { .. } => TurnKind::Rebuttal,
        }
    }
}

/// The mutable aggregate for one debate instance (Entity)
///
/// Created fresh per debate, threaded through every scheduling step, and
/// discarded at termination. Not persisted.
#[derive(Debug, Clone, Serialize)]
pub struct DebateState {
    topic: Topic,
    panel: DebatePanel,
    stage: Stage,
    stage_progress: usize,
    max_rounds: usize,
    transcript: Vec<TurnRecord>,
    opening_statements: HashMap<ParticipantId, String>,
    closing_statements: HashMap<ParticipantId, String>,
    questions_asked: Vec<QaRecord>,
    current_questioner: Option<ParticipantId>,
    current_target: Option<ParticipantId>,
    waiting_for_answer: bool,
    context_cache: HashMap<ParticipantId, String>,
    context_fetched: HashSet<ParticipantId>,
    total_turns: usize,
}

impl DebateState {
    /// Create a fresh debate in the opening stage
    ///
    /// Fails fast on `max_rounds == 0`. Panel validation happens in
    /// [`DebatePanel::new`].
    pub fn new(topic: Topic, panel: DebatePanel, max_rounds: usize) -> Result<Self, DomainError> {
        if max_rounds == 0 {
            return Err(DomainError::InvalidRoundCount);
        }
        Ok(Self {
            topic,
            panel,
            stage: Stage::Opening,
            stage_progress: 0,
            max_rounds,
            transcript: Vec::new(),
            opening_statements: HashMap::new(),
            closing_statements: HashMap::new(),
            questions_asked: Vec::new(),
            current_questioner: None,
            current_target: None,
            waiting_for_answer: false,
            context_cache: HashMap::new(),
            context_fetched: HashSet::new(),
            total_turns: 0,
        })
    }

    // ---- read access -----------------------------------------------------

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn panel(&self) -> &DebatePanel {
        &self.panel
    }

    pub fn participant_count(&self) -> usize {
        self.panel.len()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Completed turns within the current stage
    pub fn stage_progress(&self) -> usize {
        self.stage_progress
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    pub fn transcript(&self) -> &[TurnRecord] {
        &self.transcript
    }

    pub fn opening_statements(&self) -> &HashMap<ParticipantId, String> {
        &self.opening_statements
    }

    pub fn closing_statements(&self) -> &HashMap<ParticipantId, String> {
        &self.closing_statements
    }

    pub fn questions_asked(&self) -> &[QaRecord] {
        &self.questions_asked
    }

    pub fn current_questioner(&self) -> Option<ParticipantId> {
        self.current_questioner
    }

    pub fn current_target(&self) -> Option<ParticipantId> {
        self.current_target
    }

    pub fn waiting_for_answer(&self) -> bool {
        self.waiting_for_answer
    }

    /// Total spoken turns so far (announcements excluded)
    pub fn total_turns(&self) -> usize {
        self.total_turns
    }

    /// One-indexed free-debate round implied by the current progress
    pub fn current_round(&self) -> usize {
        self.stage_progress / self.panel.len() + 1
    }

    /// Spoken turns a full run of this debate will produce:
    /// `N * (4 + max_rounds)`
    ///
    /// Questioning counts double: every question-turn forces a paired
    /// answer-turn, so the stage yields 2N spoken turns.
    pub fn expected_spoken_turns(&self) -> usize {
        self.panel.len() * (4 + self.max_rounds)
    }

    // ---- context cache ---------------------------------------------------

    /// Whether the cache entry for a participant is authoritative
    /// (distinguishes "fetched, found nothing" from "never attempted")
    pub fn is_context_fetched(&self, id: ParticipantId) -> bool {
        self.context_fetched.contains(&id)
    }

    /// Cached reference material for a participant, if fetched
    pub fn context_for(&self, id: ParticipantId) -> Option<&str> {
        self.context_cache.get(&id).map(String::as_str)
    }

    /// Commit a retrieval result for a participant
    ///
    /// At-most-once per debate: a second commit for the same participant is
    /// ignored.
    pub fn cache_context(&mut self, id: ParticipantId, text: impl Into<String>) {
        if self.context_fetched.insert(id) {
            self.context_cache.insert(id, text.into());
        }
    }

    // ---- mutation (orchestrator only) ------------------------------------

    /// Cross a stage boundary
    ///
    /// Resets `stage_progress` to 0 (the only place it is ever reset),
    /// records a system announcement, and, on entry into questioning, resets
    /// the QA ledger and cursor. Returns the committed announcement record.
    pub fn enter_stage(&mut self, target: Stage) -> TurnRecord {
        self.stage = target;
        self.stage_progress = 0;
        if target == Stage::Questioning {
            self.questions_asked.clear();
            self.current_questioner = None;
            self.current_target = None;
            self.waiting_for_answer = false;
        }
        let record = TurnRecord::announcement(target);
        self.transcript.push(record.clone());
        record
    }

    /// Commit one spoken turn
    ///
    /// Appends to the transcript, performs the stage-specific archival, and
    /// advances both the stage progress counter and the global turn counter.
    /// Returns the committed transcript record.
    pub fn apply(&mut self, delta: TurnDelta) -> TurnRecord {
        let record = match delta {
            TurnDelta::Opening { speaker, content } => {
                self.opening_statements.insert(speaker, content.clone());
                TurnRecord::spoken(speaker, self.stage, TurnKind::Statement, content)
            }
            TurnDelta::Question {
                questioner,
                target,
                content,
            } => {
                self.questions_asked
                    .push(QaRecord::new(questioner, target, content.clone()));
                self.current_questioner = Some(questioner);
                self.current_target = Some(target);
                self.waiting_for_answer = true;
                TurnRecord::spoken(questioner, self.stage, TurnKind::Question, content)
            }
            TurnDelta::Answer { responder, content } => {
                if let Some(record) = self.questions_asked.last_mut() {
                    record.answer = content.clone();
                }
                self.current_questioner = None;
                self.current_target = None;
                self.waiting_for_answer = false;
                TurnRecord::spoken(responder, self.stage, TurnKind::Answer, content)
            }
            TurnDelta::Rebuttal { speaker, content } => {
                let round = self.current_round();
                TurnRecord::spoken(speaker, self.stage, TurnKind::Rebuttal, content)
                    .with_round(round)
            }
            TurnDelta::Closing { speaker, content } => {
                self.closing_statements.insert(speaker, content.clone());
                TurnRecord::spoken(speaker, self.stage, TurnKind::Statement, content)
            }
        };

        self.transcript.push(record.clone());
        self.stage_progress += 1;
        self.total_turns += 1;
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> DebatePanel {
        DebatePanel::new(vec![
            ParticipantId::Technologist,
            ParticipantId::Sociologist,
            ParticipantId::Ethicist,
        ])
        .unwrap()
    }

    fn state() -> DebateState {
        DebateState::new(Topic::new("AI and education"), panel(), 2).unwrap()
    }

    #[test]
    fn test_panel_rejects_too_small() {
        let result = DebatePanel::new(vec![ParticipantId::Economist, ParticipantId::Ethicist]);
        assert!(matches!(result, Err(DomainError::InvalidPanelSize(2))));
    }

    #[test]
    fn test_panel_rejects_duplicates() {
        let result = DebatePanel::new(vec![
            ParticipantId::Economist,
            ParticipantId::Economist,
            ParticipantId::Ethicist,
        ]);
        assert!(matches!(result, Err(DomainError::DuplicateParticipant(_))));
    }

    #[test]
    fn test_panel_from_keys() {
        let panel = DebatePanel::from_keys(&["economist", "sociologist", "ethicist"]).unwrap();
        assert_eq!(panel.len(), 3);
        assert_eq!(panel.get(0), Some(ParticipantId::Economist));
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let result = DebateState::new(Topic::new("t"), panel(), 0);
        assert!(matches!(result, Err(DomainError::InvalidRoundCount)));
    }

    #[test]
    fn test_opening_delta_archives_statement() {
        let mut state = state();
        let record = state.apply(TurnDelta::Opening {
            speaker: ParticipantId::Technologist,
            content: "The Technologist: Innovation first.".to_string(),
        });
        assert_eq!(record.kind, TurnKind::Statement);
        assert_eq!(state.stage_progress(), 1);
        assert_eq!(state.total_turns(), 1);
        assert!(
            state
                .opening_statements()
                .contains_key(&ParticipantId::Technologist)
        );
    }

    #[test]
    fn test_question_then_answer_cursor() {
        let mut state = state();
        state.enter_stage(Stage::Questioning);

        state.apply(TurnDelta::Question {
            questioner: ParticipantId::Sociologist,
            target: ParticipantId::Technologist,
            content: "The Sociologist: Who is displaced?".to_string(),
        });
        assert!(state.waiting_for_answer());
        assert_eq!(state.current_target(), Some(ParticipantId::Technologist));
        assert!(!state.questions_asked()[0].is_answered());

        state.apply(TurnDelta::Answer {
            responder: ParticipantId::Technologist,
            content: "The Technologist: Retraining absorbs it.".to_string(),
        });
        assert!(!state.waiting_for_answer());
        assert!(state.current_target().is_none());
        assert!(state.questions_asked()[0].is_answered());
    }

    #[test]
    fn test_enter_stage_resets_progress_and_qa() {
        let mut state = state();
        state.apply(TurnDelta::Opening {
            speaker: ParticipantId::Technologist,
            content: "x".to_string(),
        });
        assert_eq!(state.stage_progress(), 1);

        let record = state.enter_stage(Stage::Questioning);
        assert_eq!(state.stage(), Stage::Questioning);
        assert_eq!(state.stage_progress(), 0);
        assert!(state.questions_asked().is_empty());
        assert_eq!(record.kind, TurnKind::StageAnnouncement);
    }

    #[test]
    fn test_rebuttal_records_round() {
        let mut state = state();
        state.enter_stage(Stage::FreeDebate);
        for i in 0..4 {
            let speaker = state.panel().get(i % 3).unwrap();
            let record = state.apply(TurnDelta::Rebuttal {
                speaker,
                content: format!("{}: point {}", speaker.display_name(), i),
            });
            assert_eq!(record.round, Some(i / 3 + 1));
        }
    }

    #[test]
    fn test_context_cache_is_write_once() {
        let mut state = state();
        assert!(!state.is_context_fetched(ParticipantId::Ethicist));
        state.cache_context(ParticipantId::Ethicist, "first");
        state.cache_context(ParticipantId::Ethicist, "second");
        assert_eq!(state.context_for(ParticipantId::Ethicist), Some("first"));
    }

    #[test]
    fn test_expected_spoken_turns_counts_answer_turns() {
        // N=3, max_rounds=2: opening 3 + questioning 6 + free debate 6 +
        // closing 3
        assert_eq!(state().expected_spoken_turns(), 18);
    }
}

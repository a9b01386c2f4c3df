//! Stage-specific prompt builders
//!
//! Pure string assembly over a [`DebateState`] read-only view. The builders
//! never touch the network and never mutate state; the turn content
//! generator in the application layer picks the builder matching the
//! scheduled turn and hands the result to the inference gateway.

use crate::debate::stage::Stage;
use crate::debate::state::DebateState;
use crate::participant::registry::ParticipantId;

/// How many trailing transcript turns the free-debate prompt shows
pub const HISTORY_WINDOW: usize = 6;

/// Character budget for each rival opening statement in the closing digest
pub const OPENING_DIGEST_LIMIT: usize = 100;

/// Fixed framing of the core controversy, shown in every closing prompt
pub const CONTROVERSY_SUMMARY: &str = "The debate has surfaced a core tension: \
how to weigh innovation and growth against their social, ethical, and \
environmental costs, and who should bear the burden of that trade-off.";

/// A composed system/user prompt pair for one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagePrompt {
    pub system: String,
    pub user: String,
}

/// Builder for every stage-specific prompt shape
///
/// Stateless; the state and cached context are passed per call.
pub struct PromptTemplate;

impl PromptTemplate {
    /// Persona system prompt shared by all stages
    pub fn system_prompt(speaker: ParticipantId, topic: &str) -> String {
        let profile = speaker.profile();
        format!(
            "You are {name}, a {role} taking part in a formal multi-party debate \
             on the topic \"{topic}\".\n\
             Your focus: {focus}.\n\
             Your perspective: {perspective}.\n\
             Background: {bio}\n\
             Speaking style: {style}.\n\
             Stay in character, argue from your expertise, and keep each \
             contribution to a few tight paragraphs.",
            name = profile.display_name,
            role = profile.role,
            topic = topic,
            focus = profile.focus,
            perspective = profile.perspective,
            bio = profile.bio,
            style = profile.speaking_style,
        )
    }

    /// Opening statement: role, speaking position, the roster, and context
    pub fn opening(state: &DebateState, speaker: ParticipantId, context: &str) -> StagePrompt {
        let position = state
            .panel()
            .position(speaker)
            .map(|p| p + 1)
            .unwrap_or(state.stage_progress() + 1);
        let user = format!(
            "The debate on \"{topic}\" is opening. You speak in position {position} \
             of {n}.\n\n\
             The other participants are:\n{roster}\n\
             Reference material gathered for you:\n{context}\n\n\
             Deliver your opening statement: state your position on the topic \
             from your own perspective.",
            topic = state.topic(),
            position = position,
            n = state.participant_count(),
            roster = roster_excluding(state, speaker),
            context = context,
        );
        StagePrompt {
            system: Self::system_prompt(speaker, state.topic().content()),
            user,
        }
    }

    /// Question turn: all opening statements, the chosen target, and context
    pub fn question(
        state: &DebateState,
        questioner: ParticipantId,
        target: ParticipantId,
        context: &str,
    ) -> StagePrompt {
        let user = format!(
            "The debate on \"{topic}\" has moved to cross-questioning.\n\n\
             Opening statements so far:\n{openings}\n\
             Reference material gathered for you:\n{context}\n\n\
             Pose one sharp, specific question to {target} ({target_role}), \
             challenging a weakness in their opening position.",
            topic = state.topic(),
            openings = format_opening_statements(state),
            context = context,
            target = target.display_name(),
            target_role = target.profile().role,
        );
        StagePrompt {
            system: Self::system_prompt(questioner, state.topic().content()),
            user,
        }
    }

    /// Answer turn: the pending question, opening statements, and context
    pub fn answer(state: &DebateState, responder: ParticipantId, context: &str) -> StagePrompt {
        let pending = state
            .questions_asked()
            .iter()
            .rev()
            .find(|qa| !qa.is_answered());
        let question_block = match pending {
            Some(qa) => format!(
                "{} asked you:\n{}",
                qa.questioner.display_name(),
                qa.question
            ),
            None => "No question is on record; restate and defend your position.".to_string(),
        };
        let user = format!(
            "The debate on \"{topic}\" is in the cross-questioning stage.\n\n\
             {question_block}\n\n\
             Opening statements so far:\n{openings}\n\
             Reference material gathered for you:\n{context}\n\n\
             Answer the question directly, defending your position.",
            topic = state.topic(),
            question_block = question_block,
            openings = format_opening_statements(state),
            context = context,
        );
        StagePrompt {
            system: Self::system_prompt(responder, state.topic().content()),
            user,
        }
    }

    /// Free-debate rebuttal: openings, QA digest, recent history, round info
    pub fn rebuttal(state: &DebateState, speaker: ParticipantId, context: &str) -> StagePrompt {
        let user = format!(
            "The debate on \"{topic}\" is in free debate, round {round} of \
             {max_rounds}.\n\n\
             Opening statements:\n{openings}\n\
             Questions and answers so far:\n{qa}\n\
             Most recent turns:\n{history}\n\
             Reference material gathered for you:\n{context}\n\n\
             Rebut the point you most disagree with, or reinforce your own \
             position against the strongest attack on it.",
            topic = state.topic(),
            round = state.current_round(),
            max_rounds = state.max_rounds(),
            openings = format_opening_statements(state),
            qa = format_qa_digest(state),
            history = format_recent_history(state, HISTORY_WINDOW),
            context = context,
        );
        StagePrompt {
            system: Self::system_prompt(speaker, state.topic().content()),
            user,
        }
    }

    /// Closing statement: own opening, rivals' digest, controversy summary
    pub fn closing(state: &DebateState, speaker: ParticipantId, context: &str) -> StagePrompt {
        let own_opening = state
            .opening_statements()
            .get(&speaker)
            .map(String::as_str)
            .unwrap_or("(no opening statement on record)");
        let user = format!(
            "The debate on \"{topic}\" is closing.\n\n\
             Your opening statement was:\n{own}\n\n\
             The other participants opened with (abridged):\n{digest}\n\
             {controversy}\n\n\
             Reference material gathered for you:\n{context}\n\n\
             Deliver your closing statement: sum up your case, acknowledge the \
             strongest opposing point, and state what you would have decided.",
            topic = state.topic(),
            own = own_opening,
            digest = format_opening_digest(state, speaker),
            controversy = CONTROVERSY_SUMMARY,
            context = context,
        );
        StagePrompt {
            system: Self::system_prompt(speaker, state.topic().content()),
            user,
        }
    }
}

/// Roster of all panel members except the speaker, one per line
fn roster_excluding(state: &DebateState, speaker: ParticipantId) -> String {
    let mut out = String::new();
    for id in state.panel().iter().filter(|id| *id != speaker) {
        let profile = id.profile();
        out.push_str(&format!(
            "- {} ({}): {}\n",
            profile.display_name, profile.role, profile.focus
        ));
    }
    out
}

/// All opening statements on record, panel order, one block per speaker
fn format_opening_statements(state: &DebateState) -> String {
    let mut out = String::new();
    for id in state.panel().iter() {
        if let Some(statement) = state.opening_statements().get(&id) {
            out.push_str(statement);
            out.push('\n');
        }
    }
    if out.is_empty() {
        out.push_str("(no opening statements recorded)\n");
    }
    out
}

/// The QA ledger as question/answer lines
fn format_qa_digest(state: &DebateState) -> String {
    if state.questions_asked().is_empty() {
        return "(no questions recorded)\n".to_string();
    }
    let mut out = String::new();
    for qa in state.questions_asked() {
        out.push_str(&format!("Q ({}): {}\n", qa.questioner.display_name(), qa.question));
        if qa.is_answered() {
            out.push_str(&format!("A ({}): {}\n", qa.target.display_name(), qa.answer));
        }
    }
    out
}

/// The last `window` spoken turns of the transcript
fn format_recent_history(state: &DebateState, window: usize) -> String {
    let spoken: Vec<&str> = state
        .transcript()
        .iter()
        .filter(|t| t.is_spoken())
        .map(|t| t.content.as_str())
        .collect();
    let start = spoken.len().saturating_sub(window);
    let mut out = String::new();
    for line in &spoken[start..] {
        out.push_str(line);
        out.push('\n');
    }
    if out.is_empty() {
        out.push_str("(no turns yet)\n");
    }
    out
}

/// Rivals' opening statements, each truncated to the digest limit
fn format_opening_digest(state: &DebateState, speaker: ParticipantId) -> String {
    let mut out = String::new();
    for id in state.panel().iter().filter(|id| *id != speaker) {
        if let Some(statement) = state.opening_statements().get(&id) {
            out.push_str(&truncate_chars(statement, OPENING_DIGEST_LIMIT));
            out.push('\n');
        }
    }
    if out.is_empty() {
        out.push_str("(no opening statements recorded)\n");
    }
    out
}

/// Truncate on a character boundary, appending an ellipsis when cut
fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(limit).collect();
        cut.push_str("...");
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::topic::Topic;
    use crate::debate::state::{DebatePanel, DebateState, TurnDelta};

    fn state() -> DebateState {
        let panel = DebatePanel::new(vec![
            ParticipantId::Environmentalist,
            ParticipantId::Economist,
            ParticipantId::Ethicist,
        ])
        .unwrap();
        DebateState::new(Topic::new("Carbon pricing"), panel, 2).unwrap()
    }

    #[test]
    fn test_system_prompt_carries_persona() {
        let prompt = PromptTemplate::system_prompt(ParticipantId::Economist, "Carbon pricing");
        assert!(prompt.contains("The Economist"));
        assert!(prompt.contains("market economics analyst"));
        assert!(prompt.contains("Carbon pricing"));
    }

    #[test]
    fn test_opening_mentions_position_and_roster() {
        let state = state();
        let prompt = PromptTemplate::opening(&state, ParticipantId::Economist, "(no context)");
        assert!(prompt.user.contains("position 2 of 3"));
        assert!(prompt.user.contains("The Environmentalist"));
        assert!(prompt.user.contains("The Ethicist"));
        assert!(!prompt.user.contains("- The Economist"));
    }

    #[test]
    fn test_question_names_target() {
        let mut state = state();
        state.apply(TurnDelta::Opening {
            speaker: ParticipantId::Environmentalist,
            content: "The Environmentalist: Price carbon now.".to_string(),
        });
        let prompt = PromptTemplate::question(
            &state,
            ParticipantId::Economist,
            ParticipantId::Environmentalist,
            "(no context)",
        );
        assert!(prompt.user.contains("Pose one sharp, specific question"));
        assert!(prompt.user.contains("The Environmentalist"));
        assert!(prompt.user.contains("Price carbon now."));
    }

    #[test]
    fn test_answer_quotes_pending_question() {
        let mut state = state();
        state.enter_stage(Stage::Questioning);
        state.apply(TurnDelta::Question {
            questioner: ParticipantId::Economist,
            target: ParticipantId::Ethicist,
            content: "The Economist: Who pays for principle?".to_string(),
        });
        let prompt = PromptTemplate::answer(&state, ParticipantId::Ethicist, "(no context)");
        assert!(prompt.user.contains("Who pays for principle?"));
        assert!(prompt.user.contains("The Economist asked you"));
    }

    #[test]
    fn test_rebuttal_history_is_windowed() {
        let mut state = state();
        state.enter_stage(Stage::FreeDebate);
        for i in 0..10 {
            let speaker = state.panel().get(i % 3).unwrap();
            state.apply(TurnDelta::Rebuttal {
                speaker,
                content: format!("turn-{i}"),
            });
        }
        let prompt = PromptTemplate::rebuttal(&state, ParticipantId::Economist, "(no context)");
        assert!(prompt.user.contains("turn-9"));
        assert!(prompt.user.contains("turn-4"));
        assert!(!prompt.user.contains("turn-3"));
    }

    #[test]
    fn test_closing_digest_truncates_rivals() {
        let mut state = state();
        let long = "x".repeat(300);
        state.apply(TurnDelta::Opening {
            speaker: ParticipantId::Environmentalist,
            content: long,
        });
        state.apply(TurnDelta::Opening {
            speaker: ParticipantId::Economist,
            content: "The Economist: short.".to_string(),
        });
        let prompt = PromptTemplate::closing(&state, ParticipantId::Economist, "(no context)");
        let truncated = format!("{}...", "x".repeat(OPENING_DIGEST_LIMIT));
        assert!(prompt.user.contains(&truncated));
        assert!(!prompt.user.contains(&"x".repeat(OPENING_DIGEST_LIMIT + 1)));
        assert!(prompt.user.contains(CONTROVERSY_SUMMARY));
        // Own opening shown in full, not in the digest
        assert!(prompt.user.contains("The Economist: short."));
    }

    #[test]
    fn test_truncate_chars_is_char_safe() {
        assert_eq!(truncate_chars("héllo", 10), "héllo");
        assert_eq!(truncate_chars("héllo", 3), "hél...");
    }
}

//! The stage scheduler - the state machine at the core of the engine
//!
//! Given a [`DebateState`], [`next_actor`] decides who acts next: a
//! participant speaks, a stage boundary is crossed, or the debate ends.
//! The function is a pure, total read of the state; the only nondeterminism
//! is the injected RNG used to break ties in the fair-rotation rule, which
//! callers seed for deterministic tests.

use super::stage::Stage;
use super::state::{DebatePanel, DebateState};
use crate::debate::qa::QaRecord;
use crate::participant::registry::ParticipantId;
use rand::Rng;
use std::collections::HashMap;

/// The scheduler's verdict on who acts next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// A participant takes the next turn
    Speak(ParticipantId),
    /// The debate crosses into the given stage; no participant speaks
    Transition(Stage),
    /// The debate is over
    Terminate,
}

/// Compute the next actor for the current state
///
/// Per-stage rules:
/// - opening/closing: panel order, one turn each
/// - questioning: a pending answer always executes next; otherwise the
///   fair-rotation rule picks the questioner, until every participant has
///   authored one question
/// - free debate: rotation in panel order for `max_rounds` rounds
///
/// A forced-answer cursor pointing at a participant outside the panel is
/// corrupted state; the scheduler recovers by transitioning to free debate
/// instead of stalling.
pub fn next_actor(state: &DebateState, rng: &mut impl Rng) -> Actor {
    let n = state.participant_count();
    let members = state.panel().members();

    match state.stage() {
        Stage::Opening => {
            if state.stage_progress() < n {
                Actor::Speak(members[state.stage_progress()])
            } else {
                Actor::Transition(Stage::Questioning)
            }
        }
        Stage::Questioning => {
            if state.waiting_for_answer() {
                match state.current_target() {
                    Some(target) if state.panel().contains(target) => Actor::Speak(target),
                    // Corrupted cursor: recover rather than hard-stop
                    _ => Actor::Transition(Stage::FreeDebate),
                }
            } else if state.questions_asked().len() < n {
                Actor::Speak(select_questioner(
                    state.panel(),
                    state.questions_asked(),
                    rng,
                ))
            } else {
                Actor::Transition(Stage::FreeDebate)
            }
        }
        Stage::FreeDebate => {
            let round = state.stage_progress() / n + 1;
            if round <= state.max_rounds() {
                Actor::Speak(members[state.stage_progress() % n])
            } else {
                Actor::Transition(Stage::Closing)
            }
        }
        Stage::Closing => {
            if state.stage_progress() < n {
                Actor::Speak(members[state.stage_progress()])
            } else {
                Actor::Terminate
            }
        }
    }
}

/// Fair-rotation rule, questioner half
///
/// Uniformly random among the participants with the minimum authored-count
/// over the QA ledger. Random tie-breaking (not panel order) bounds the
/// authorship skew to 1 across the stage, and each selection shrinks the
/// minimum pool, so a full stage of N question turns yields exactly one
/// question per participant.
pub fn select_questioner(
    panel: &DebatePanel,
    questions: &[QaRecord],
    rng: &mut impl Rng,
) -> ParticipantId {
    let mut authored: HashMap<ParticipantId, usize> =
        panel.iter().map(|id| (id, 0)).collect();
    for qa in questions {
        if let Some(count) = authored.get_mut(&qa.questioner) {
            *count += 1;
        }
    }

    let min = authored.values().copied().min().unwrap_or(0);
    let candidates: Vec<ParticipantId> = panel
        .iter()
        .filter(|id| authored[id] == min)
        .collect();
    candidates[rng.gen_range(0..candidates.len())]
}

/// Fair-rotation rule, target half
///
/// Uniformly random among the remaining participants (excluding the
/// questioner) with the minimum received-count. Targets are chosen
/// independently of authorship, so a participant may be targeted zero or
/// multiple times within one stage; only authorship is balanced.
pub fn select_target(
    panel: &DebatePanel,
    questions: &[QaRecord],
    questioner: ParticipantId,
    rng: &mut impl Rng,
) -> ParticipantId {
    let mut received: HashMap<ParticipantId, usize> =
        panel.iter().map(|id| (id, 0)).collect();
    for qa in questions {
        if let Some(count) = received.get_mut(&qa.target) {
            *count += 1;
        }
    }

    let min = panel
        .iter()
        .filter(|id| *id != questioner)
        .map(|id| received[&id])
        .min()
        .unwrap_or(0);
    let candidates: Vec<ParticipantId> = panel
        .iter()
        .filter(|id| *id != questioner && received[id] == min)
        .collect();
    candidates[rng.gen_range(0..candidates.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::topic::Topic;
    use crate::debate::state::TurnDelta;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn panel3() -> DebatePanel {
        DebatePanel::new(vec![
            ParticipantId::Technologist,
            ParticipantId::Sociologist,
            ParticipantId::Ethicist,
        ])
        .unwrap()
    }

    fn state_with(panel: DebatePanel, max_rounds: usize) -> DebateState {
        DebateState::new(Topic::new("test topic"), panel, max_rounds).unwrap()
    }

    /// Drive a full debate with synthetic content, returning
    /// (spoken turns, transitions).
    fn drive(state: &mut DebateState, rng: &mut StdRng) -> (usize, usize) {
        let mut spoken = 0;
        let mut transitions = 0;
        loop {
            match next_actor(state, rng) {
                Actor::Speak(speaker) => {
                    let content = format!("{}: turn {}", speaker.display_name(), spoken);
                    let delta = match state.stage() {
                        Stage::Opening => TurnDelta::Opening { speaker, content },
                        Stage::Questioning => {
                            if state.waiting_for_answer() {
                                TurnDelta::Answer {
                                    responder: speaker,
                                    content,
                                }
                            } else {
                                let target = select_target(
                                    state.panel(),
                                    state.questions_asked(),
                                    speaker,
                                    rng,
                                );
                                TurnDelta::Question {
                                    questioner: speaker,
                                    target,
                                    content,
                                }
                            }
                        }
                        Stage::FreeDebate => TurnDelta::Rebuttal { speaker, content },
                        Stage::Closing => TurnDelta::Closing { speaker, content },
                    };
                    state.apply(delta);
                    spoken += 1;
                }
                Actor::Transition(stage) => {
                    state.enter_stage(stage);
                    transitions += 1;
                }
                Actor::Terminate => return (spoken, transitions),
            }
        }
    }

    #[test]
    fn test_opening_follows_panel_order() {
        let mut state = state_with(panel3(), 1);
        let mut rng = StdRng::seed_from_u64(7);
        for i in 0..3 {
            let actor = next_actor(&state, &mut rng);
            let expected = state.panel().get(i).unwrap();
            assert_eq!(actor, Actor::Speak(expected));
            state.apply(TurnDelta::Opening {
                speaker: expected,
                content: "x".to_string(),
            });
        }
        assert_eq!(
            next_actor(&state, &mut rng),
            Actor::Transition(Stage::Questioning)
        );
    }

    #[test]
    fn test_pending_answer_forces_target() {
        let mut state = state_with(panel3(), 1);
        state.enter_stage(Stage::Questioning);
        state.apply(TurnDelta::Question {
            questioner: ParticipantId::Technologist,
            target: ParticipantId::Ethicist,
            content: "q".to_string(),
        });

        // Regardless of RNG state, the target must answer next
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                next_actor(&state, &mut rng),
                Actor::Speak(ParticipantId::Ethicist)
            );
        }
    }

    #[test]
    fn test_corrupted_target_recovers_to_free_debate() {
        let mut state = state_with(panel3(), 1);
        let mut rng = StdRng::seed_from_u64(7);
        state.enter_stage(Stage::Questioning);
        // Target outside the panel: corrupted cursor
        state.apply(TurnDelta::Question {
            questioner: ParticipantId::Technologist,
            target: ParticipantId::Economist,
            content: "q".to_string(),
        });
        assert_eq!(
            next_actor(&state, &mut rng),
            Actor::Transition(Stage::FreeDebate)
        );
    }

    #[test]
    fn test_fair_rotation_each_authors_exactly_once() {
        for seed in 0..32 {
            let mut state = state_with(panel3(), 1);
            let mut rng = StdRng::seed_from_u64(seed);
            state.enter_stage(Stage::Questioning);

            while let Actor::Speak(speaker) = next_actor(&state, &mut rng) {
                if state.waiting_for_answer() {
                    state.apply(TurnDelta::Answer {
                        responder: speaker,
                        content: "a".to_string(),
                    });
                } else {
                    let target =
                        select_target(state.panel(), state.questions_asked(), speaker, &mut rng);
                    assert_ne!(target, speaker);
                    state.apply(TurnDelta::Question {
                        questioner: speaker,
                        target,
                        content: "q".to_string(),
                    });
                }
            }

            let mut authored: HashMap<ParticipantId, usize> = HashMap::new();
            for qa in state.questions_asked() {
                *authored.entry(qa.questioner).or_default() += 1;
            }
            assert_eq!(state.questions_asked().len(), 3);
            for id in state.panel().iter() {
                assert_eq!(authored.get(&id), Some(&1), "seed {} participant {}", seed, id);
            }
        }
    }

    #[test]
    fn test_free_debate_rotation_and_round_bound() {
        let mut state = state_with(panel3(), 2);
        let mut rng = StdRng::seed_from_u64(7);
        state.enter_stage(Stage::FreeDebate);

        for k in 0..6 {
            let actor = next_actor(&state, &mut rng);
            let expected = state.panel().get(k % 3).unwrap();
            assert_eq!(actor, Actor::Speak(expected));
            assert_eq!(state.current_round(), k / 3 + 1);
            state.apply(TurnDelta::Rebuttal {
                speaker: expected,
                content: "r".to_string(),
            });
        }
        assert_eq!(
            next_actor(&state, &mut rng),
            Actor::Transition(Stage::Closing)
        );
    }

    #[test]
    fn test_full_walk_turn_totals() {
        // N=3, max_rounds=2: 3 + (3 questions + 3 answers) + 6 + 3 spoken
        // turns is 18, with 3 stage transitions
        let mut state = state_with(panel3(), 2);
        let mut rng = StdRng::seed_from_u64(42);
        let (spoken, transitions) = drive(&mut state, &mut rng);
        assert_eq!(spoken, 18);
        assert_eq!(transitions, 3);
        assert_eq!(state.total_turns(), 18);
        assert_eq!(state.expected_spoken_turns(), spoken);
        assert_eq!(state.opening_statements().len(), 3);
        assert_eq!(state.closing_statements().len(), 3);
        // Exhausted: the scheduler keeps answering Terminate
        assert_eq!(next_actor(&state, &mut rng), Actor::Terminate);
    }

    #[test]
    fn test_full_walk_all_panel_sizes() {
        let panels: Vec<Vec<ParticipantId>> = vec![
            ParticipantId::all()[..3].to_vec(),
            ParticipantId::all()[..4].to_vec(),
            ParticipantId::all()[..5].to_vec(),
            ParticipantId::all()[..6].to_vec(),
        ];
        for members in panels {
            for max_rounds in 1..=3 {
                let n = members.len();
                let mut state = state_with(DebatePanel::new(members.clone()).unwrap(), max_rounds);
                let mut rng = StdRng::seed_from_u64(9);
                let (spoken, transitions) = drive(&mut state, &mut rng);
                // Questioning contributes 2n: n questions plus n answers
                assert_eq!(spoken, n * (4 + max_rounds));
                assert_eq!(spoken, state.expected_spoken_turns());
                assert_eq!(transitions, 3);
            }
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let run = |seed: u64| {
            let mut state = state_with(panel3(), 1);
            let mut rng = StdRng::seed_from_u64(seed);
            drive(&mut state, &mut rng);
            state
                .questions_asked()
                .iter()
                .map(|qa| (qa.questioner, qa.target))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(123), run(123));
    }
}

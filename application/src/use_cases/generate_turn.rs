//! Generate Turn use case.
//!
//! Produces the content and state delta for one spoken turn. This use case
//! never fails: an inference error degrades to a fixed apology attributed to
//! the participant, a retrieval error degrades to a placeholder, and the
//! debate advances either way.

use crate::config::RetrievalOptions;
use crate::ports::inference::InferenceGateway;
use crate::ports::retrieval::{ContextRetriever, RetrievedContext};
use rand::Rng;
use rostrum_domain::prompt::{PromptTemplate, StagePrompt};
use rostrum_domain::{DebateState, ParticipantId, Stage, TurnDelta, select_target};
use std::sync::Arc;
use tracing::{debug, warn};

/// Shown in prompts when retrieval is switched off for the run.
const CONTEXT_DISABLED: &str = "(external reference material is disabled for this debate)";

/// Cached sentinel when the retriever was reached but had nothing.
const NOTHING_FOUND: &str = "(no reference material was found for this participant)";

/// Spoken in place of a turn whose inference call failed.
const APOLOGY: &str = "My apologies, I am unable to contribute at this moment. Please continue.";

/// The outcome of generating one turn.
///
/// The caller owns the state; the generator only reads it. A fetched context
/// is returned alongside the delta so the orchestrator can commit both in
/// order.
pub struct GeneratedTurn {
    /// The state change to commit via [`DebateState::apply`].
    pub delta: TurnDelta,
    /// A retrieval result to commit via [`DebateState::cache_context`]
    /// before applying the delta.
    pub fetched_context: Option<(ParticipantId, String)>,
}

/// Use case for generating one spoken turn.
///
/// Builds the stage-specific prompt, invokes the inference gateway, and
/// post-processes the result into a canonical name-prefixed turn.
pub struct TurnGenerator {
    gateway: Arc<dyn InferenceGateway>,
    retriever: Arc<dyn ContextRetriever>,
    retrieval: RetrievalOptions,
}

impl TurnGenerator {
    pub fn new(
        gateway: Arc<dyn InferenceGateway>,
        retriever: Arc<dyn ContextRetriever>,
        retrieval: RetrievalOptions,
    ) -> Self {
        Self {
            gateway,
            retriever,
            retrieval,
        }
    }

    /// Generate the next turn for `speaker`.
    ///
    /// The RNG is only consulted for question turns (target selection); it is
    /// the same scheduler RNG, so a seeded run stays fully deterministic.
    pub async fn generate(
        &self,
        state: &DebateState,
        speaker: ParticipantId,
        rng: &mut impl Rng,
    ) -> GeneratedTurn {
        let (context, fetched_context) = self.resolve_context(state, speaker).await;

        let (prompt, build_delta): (StagePrompt, Box<dyn FnOnce(String) -> TurnDelta + Send>) =
            match state.stage() {
                Stage::Opening => (
                    PromptTemplate::opening(state, speaker, &context),
                    Box::new(move |content| TurnDelta::Opening { speaker, content }),
                ),
                Stage::Questioning if state.waiting_for_answer() => (
                    PromptTemplate::answer(state, speaker, &context),
                    Box::new(move |content| TurnDelta::Answer {
                        responder: speaker,
                        content,
                    }),
                ),
                Stage::Questioning => {
                    let target = select_target(state.panel(), state.questions_asked(), speaker, rng);
                    (
                        PromptTemplate::question(state, speaker, target, &context),
                        Box::new(move |content| TurnDelta::Question {
                            questioner: speaker,
                            target,
                            content,
                        }),
                    )
                }
                Stage::FreeDebate => (
                    PromptTemplate::rebuttal(state, speaker, &context),
                    Box::new(move |content| TurnDelta::Rebuttal { speaker, content }),
                ),
                Stage::Closing => (
                    PromptTemplate::closing(state, speaker, &context),
                    Box::new(move |content| TurnDelta::Closing { speaker, content }),
                ),
            };

        let content = match self.gateway.infer(&prompt).await {
            Ok(text) => canonicalize(speaker, &text),
            Err(e) => {
                warn!(
                    participant = speaker.as_str(),
                    stage = state.stage().as_str(),
                    error = %e,
                    "inference failed, substituting placeholder turn"
                );
                canonicalize(speaker, APOLOGY)
            }
        };

        GeneratedTurn {
            delta: build_delta(content),
            fetched_context,
        }
    }

    /// Resolve the reference material for this turn.
    ///
    /// The single fetch per participant happens on their first opening-stage
    /// turn; every later turn reads the cache. A retrieval failure caches the
    /// "nothing found" sentinel, so the retriever is never called twice.
    async fn resolve_context(
        &self,
        state: &DebateState,
        speaker: ParticipantId,
    ) -> (String, Option<(ParticipantId, String)>) {
        if !self.retrieval.enabled {
            return (CONTEXT_DISABLED.to_string(), None);
        }
        if state.is_context_fetched(speaker) {
            let cached = state
                .context_for(speaker)
                .unwrap_or(NOTHING_FOUND)
                .to_string();
            return (cached, None);
        }
        if state.stage() != Stage::Opening {
            // Never attempted and past the opening stage: do not start now
            return (NOTHING_FOUND.to_string(), None);
        }

        let fetched = self
            .retriever
            .retrieve(speaker.profile(), state.topic(), self.retrieval.max_items)
            .await;
        let text = match fetched {
            Ok(RetrievedContext::Found(text)) => {
                debug!(
                    participant = speaker.as_str(),
                    bytes = text.len(),
                    "reference material fetched"
                );
                text
            }
            Ok(RetrievedContext::Nothing) => {
                debug!(participant = speaker.as_str(), "no reference material found");
                NOTHING_FOUND.to_string()
            }
            Err(e) => {
                warn!(
                    participant = speaker.as_str(),
                    error = %e,
                    "retrieval failed, caching empty context"
                );
                NOTHING_FOUND.to_string()
            }
        };
        (text.clone(), Some((speaker, text)))
    }
}

/// Trim and prefix raw inference output into the canonical turn form.
fn canonicalize(speaker: ParticipantId, raw: &str) -> String {
    let trimmed = raw.trim();
    let prefix = speaker.profile().name_prefix();
    if trimmed.starts_with(&prefix) {
        trimmed.to_string()
    } else {
        format!("{prefix}{trimmed}")
    }
}

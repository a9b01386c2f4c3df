//! Run Debate use case.
//!
//! Orchestrates one debate end to end: validates the configuration, then
//! drives the scheduler one step at a time as a pull-based event sequence.
//! The caller decides the pace; nothing executes between calls to
//! [`DebateRun::next_event`].

use crate::config::DebateParams;
use crate::ports::inference::InferenceGateway;
use crate::ports::progress::DebateProgress;
use crate::ports::retrieval::ContextRetriever;
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use crate::use_cases::generate_turn::TurnGenerator;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rostrum_domain::{
    next_actor, Actor, DebatePanel, DebateState, DomainError, Stage, Topic, TurnRecord,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can terminate a debate run.
#[derive(Error, Debug)]
pub enum RunDebateError {
    #[error("Invalid debate configuration: {0}")]
    InvalidConfig(#[from] DomainError),

    #[error("Scheduling exceeded the iteration ceiling ({ceiling} steps)")]
    IterationCeiling { ceiling: usize },

    #[error("Debate cancelled")]
    Cancelled,
}

/// Input for the [`RunDebateUseCase`].
#[derive(Debug, Clone)]
pub struct RunDebateInput {
    /// The debate topic.
    pub topic: String,
    /// Participant keys, in panel order.
    pub participants: Vec<String>,
    /// Loop control parameters.
    pub params: DebateParams,
}

impl RunDebateInput {
    pub fn new(
        topic: impl Into<String>,
        participants: Vec<String>,
        params: DebateParams,
    ) -> Self {
        Self {
            topic: topic.into(),
            participants,
            params,
        }
    }
}

/// One externally observable step of a debate.
#[derive(Debug, Clone)]
pub enum DebateEvent {
    /// A spoken turn was committed.
    Turn(TurnRecord),
    /// A stage boundary was crossed.
    StageChange {
        stage: Stage,
        announcement: String,
    },
}

/// Summary returned by the convenience runner.
#[derive(Debug)]
pub struct DebateReport {
    /// Final debate state, transcript included.
    pub state: DebateState,
    /// Spoken turns executed (announcements excluded).
    pub spoken_turns: usize,
}

/// Use case for running a debate.
///
/// Holds the injected collaborators; [`start`](Self::start) performs the
/// fail-fast validation and yields a [`DebateRun`] to pull events from.
pub struct RunDebateUseCase {
    gateway: Arc<dyn InferenceGateway>,
    retriever: Arc<dyn ContextRetriever>,
    transcript_logger: Arc<dyn TranscriptLogger>,
}

impl RunDebateUseCase {
    pub fn new(gateway: Arc<dyn InferenceGateway>, retriever: Arc<dyn ContextRetriever>) -> Self {
        Self {
            gateway,
            retriever,
            transcript_logger: Arc::new(NoTranscriptLogger),
        }
    }

    /// Create with a transcript logger.
    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript_logger = logger;
        self
    }

    /// Validate the configuration and begin a debate.
    ///
    /// All configuration errors surface here, before any turn executes. The
    /// returned run is lazy: no inference or retrieval happens until the
    /// first [`DebateRun::next_event`] call.
    pub fn start(
        &self,
        input: RunDebateInput,
        cancel: CancellationToken,
    ) -> Result<DebateRun, RunDebateError> {
        let topic = Topic::try_new(input.topic.as_str())
            .ok_or_else(|| DomainError::InvalidTopic(input.topic.clone()))?;
        let panel = DebatePanel::from_keys(&input.participants)?;
        let state = DebateState::new(topic, panel, input.params.max_rounds)?;

        let ceiling = input.params.effective_ceiling(state.participant_count());
        let rng = match input.params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let generator = TurnGenerator::new(
            self.gateway.clone(),
            self.retriever.clone(),
            input.params.retrieval.clone(),
        );

        info!(
            topic = %state.topic(),
            participants = state.participant_count(),
            max_rounds = state.max_rounds(),
            expected_turns = state.expected_spoken_turns(),
            "debate configured"
        );

        Ok(DebateRun {
            state,
            generator,
            rng,
            transcript_logger: self.transcript_logger.clone(),
            steps: 0,
            ceiling,
            cancel,
            finished: false,
        })
    }

    /// Run a debate to completion, reporting progress as it goes.
    pub async fn execute(
        &self,
        input: RunDebateInput,
        cancel: CancellationToken,
        progress: &dyn DebateProgress,
    ) -> Result<DebateReport, RunDebateError> {
        let mut run = self.start(input, cancel)?;
        while let Some(event) = run.next_event().await? {
            match &event {
                DebateEvent::Turn(record) => progress.on_turn(record),
                DebateEvent::StageChange {
                    stage,
                    announcement,
                } => progress.on_stage_change(*stage, announcement),
            }
        }
        Ok(run.into_report())
    }
}

/// An in-progress debate, consumed one event at a time.
///
/// Not restartable: after `next_event` returns `None` or an error, every
/// further call returns `None`. The committed state stays readable either
/// way, so a cancelled or ceiling-hit run keeps its partial transcript.
pub struct DebateRun {
    state: DebateState,
    generator: TurnGenerator,
    rng: StdRng,
    transcript_logger: Arc<dyn TranscriptLogger>,
    steps: usize,
    ceiling: usize,
    cancel: CancellationToken,
    finished: bool,
}

impl DebateRun {
    /// Execute exactly one scheduling step.
    ///
    /// Returns the resulting event, or `None` once the debate has
    /// terminated. Cancellation is observed between steps; a turn already
    /// in flight completes and is committed.
    pub async fn next_event(&mut self) -> Result<Option<DebateEvent>, RunDebateError> {
        if self.finished {
            return Ok(None);
        }
        if self.cancel.is_cancelled() {
            self.finished = true;
            warn!(
                spoken_turns = self.state.total_turns(),
                "debate cancelled, partial transcript retained"
            );
            return Err(RunDebateError::Cancelled);
        }
        self.steps += 1;
        if self.steps > self.ceiling {
            self.finished = true;
            return Err(RunDebateError::IterationCeiling {
                ceiling: self.ceiling,
            });
        }

        match next_actor(&self.state, &mut self.rng) {
            Actor::Terminate => {
                self.finished = true;
                info!(
                    spoken_turns = self.state.total_turns(),
                    "debate terminated normally"
                );
                Ok(None)
            }
            Actor::Transition(stage) => {
                debug!(stage = stage.as_str(), "stage transition");
                let record = self.state.enter_stage(stage);
                self.transcript_logger.log(TranscriptEvent::new(
                    "stage_change",
                    serde_json::json!({
                        "stage": stage.as_str(),
                        "announcement": record.content,
                    }),
                ));
                Ok(Some(DebateEvent::StageChange {
                    stage,
                    announcement: record.content,
                }))
            }
            Actor::Speak(speaker) => {
                let generated = self
                    .generator
                    .generate(&self.state, speaker, &mut self.rng)
                    .await;
                if let Some((id, text)) = generated.fetched_context {
                    self.transcript_logger.log(TranscriptEvent::new(
                        "retrieval",
                        serde_json::json!({
                            "participant": id.as_str(),
                            "bytes": text.len(),
                        }),
                    ));
                    self.state.cache_context(id, text);
                }
                let record = self.state.apply(generated.delta);
                self.transcript_logger.log(TranscriptEvent::new(
                    "turn",
                    serde_json::json!({
                        "speaker": speaker.as_str(),
                        "stage": record.stage.as_str(),
                        "kind": record.kind.as_str(),
                        "round": record.round,
                        "content": record.content,
                    }),
                ));
                Ok(Some(DebateEvent::Turn(record)))
            }
        }
    }

    /// Read access to the committed state, valid at any point of the run.
    pub fn state(&self) -> &DebateState {
        &self.state
    }

    /// Consume the run into its final report.
    pub fn into_report(self) -> DebateReport {
        let spoken_turns = self.state.total_turns();
        DebateReport {
            state: self.state,
            spoken_turns,
        }
    }
}

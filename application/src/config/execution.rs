//! Execution parameters - debate loop control.
//!
//! [`DebateParams`] groups the static parameters that control one debate run
//! in [`RunDebateUseCase`](crate::use_cases::run_debate::RunDebateUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};

/// Retrieval behaviour for one debate run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalOptions {
    /// Whether reference material is fetched at all.
    pub enabled: bool,
    /// Upper bound on items the retriever may return per participant.
    pub max_items: usize,
}

impl Default for RetrievalOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            max_items: 3,
        }
    }
}

impl RetrievalOptions {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            max_items: 0,
        }
    }
}

/// Debate loop control parameters.
///
/// Controls round count, retrieval, the runaway-scheduling ceiling, and the
/// scheduler RNG seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateParams {
    /// Free-debate rounds; each round is one full rotation of the panel.
    pub max_rounds: usize,
    /// Retrieval behaviour.
    pub retrieval: RetrievalOptions,
    /// Hard ceiling on scheduling steps; None selects the sized default.
    pub iteration_ceiling: Option<usize>,
    /// Scheduler RNG seed; None seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for DebateParams {
    fn default() -> Self {
        Self {
            max_rounds: 2,
            retrieval: RetrievalOptions::default(),
            iteration_ceiling: None,
            seed: None,
        }
    }
}

impl DebateParams {
    // ==================== Builder Methods ====================

    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds;
        self
    }

    pub fn with_retrieval(mut self, retrieval: RetrievalOptions) -> Self {
        self.retrieval = retrieval;
        self
    }

    pub fn with_iteration_ceiling(mut self, ceiling: usize) -> Self {
        self.iteration_ceiling = Some(ceiling);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Scheduling-step ceiling for a panel of `participants`.
    ///
    /// Sized generously relative to the expected step count, so only a
    /// genuinely runaway scheduler ever reaches it.
    pub fn effective_ceiling(&self, participants: usize) -> usize {
        self.iteration_ceiling
            .unwrap_or(8 * participants * (4 + self.max_rounds) + 64)
    }
}

//! Progress notification port
//!
//! Callbacks fired by the convenience runner while a debate executes, so a
//! front end can render turns as they land without owning the event loop.

use rostrum_domain::{Stage, TurnRecord};

/// Observer of debate execution progress
///
/// Both methods have empty defaults; implementors override what they render.
pub trait DebateProgress: Send + Sync {
    /// A stage boundary was crossed
    fn on_stage_change(&self, _stage: Stage, _announcement: &str) {}

    /// A spoken turn was committed to the transcript
    fn on_turn(&self, _record: &TurnRecord) {}
}

/// No-op implementation for tests and headless runs
pub struct NoDebateProgress;

impl DebateProgress for NoDebateProgress {}

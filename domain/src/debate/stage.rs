//! Debate stage enumeration

use serde::{Deserialize, Serialize};

/// The four sequential stages of a debate (Value Object)
///
/// Ordered `Opening -> Questioning -> FreeDebate -> Closing`; termination
/// after Closing is implicit (the scheduler emits `Terminate` rather than a
/// fifth stage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Opening,
    Questioning,
    FreeDebate,
    Closing,
}

impl Stage {
    /// Get the string identifier for this stage
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Opening => "opening",
            Stage::Questioning => "questioning",
            Stage::FreeDebate => "free_debate",
            Stage::Closing => "closing",
        }
    }

    /// The stage that follows this one, or None after Closing
    pub fn successor(&self) -> Option<Stage> {
        match self {
            Stage::Opening => Some(Stage::Questioning),
            Stage::Questioning => Some(Stage::FreeDebate),
            Stage::FreeDebate => Some(Stage::Closing),
            Stage::Closing => None,
        }
    }

    /// System announcement recorded in the transcript when this stage begins
    pub fn announcement(&self) -> &'static str {
        match self {
            Stage::Opening => {
                "The debate begins with opening statements: each participant states their position."
            }
            Stage::Questioning => {
                "The debate moves to cross-questioning: each participant poses one question to another."
            }
            Stage::FreeDebate => {
                "The debate moves to free debate: participants rebut each other in rotating rounds."
            }
            Stage::Closing => {
                "The debate moves to closing statements: each participant sums up their case."
            }
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

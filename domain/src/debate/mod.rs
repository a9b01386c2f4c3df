//! Debate aggregate, stage machine, and scheduler

pub mod qa;
pub mod scheduler;
pub mod stage;
pub mod state;
pub mod transcript;

pub use qa::QaRecord;
pub use scheduler::{Actor, next_actor, select_questioner, select_target};
pub use stage::Stage;
pub use state::{DebatePanel, DebateState, TurnDelta};
pub use transcript::{TurnKind, TurnRecord};

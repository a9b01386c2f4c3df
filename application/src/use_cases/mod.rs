//! Use cases (application services)

pub mod generate_turn;
pub mod run_debate;

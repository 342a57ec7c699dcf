//! Orchestrator - Interactive turn loop
//!
//! # Module Structure
//!
//! - `session`: per-conversation state (persona, turn counter)
//! - `turn`: Turn record and outcome
//! - `core`: DialogueOrchestrator, turn processing and the read loop

mod core;
mod session;
mod turn;

#[cfg(test)]
mod tests;

pub use self::core::{DialogueOrchestrator, FAREWELL, PROMPT, USER_SEPARATOR};
pub use session::Session;
pub use turn::{Turn, TurnOutcome};

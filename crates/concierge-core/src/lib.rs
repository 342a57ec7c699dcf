//! Concierge Core - Dialogue Policy
//!
//! - `persona`: keyword persona classification with sticky state
//! - `instructions`: per-turn system instructions (grounding, citation, persona tone)
//! - `engine`: reasoning engine trait and the tool-calling loop over an LLM provider
//! - `orchestrator`: the interactive turn loop

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod instructions;
pub mod orchestrator;
pub mod persona;

pub use engine::{EngineResponse, ReasoningEngine, ToolLoopEngine};
pub use error::{Error, Result};
pub use instructions::InstructionComposer;
pub use orchestrator::{DialogueOrchestrator, Session, Turn, TurnOutcome};
pub use persona::{classify, PersonaState};

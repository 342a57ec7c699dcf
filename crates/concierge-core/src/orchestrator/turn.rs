//! Turn record

use crate::persona::PersonaState;

/// How a turn ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The engine answered
    Response(String),
    /// The engine failed; the message describes the failure
    Failed(String),
}

/// One request/response exchange
#[derive(Debug, Clone)]
pub struct Turn {
    /// Raw user text
    pub input: String,
    /// Persona after classification
    pub persona: PersonaState,
    /// Persona notice shown before the answer, if the persona changed
    pub notice: Option<String>,
    /// Instructions composed for this turn
    pub instructions: String,
    /// Final answer or failure
    pub outcome: TurnOutcome,
}

impl Turn {
    /// The line printed for this turn's outcome
    #[must_use]
    pub fn rendered(&self) -> String {
        match &self.outcome {
            TurnOutcome::Response(content) => format!("Agent: {}", content),
            TurnOutcome::Failed(error) => {
                format!("An error occurred during the conversation: {}", error)
            }
        }
    }

    /// Whether the engine failed
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, TurnOutcome::Failed(_))
    }
}

//! Conversation session state

use crate::persona::PersonaState;

/// State of one interactive conversation
///
/// Owned by the orchestrator and only changed between turns.
#[derive(Debug, Clone, Default)]
pub struct Session {
    persona: PersonaState,
    turns: usize,
}

impl Session {
    /// Start a new session with an unknown persona
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current persona
    #[must_use]
    pub fn persona(&self) -> PersonaState {
        self.persona
    }

    /// Number of turns processed
    #[must_use]
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Apply a classification result. Returns `true` when the persona changed.
    pub(crate) fn update_persona(&mut self, next: PersonaState) -> bool {
        if next == self.persona {
            return false;
        }
        self.persona = next;
        true
    }

    pub(crate) fn record_turn(&mut self) {
        self.turns += 1;
    }
}

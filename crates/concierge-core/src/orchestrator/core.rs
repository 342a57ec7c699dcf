//! DialogueOrchestrator and the read loop

use crate::engine::ReasoningEngine;
use crate::error::Result;
use crate::instructions::InstructionComposer;
use crate::persona::{classify, PersonaState};
use concierge_tools::CapabilityRegistry;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, instrument};

use super::session::Session;
use super::turn::{Turn, TurnOutcome};

/// Input prompt shown before each utterance
pub const PROMPT: &str = "\n> You: ";

/// Separator between the instructions and the user's words
pub const USER_SEPARATOR: &str = "\n\nUser: ";

/// Printed when the user leaves
pub const FAREWELL: &str = "Goodbye!";

/// Typed (case-insensitively) to end the session
const EXIT_COMMAND: &str = "exit";

/// Runs one conversation: persona tracking, instruction composition and
/// per-turn fault isolation around the reasoning engine
pub struct DialogueOrchestrator {
    engine: Arc<dyn ReasoningEngine>,
    capabilities: CapabilityRegistry,
    composer: InstructionComposer,
    session: Session,
}

impl DialogueOrchestrator {
    /// Create an orchestrator with a fresh session
    #[must_use]
    pub fn new(
        engine: Arc<dyn ReasoningEngine>,
        capabilities: CapabilityRegistry,
        composer: InstructionComposer,
    ) -> Self {
        Self {
            engine,
            capabilities,
            composer,
            session: Session::new(),
        }
    }

    /// Current session state
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current persona
    #[must_use]
    pub fn persona(&self) -> PersonaState {
        self.session.persona()
    }

    /// Capabilities offered to the engine each turn
    #[must_use]
    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    /// Greeting printed when the session starts
    #[must_use]
    pub fn greeting(&self) -> String {
        format!(
            "Hello! I am your {} Smart City Concierge. How can I help you today?",
            self.composer.city()
        )
    }

    /// Process one utterance. Engine failures are captured in the returned
    /// turn and never escape.
    #[instrument(skip(self, input), fields(turn = self.session.turns() + 1))]
    pub async fn process_turn(&mut self, input: &str) -> Turn {
        let next = classify(input, self.session.persona());
        let notice = if self.session.update_persona(next) {
            info!(persona = %next, "Persona changed");
            Some(persona_notice(next))
        } else {
            None
        };

        let persona = self.session.persona();
        let instructions = self.composer.compose(persona);
        let prompt = format!("{instructions}{USER_SEPARATOR}{input}");

        let outcome = match self.engine.run(&prompt, &self.capabilities).await {
            Ok(response) => {
                debug!(tool_calls = response.tool_calls, "Turn answered");
                TurnOutcome::Response(response.content)
            }
            Err(e) => {
                error!(error = %e, "Turn failed");
                TurnOutcome::Failed(e.to_string())
            }
        };

        self.session.record_turn();

        Turn {
            input: input.to_string(),
            persona,
            notice,
            instructions,
            outcome,
        }
    }

    /// Run the interactive loop until `exit` or end of input
    ///
    /// # Errors
    /// Only terminal I/O failures end the loop with an error.
    pub async fn run<R, W>(&mut self, reader: R, writer: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        write_line(writer, &format!("\n{}", self.greeting())).await?;

        loop {
            writer.write_all(PROMPT.as_bytes()).await?;
            writer.flush().await?;

            let Some(line) = lines.next_line().await? else {
                debug!("Input closed");
                write_line(writer, "").await?;
                break;
            };

            let input = line.trim();
            if input.eq_ignore_ascii_case(EXIT_COMMAND) {
                write_line(writer, FAREWELL).await?;
                break;
            }
            let turn = self.process_turn(input).await;
            if let Some(notice) = &turn.notice {
                write_line(writer, notice).await?;
            }
            write_line(writer, &turn.rendered()).await?;
        }

        info!(turns = self.session.turns(), "Session ended");
        Ok(())
    }
}

fn persona_notice(persona: PersonaState) -> String {
    if persona.is_known() {
        format!(
            "Agent: I've detected you are a {}. I will tailor my responses for you.",
            persona
        )
    } else {
        "Agent: I'm not sure if you are a tourist or a resident. \
         Can you tell me a little more about your needs?"
            .to_string()
    }
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
pub(super) fn notice_for(persona: PersonaState) -> String {
    persona_notice(persona)
}

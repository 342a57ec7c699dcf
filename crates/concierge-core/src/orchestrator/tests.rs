//! Orchestrator tests

use super::core::{notice_for, DialogueOrchestrator, FAREWELL, PROMPT, USER_SEPARATOR};
use super::turn::TurnOutcome;
use crate::engine::{EngineResponse, ReasoningEngine};
use crate::error::{Error, Result};
use crate::instructions::InstructionComposer;
use crate::persona::PersonaState;
use concierge_tools::CapabilityRegistry;
use std::sync::{Arc, Mutex};

/// Answers every prompt, failing when the user text contains `fail_on`
#[derive(Default)]
struct ScriptedEngine {
    fail_on: Option<&'static str>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedEngine {
    fn failing_on(marker: &'static str) -> Self {
        Self {
            fail_on: Some(marker),
            ..Self::default()
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ReasoningEngine for ScriptedEngine {
    async fn run(
        &self,
        prompt: &str,
        _capabilities: &CapabilityRegistry,
    ) -> Result<EngineResponse> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let user = prompt.rsplit(USER_SEPARATOR).next().unwrap_or_default();
        if self.fail_on.is_some_and(|marker| user.contains(marker)) {
            return Err(Error::Llm(concierge_llm::Error::Network(
                "connection reset".to_string(),
            )));
        }
        Ok(EngineResponse {
            content: format!("answer to: {user}"),
            tool_calls: 0,
        })
    }
}

fn orchestrator(engine: Arc<ScriptedEngine>) -> DialogueOrchestrator {
    DialogueOrchestrator::new(engine, CapabilityRegistry::new(), InstructionComposer::default())
}

async fn transcript(orch: &mut DialogueOrchestrator, input: &str) -> String {
    let mut out: Vec<u8> = Vec::new();
    orch.run(input.as_bytes(), &mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn test_new_resident_detected_once() {
    let engine = Arc::new(ScriptedEngine::default());
    let mut orch = orchestrator(engine.clone());

    let out = transcript(
        &mut orch,
        "I am moving here for a job\nWhere should I rent?\nIs the work commute long?\nexit\n",
    )
    .await;

    let notice = notice_for(PersonaState::NewResident);
    assert_eq!(out.matches(&notice).count(), 1, "{out}");
    assert!(out.contains("Agent: answer to: I am moving here for a job"));
    assert!(out.contains("Agent: answer to: Where should I rent?"));
    assert_eq!(orch.persona(), PersonaState::NewResident);
    assert_eq!(orch.session().turns(), 3);

    // sticky persona drives the instructions of the keyword-less turn
    let prompts = engine.prompts();
    assert!(prompts[1].contains("3-4 sentences max"));
}

#[tokio::test]
async fn test_exit_terminates_without_further_prompt() {
    let engine = Arc::new(ScriptedEngine::default());
    let mut orch = orchestrator(engine.clone());

    let out = transcript(&mut orch, "EXIT\nvisit the palace\n").await;

    assert!(out.ends_with(&format!("{PROMPT}{FAREWELL}\n")), "{out}");
    assert_eq!(out.matches(PROMPT).count(), 1);
    assert!(engine.prompts().is_empty());
    assert_eq!(orch.persona(), PersonaState::Unknown);
}

#[tokio::test]
async fn test_engine_failure_does_not_end_session() {
    let engine = Arc::new(ScriptedEngine::failing_on("boom"));
    let mut orch = orchestrator(engine.clone());

    let out = transcript(
        &mut orch,
        "We are visiting for the weekend\nboom\nWhat to eat?\nexit\n",
    )
    .await;

    assert!(out.contains(
        "An error occurred during the conversation: llm error: network error: connection reset"
    ));
    assert!(out.contains("Agent: answer to: What to eat?"));
    assert!(out.contains(FAREWELL));
    assert_eq!(orch.persona(), PersonaState::Tourist);
    assert_eq!(engine.prompts().len(), 3);
}

#[tokio::test]
async fn test_failed_turn_keeps_persona() {
    let engine = Arc::new(ScriptedEngine::failing_on("boom"));
    let mut orch = orchestrator(engine);

    orch.process_turn("I want to explore the old town").await;
    let turn = orch.process_turn("boom").await;

    assert!(turn.is_failure());
    assert!(turn.notice.is_none());
    assert_eq!(turn.persona, PersonaState::Tourist);
    assert_eq!(orch.persona(), PersonaState::Tourist);
    assert!(turn.rendered().starts_with("An error occurred during the conversation: "));
}

#[tokio::test]
async fn test_prompt_layout() {
    let engine = Arc::new(ScriptedEngine::default());
    let mut orch = orchestrator(engine.clone());

    let turn = orch.process_turn("hello there").await;

    assert_eq!(turn.persona, PersonaState::Unknown);
    assert!(turn.notice.is_none());
    assert_eq!(
        turn.outcome,
        TurnOutcome::Response("answer to: hello there".to_string())
    );
    let expected = format!("{}{USER_SEPARATOR}hello there", turn.instructions);
    assert_eq!(engine.prompts()[0], expected);
    assert!(turn.instructions.contains("Ask clarifying questions"));
}

#[tokio::test]
async fn test_switch_between_personas_announces_each_change() {
    let engine = Arc::new(ScriptedEngine::default());
    let mut orch = orchestrator(engine);

    let first = orch.process_turn("Top attractions please").await;
    let second = orch.process_turn("Actually I got a job offer").await;
    let third = orch.process_turn("Any good bakeries?").await;

    assert_eq!(first.notice, Some(notice_for(PersonaState::Tourist)));
    assert_eq!(second.notice, Some(notice_for(PersonaState::NewResident)));
    assert!(third.notice.is_none());
}

#[tokio::test]
async fn test_blank_line_is_a_turn() {
    let engine = Arc::new(ScriptedEngine::default());
    let mut orch = orchestrator(engine.clone());

    let out = transcript(&mut orch, "I am visiting\n\nexit\n").await;

    let prompts = engine.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].ends_with(USER_SEPARATOR));
    assert!(prompts[1].contains("2-3 sentences max"));
    assert_eq!(orch.session().turns(), 2);
    assert_eq!(orch.persona(), PersonaState::Tourist);
    assert_eq!(out.matches("Agent: answer to: \n").count(), 1);
    assert!(out.ends_with(&format!("{PROMPT}{FAREWELL}\n")));
}

#[tokio::test]
async fn test_eof_ends_session_without_farewell() {
    let engine = Arc::new(ScriptedEngine::default());
    let mut orch = orchestrator(engine.clone());

    let out = transcript(&mut orch, "").await;

    assert!(out.starts_with("\nHello! I am your Bangalore Smart City Concierge."));
    assert!(engine.prompts().is_empty());
    assert_eq!(orch.session().turns(), 0);
    assert!(!out.contains(FAREWELL));
}

#[test]
fn test_notices() {
    assert_eq!(
        notice_for(PersonaState::NewResident),
        "Agent: I've detected you are a New Resident. I will tailor my responses for you."
    );
    assert!(notice_for(PersonaState::Unknown).contains("tourist or a resident"));
}

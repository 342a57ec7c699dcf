//! Mock LLM Provider for testing
//!
//! Replays scripted responses (or failures) in order and records every
//! request it receives.

use crate::chat::{ChatRequest, ChatResponse};
use crate::error::{Error, Result};
use crate::provider::LlmProvider;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Answer given once the script runs out
pub const FALLBACK_ANSWER: &str = "mock response";

/// Scripted provider; clones share the same script and request log
#[derive(Clone, Default)]
pub struct MockProvider {
    script: Arc<Mutex<VecDeque<Result<ChatResponse>>>>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockProvider {
    /// Create a provider with an empty script
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response
    pub fn push_response(&self, response: ChatResponse) {
        self.enqueue(Ok(response));
    }

    /// Queue a failure
    pub fn push_error(&self, error: Error) {
        self.enqueue(Err(error));
    }

    /// Requests received so far, oldest first
    #[must_use]
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn enqueue(&self, step: Result<ChatResponse>) {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(step);
    }
}

#[async_trait::async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        let next = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        next.unwrap_or_else(|| Ok(ChatResponse::answer(FALLBACK_ANSWER, "mock-model")))
    }
}

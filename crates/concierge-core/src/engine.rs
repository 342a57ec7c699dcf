//! Reasoning engine
//!
//! The orchestrator hands the engine one prompt per turn together with the
//! capabilities available for that turn. `ToolLoopEngine` is the production
//! implementation: it lets the model call capabilities until it answers in
//! plain text.

use crate::error::{Error, Result};
use concierge_llm::{ChatRequest, LlmProvider, Message, ToolCall};
use concierge_tools::CapabilityRegistry;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Default number of model rounds per turn
pub const DEFAULT_MAX_ITERATIONS: usize = 5;

/// Final answer of one engine run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineResponse {
    /// Answer text
    pub content: String,
    /// Number of capability invocations made while answering
    pub tool_calls: usize,
}

/// Anything that can answer a composed prompt
#[async_trait::async_trait]
pub trait ReasoningEngine: Send + Sync {
    /// Answer `prompt`, optionally invoking `capabilities`
    async fn run(
        &self,
        prompt: &str,
        capabilities: &CapabilityRegistry,
    ) -> Result<EngineResponse>;
}

/// Tool-calling loop over an LLM provider
pub struct ToolLoopEngine {
    provider: Arc<dyn LlmProvider>,
    model: String,
    max_iterations: usize,
    temperature: Option<f32>,
}

impl ToolLoopEngine {
    /// Create an engine using the provider's default model
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            model: String::new(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            temperature: None,
        }
    }

    /// Override the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set maximum model rounds per turn (at least 1)
    #[must_use]
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max.max(1);
        self
    }

    /// Set sampling temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    async fn execute_tool_calls(
        &self,
        calls: &[ToolCall],
        capabilities: &CapabilityRegistry,
        messages: &mut Vec<Message>,
    ) {
        for call in calls {
            info!(tool = %call.name, args = %call.arguments, "Executing capability");

            let output = match capabilities.invoke(&call.name, &call.arguments).await {
                Ok(output) => output,
                Err(e) => {
                    warn!(tool = %call.name, error = %e, "Capability call rejected");
                    format!("Error: {e}")
                }
            };

            debug!(tool = %call.name, output_len = output.len(), "Capability completed");
            messages.push(Message::tool_result(&call.id, output));
        }
    }
}

#[async_trait::async_trait]
impl ReasoningEngine for ToolLoopEngine {
    #[instrument(
        skip_all,
        fields(provider = %self.provider.name(), capabilities = capabilities.len())
    )]
    async fn run(
        &self,
        prompt: &str,
        capabilities: &CapabilityRegistry,
    ) -> Result<EngineResponse> {
        let tools = capabilities.to_llm_tools();
        let mut messages = vec![Message::user(prompt)];
        let mut tool_calls = 0;

        for iteration in 0..self.max_iterations {
            let request = ChatRequest::new(&self.model, messages.clone())
                .with_tools(tools.clone())
                .with_temperature(self.temperature);

            let response = self.provider.chat(request).await?;
            if let Some(usage) = response.usage {
                debug!(iteration, total_tokens = usage.total_tokens, "Model round finished");
            }

            if !response.wants_tools() {
                let content = response
                    .content
                    .filter(|c| !c.trim().is_empty())
                    .ok_or(Error::EmptyResponse)?;
                debug!(iteration, tool_calls, "Engine produced an answer");
                return Ok(EngineResponse {
                    content,
                    tool_calls,
                });
            }

            tool_calls += response.tool_calls.len();
            messages.push(Message::tool_request(
                response.content.unwrap_or_default(),
                response.tool_calls.clone(),
            ));
            self.execute_tool_calls(&response.tool_calls, capabilities, &mut messages)
                .await;
        }

        warn!(max = self.max_iterations, "Engine hit the tool-calling limit");
        Err(Error::IterationLimit(self.max_iterations))
    }
}

//! One chat round: the conversation so far in, an answer or tool calls out

use crate::message::Message;
use crate::tools::{ToolCall, ToolDefinition};
use serde::Deserialize;

/// Token accounting reported by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens generated
    pub completion_tokens: u32,
    /// Sum of both
    pub total_tokens: u32,
}

/// Conversation plus the functions the model may call
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Model identifier; empty means the provider's default
    pub model: String,
    /// Conversation so far, oldest first
    pub messages: Vec<Message>,
    /// Functions the model may call
    pub tools: Vec<ToolDefinition>,
    /// Sampling temperature; `None` leaves the backend default
    pub temperature: Option<f32>,
}

impl ChatRequest {
    /// Request for `messages` with no tools offered
    #[must_use]
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            tools: Vec::new(),
            temperature: None,
        }
    }

    /// Offer `tools` to the model
    #[must_use]
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    /// Set or clear the sampling temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }
}

/// What the model did with a [`ChatRequest`]
#[derive(Debug, Clone, Default)]
pub struct ChatResponse {
    /// Text, if the model wrote any
    pub content: Option<String>,
    /// Functions the model wants run before it answers
    pub tool_calls: Vec<ToolCall>,
    /// Token accounting, when the backend reports it
    pub usage: Option<Usage>,
    /// Model that actually served the request
    pub model: String,
}

impl ChatResponse {
    /// A final text answer
    #[must_use]
    pub fn answer(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            model: model.into(),
            ..Self::default()
        }
    }

    /// A round that only asks for function calls
    #[must_use]
    pub fn calls(tool_calls: Vec<ToolCall>, model: impl Into<String>) -> Self {
        Self {
            tool_calls,
            model: model.into(),
            ..Self::default()
        }
    }

    /// Whether the model asked for any function calls
    #[must_use]
    pub fn wants_tools(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

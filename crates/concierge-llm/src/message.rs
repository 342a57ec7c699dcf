//! Conversation messages exchanged with the model

use crate::tools::ToolCall;
use serde::{Deserialize, Serialize};

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The concierge's composed prompt
    User,
    /// The model
    Assistant,
    /// Output of a capability the model called
    Tool,
}

impl MessageRole {
    /// Wire name used by OpenAI-compatible APIs
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        }
    }
}

/// One entry in the conversation sent to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Author
    pub role: MessageRole,
    /// Text body (may be empty on an assistant tool-call message)
    pub content: String,
    /// Call this message answers (tool messages only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// Calls requested by the assistant
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
}

impl Message {
    /// The prompt for a turn
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            tool_call_id: None,
            tool_calls: Vec::new(),
        }
    }

    /// Echo of an assistant round that asked for `calls`
    #[must_use]
    pub fn tool_request(content: impl Into<String>, calls: Vec<ToolCall>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            tool_call_id: None,
            tool_calls: calls,
        }
    }

    /// Result of running call `call_id`
    #[must_use]
    pub fn tool_result(call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Tool,
            content: output.into(),
            tool_call_id: Some(call_id.into()),
            tool_calls: Vec::new(),
        }
    }
}

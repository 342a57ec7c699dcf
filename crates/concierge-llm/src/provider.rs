//! The seam between the reasoning engine and a model backend

use crate::chat::{ChatRequest, ChatResponse};
use crate::error::Result;

/// A chat backend that supports function calling
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Run one chat round. A response either answers or asks for tool calls.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;
}

//! Concierge LLM - LLM Provider Abstraction
//!
//! This crate provides the chat seam the concierge reasons through:
//! - `LlmProvider`: one chat round, optionally offering function tools
//! - `OpenRouterProvider`: OpenAI-compatible gateway used in production
//! - `MockProvider`: scripted provider for tests

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chat;
pub mod error;
pub mod message;
pub mod mock;
pub mod openrouter;
pub mod provider;
pub mod tools;
pub mod util;

pub use chat::{ChatRequest, ChatResponse, Usage};
pub use error::{Error, Result};
pub use message::{Message, MessageRole};
pub use mock::MockProvider;
pub use openrouter::{OpenRouterConfig, OpenRouterProvider};
pub use provider::LlmProvider;
pub use tools::{ToolCall, ToolDefinition};

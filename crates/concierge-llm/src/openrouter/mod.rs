//! OpenRouter - Multi-provider LLM Gateway
//!
//! OpenAI-compatible chat completions with function calling, used as the
//! concierge's reasoning backend.

/// OpenRouter provider implementation
pub mod provider;
/// Configuration and wire types
pub mod types;


pub use provider::OpenRouterProvider;
pub use types::{OpenRouterConfig, BASE_URL, DEFAULT_MODEL};

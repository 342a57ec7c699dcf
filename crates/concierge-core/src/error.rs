//! Error types for concierge-core

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// LLM provider error
    #[error("llm error: {0}")]
    Llm(#[from] concierge_llm::Error),

    /// Tool registry error
    #[error("tool error: {0}")]
    Tool(#[from] concierge_tools::Error),

    /// The model kept requesting tools past the configured limit
    #[error("no answer after {0} tool-calling rounds")]
    IterationLimit(usize),

    /// The model answered with neither text nor tool calls
    #[error("the model returned an empty response")]
    EmptyResponse,

    /// Terminal I/O failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

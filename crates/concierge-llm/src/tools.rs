//! Function-calling types

use serde::{Deserialize, Serialize};

/// A function offered to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Function name
    pub name: String,
    /// What the function does, shown to the model
    pub description: String,
    /// JSON schema of the arguments object
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    /// Create a definition
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// A function call requested by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Backend-assigned id, echoed back on the result message
    pub id: String,
    /// Function to run
    pub name: String,
    /// Raw JSON arguments, exactly as the model produced them
    pub arguments: String,
}

impl ToolCall {
    /// Create a call record
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

//! Registry - Capability registration and discovery
//!
//! A capability takes a single string argument and always answers with a
//! string. Degraded outcomes (missing configuration, backend failures) are
//! returned as text rather than errors, so the reasoning engine can treat
//! every answer as valid tool output.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Capability category for organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityCategory {
    /// Live web lookups
    Search,
    /// Static reference material
    Knowledge,
}

impl CapabilityCategory {
    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Knowledge => "knowledge",
        }
    }
}

impl std::fmt::Display for CapabilityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Capability metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    /// Unique capability name
    pub name: String,
    /// Description shown to the model
    pub description: String,
    /// Name of the single string argument
    pub input_name: String,
    /// Description of the single string argument
    pub input_description: String,
    /// Capability category
    pub category: CapabilityCategory,
}

impl CapabilityDescriptor {
    /// Create a new descriptor taking a `query` argument
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: CapabilityCategory,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_name: "query".to_string(),
            input_description: "Query string".to_string(),
            category,
        }
    }

    /// Set the argument name and description
    #[must_use]
    pub fn with_input(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.input_name = name.into();
        self.input_description = description.into();
        self
    }

    /// JSON schema of the single string argument
    #[must_use]
    pub fn parameters(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        properties.insert(
            self.input_name.clone(),
            serde_json::json!({
                "type": "string",
                "description": self.input_description
            }),
        );
        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": [self.input_name]
        })
    }

    /// Convert to the LLM function-calling format
    #[must_use]
    pub fn to_llm_tool(&self) -> concierge_llm::ToolDefinition {
        concierge_llm::ToolDefinition::new(&self.name, &self.description, self.parameters())
    }
}

/// Trait for capability implementations
#[async_trait::async_trait]
pub trait Capability: Send + Sync {
    /// Get the capability descriptor
    fn descriptor(&self) -> &CapabilityDescriptor;

    /// Invoke with the single string argument. Never fails.
    async fn invoke(&self, input: &str) -> String;
}

/// Registry of capabilities available to the reasoning engine
#[derive(Default, Clone)]
pub struct CapabilityRegistry {
    capabilities: BTreeMap<String, Arc<dyn Capability>>,
}

impl CapabilityRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a capability, replacing any with the same name
    pub fn register(&mut self, capability: Arc<dyn Capability>) {
        let name = capability.descriptor().name.clone();
        debug!(capability = %name, "Registering capability");
        self.capabilities.insert(name, capability);
    }

    /// Get a capability by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Capability>> {
        self.capabilities.get(name).cloned()
    }

    /// Check if a capability exists
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.capabilities.contains_key(name)
    }

    /// List capability names in sorted order
    #[must_use]
    pub fn list_names(&self) -> Vec<&str> {
        self.capabilities.keys().map(String::as_str).collect()
    }

    /// List descriptors in name order
    #[must_use]
    pub fn descriptors(&self) -> Vec<&CapabilityDescriptor> {
        self.capabilities.values().map(|c| c.descriptor()).collect()
    }

    /// Get capability count
    #[must_use]
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    /// Check if registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// Convert descriptors to LLM tool format
    #[must_use]
    pub fn to_llm_tools(&self) -> Vec<concierge_llm::ToolDefinition> {
        self.descriptors()
            .into_iter()
            .map(CapabilityDescriptor::to_llm_tool)
            .collect()
    }

    /// Invoke a capability from a model tool call
    ///
    /// `arguments` is the JSON object the model produced. A bare JSON string is
    /// accepted as the argument itself.
    ///
    /// # Errors
    /// `Error::NotFound` for an unknown name, `Error::InvalidInput` when the
    /// argument is missing or not a string.
    pub async fn invoke(&self, name: &str, arguments: &str) -> Result<String> {
        let capability = self
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        let input = extract_input(&capability.descriptor().input_name, arguments)?;
        Ok(capability.invoke(&input).await)
    }
}

fn extract_input(input_name: &str, arguments: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(arguments)
        .map_err(|e| Error::InvalidInput(format!("arguments are not valid JSON: {e}")))?;

    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Object(map) => map
            .get(input_name)
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| Error::InvalidInput(format!("Missing '{input_name}' parameter"))),
        _ => Err(Error::InvalidInput("Input must be an object".to_string())),
    }
}

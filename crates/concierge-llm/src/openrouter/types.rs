//! OpenRouter configuration and wire format

use crate::chat::Usage;
use crate::error::{Error, Result};
use crate::util::mask_api_key;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Chat-completions endpoint root
pub const BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Model used when neither the request nor the configuration names one
pub const DEFAULT_MODEL: &str = "google/gemini-pro-1.5";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Sent as `X-Title` so requests show up under this app on OpenRouter
pub(crate) const APP_TITLE: &str = "City Concierge";

/// Connection settings for OpenRouter
#[derive(Clone)]
pub struct OpenRouterConfig {
    /// Bearer token
    pub api_key: String,
    /// API root, without the `/chat/completions` suffix
    pub base_url: String,
    /// Model used when the request leaves it empty
    pub model: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl fmt::Debug for OpenRouterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenRouterConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenRouterConfig {
    /// Settings for `api_key` with the public endpoint and default model
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read the key from `OPENROUTER_API_KEY`
    ///
    /// # Errors
    /// Returns `Error::NotConfigured` when the variable is unset or blank.
    pub fn from_env() -> Result<Self> {
        std::env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .map(Self::new)
            .ok_or_else(|| Error::NotConfigured("OPENROUTER_API_KEY not set".to_string()))
    }

    /// Point at another OpenAI-compatible endpoint
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Change the default model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Change the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Wire format (OpenAI chat completions)

#[derive(Debug, Serialize)]
pub(crate) struct WireRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<WireTool<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<&'static str>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WireMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    // some backends send `null` instead of omitting the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireTool<'a> {
    pub r#type: &'static str,
    pub function: WireFunction<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireFunction<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub parameters: &'a serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WireToolCall {
    pub id: String,
    #[serde(default = "function_type")]
    pub r#type: String,
    pub function: WireCall,
}

fn function_type() -> String {
    "function".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WireCall {
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireResponse {
    pub model: String,
    pub choices: Vec<WireChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireChoice {
    pub message: WireMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireError {
    pub error: WireErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireErrorDetail {
    pub message: String,
}

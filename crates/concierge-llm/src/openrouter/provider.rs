use super::types::{
    OpenRouterConfig, WireCall, WireError, WireFunction, WireMessage, WireRequest, WireResponse,
    WireTool, WireToolCall, APP_TITLE,
};
use crate::chat::{ChatRequest, ChatResponse};
use crate::error::{Error, Result};
use crate::message::Message;
use crate::provider::LlmProvider;
use crate::tools::ToolCall;
use crate::util::sanitize_api_error;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

/// OpenRouter LLM provider
pub struct OpenRouterProvider {
    client: Client,
    config: OpenRouterConfig,
}

impl OpenRouterProvider {
    /// Create a provider
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenRouterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Provider(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    async fn post(&self, body: &WireRequest<'_>) -> Result<WireResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header("X-Title", APP_TITLE)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Network(e.without_url().to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Network(e.without_url().to_string()))?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimit);
        }
        if !status.is_success() {
            let message = serde_json::from_str::<WireError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(Error::Api(sanitize_api_error(&message)));
        }

        decode(&text)
    }
}

pub(crate) fn encode_message(msg: &Message) -> WireMessage {
    WireMessage {
        role: msg.role.as_str().to_string(),
        content: Some(msg.content.clone()),
        tool_call_id: msg.tool_call_id.clone(),
        tool_calls: (!msg.tool_calls.is_empty()).then(|| {
            msg.tool_calls
                .iter()
                .map(|call| WireToolCall {
                    id: call.id.clone(),
                    r#type: "function".to_string(),
                    function: WireCall {
                        name: call.name.clone(),
                        arguments: call.arguments.clone(),
                    },
                })
                .collect()
        }),
    }
}

/// Decode a chat-completions body, taking the first choice
pub(crate) fn decode(body: &str) -> Result<WireResponse> {
    let response: WireResponse =
        serde_json::from_str(body).map_err(|e| Error::InvalidResponse(e.to_string()))?;
    if response.choices.is_empty() {
        return Err(Error::InvalidResponse("No choices in response".to_string()));
    }
    Ok(response)
}

pub(crate) fn into_chat_response(response: WireResponse) -> ChatResponse {
    let mut out = ChatResponse {
        usage: response.usage,
        model: response.model,
        ..ChatResponse::default()
    };
    if let Some(choice) = response.choices.into_iter().next() {
        out.content = choice.message.content.filter(|c| !c.is_empty());
        out.tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| ToolCall::new(tc.id, tc.function.name, tc.function.arguments))
            .collect();
    }
    out
}

#[async_trait::async_trait]
impl LlmProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    #[instrument(skip_all, fields(model = %request.model, tools = request.tools.len()))]
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let model = if request.model.is_empty() {
            self.config.model.as_str()
        } else {
            request.model.as_str()
        };

        let tools: Vec<WireTool<'_>> = request
            .tools
            .iter()
            .map(|tool| WireTool {
                r#type: "function",
                function: WireFunction {
                    name: &tool.name,
                    description: &tool.description,
                    parameters: &tool.parameters,
                },
            })
            .collect();
        let tool_choice = (!tools.is_empty()).then_some("auto");

        let body = WireRequest {
            model,
            messages: request.messages.iter().map(encode_message).collect(),
            temperature: request.temperature,
            tools,
            tool_choice,
        };

        debug!(messages = body.messages.len(), "Sending chat request to OpenRouter");
        Ok(into_chat_response(self.post(&body).await?))
    }
}

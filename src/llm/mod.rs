//! LLM client for OpenRouter's OpenAI-compatible chat completions API.
//!
//! Two call shapes are used by the agent:
//! - tool-bound completion: the model may answer directly or request tool calls
//! - structured completion: the model output is constrained to a JSON schema

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Message role in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A single message in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self::plain(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::plain(Role::User, content)
    }

    /// Tool result message, tied back to the call that produced it.
    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
        }
    }

    fn plain(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    /// Whether this message carries at least one tool-call request.
    pub fn has_tool_calls(&self) -> bool {
        self.tool_calls
            .as_ref()
            .map(|calls| !calls.is_empty())
            .unwrap_or(false)
    }
}

/// A tool-call request emitted by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// The API returns arguments as a JSON-encoded string
    pub arguments: String,
}

/// JSON schema constraint for a structured completion.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSchemaFormat {
    pub name: String,
    pub strict: bool,
    pub schema: Value,
}

/// Client for an OpenAI-compatible chat completions endpoint.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// One completion turn with optional tool declarations. The returned
    /// message carries either content or tool-call requests (or both).
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[Value]>,
    ) -> anyhow::Result<ChatMessage>;

    /// One completion turn constrained to `format`. Returns the parsed
    /// JSON object from the model's message content.
    async fn structured_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        format: &JsonSchemaFormat,
    ) -> anyhow::Result<Value>;
}

/// OpenRouter-backed [`LlmClient`].
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_key: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [Value]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat<'a>>,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: &'a JsonSchemaFormat,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenRouterClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    async fn send(&self, request: &ChatCompletionRequest<'_>) -> anyhow::Result<ChatMessage> {
        let response = self
            .http
            .post(OPENROUTER_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer the provider's structured error message when present
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&body) {
                anyhow::bail!("LLM API error ({}): {}", status, api_error.error.message);
            }
            anyhow::bail!("LLM API error ({}): {}", status, body);
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| anyhow::anyhow!("LLM returned no choices"))
    }
}

#[async_trait]
impl LlmClient for OpenRouterClient {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[Value]>,
    ) -> anyhow::Result<ChatMessage> {
        let request = ChatCompletionRequest {
            model,
            messages,
            tools,
            tool_choice: tools.map(|_| "auto"),
            response_format: None,
        };
        self.send(&request).await
    }

    async fn structured_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        format: &JsonSchemaFormat,
    ) -> anyhow::Result<Value> {
        let request = ChatCompletionRequest {
            model,
            messages,
            tools: None,
            tool_choice: None,
            response_format: Some(ResponseFormat {
                format_type: "json_schema",
                json_schema: format,
            }),
        };
        let message = self.send(&request).await?;
        let content = message
            .content
            .ok_or_else(|| anyhow::anyhow!("structured completion returned no content"))?;
        serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("structured completion is not valid JSON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_message_serialization_skips_empty_fields() {
        let message = ChatMessage::user("What's the weather in Boston?");
        let value = serde_json::to_value(&message).expect("serialize message");
        assert_eq!(
            value,
            json!({"role": "user", "content": "What's the weather in Boston?"})
        );
    }

    #[test]
    fn assistant_message_with_tool_calls_deserializes() {
        let raw = json!({
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": "call_1",
                "type": "function",
                "function": {
                    "name": "get_weather_forecast",
                    "arguments": "{\"location\":\"Boston\"}"
                }
            }]
        });
        let message: ChatMessage = serde_json::from_value(raw).expect("deserialize message");
        assert!(message.has_tool_calls());
        let calls = message.tool_calls.expect("tool calls");
        assert_eq!(calls[0].function.name, "get_weather_forecast");
    }

    #[test]
    fn tool_result_message_carries_call_id() {
        let message = ChatMessage::tool("call_1", "72F, wind NW at 10 km/h");
        assert_eq!(message.role, Role::Tool);
        assert_eq!(message.tool_call_id.as_deref(), Some("call_1"));
        assert!(!message.has_tool_calls());
    }

    #[test]
    fn structured_request_declares_json_schema_format() {
        let format = JsonSchemaFormat {
            name: "weather_reply".to_string(),
            strict: true,
            schema: json!({"type": "object"}),
        };
        let request = ChatCompletionRequest {
            model: "openai/gpt-4o-mini",
            messages: &[],
            tools: None,
            tool_choice: None,
            response_format: Some(ResponseFormat {
                format_type: "json_schema",
                json_schema: &format,
            }),
        };
        let value = serde_json::to_value(&request).expect("serialize request");
        assert_eq!(value["response_format"]["type"], "json_schema");
        assert_eq!(
            value["response_format"]["json_schema"]["name"],
            "weather_reply"
        );
        assert!(value.get("tools").is_none());
    }
}

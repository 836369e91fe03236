//! Core agent loop implementation.

use std::sync::Arc;

use crate::config::Config;
use crate::llm::{ChatMessage, LlmClient, OpenRouterClient, ToolCall};
use crate::tools::ToolRegistry;

use super::prompt::{build_system_prompt, RESPONDER_INSTRUCTION};
use super::reply::StructuredReply;

/// Route selected after each intake call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The model requested tool calls; execute them and loop back.
    Continue,
    /// No tool calls; shape the final answer.
    Respond,
}

/// Decide where the flow goes after an intake call.
///
/// `Continue` if and only if the message carries a non-empty tool-call
/// list. No other state is inspected.
pub fn should_continue(last_message: &ChatMessage) -> Route {
    if last_message.has_tool_calls() {
        Route::Continue
    } else {
        Route::Respond
    }
}

/// The conversational weather agent.
pub struct Agent {
    config: Config,
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
}

impl Agent {
    /// Create a new agent with the given configuration.
    pub fn new(config: Config) -> Self {
        let llm = Arc::new(OpenRouterClient::new(config.api_key.clone()));
        let tools = ToolRegistry::new();

        Self { config, llm, tools }
    }

    /// Create an agent with explicit collaborators (useful for testing).
    pub fn with_parts(config: Config, llm: Arc<dyn LlmClient>, tools: ToolRegistry) -> Self {
        Self { config, llm, tools }
    }

    /// Run one user query through the intake/tool loop and the responder.
    ///
    /// Conversation state lives only for this call; `thread_id` is a
    /// correlation key for logging.
    pub async fn run_chat(
        &self,
        user_input: &str,
        thread_id: &str,
    ) -> anyhow::Result<StructuredReply> {
        let mut messages = vec![
            ChatMessage::system(build_system_prompt(&self.tools)),
            ChatMessage::user(user_input),
        ];

        let tool_schemas = self.tools.get_tool_schemas();

        // Content the responder shapes: the most recent tool result, or the
        // assistant's own answer when no tool ran.
        let mut last_tool_result: Option<String> = None;

        for iteration in 0..self.config.max_iterations {
            tracing::debug!(thread_id, iteration = iteration + 1, "intake call");

            let response = self
                .llm
                .chat_completion(&self.config.default_model, &messages, Some(&tool_schemas))
                .await?;

            match should_continue(&response) {
                Route::Continue => {
                    let tool_calls = response.tool_calls.clone().unwrap_or_default();
                    messages.push(response);

                    for tool_call in &tool_calls {
                        let result = self.execute_tool_call(tool_call).await;
                        let result_str = match result {
                            Ok(output) => output,
                            Err(e) => format!("Error: {}", e),
                        };

                        tracing::debug!(
                            thread_id,
                            tool = %tool_call.function.name,
                            "tool executed"
                        );

                        last_tool_result = Some(result_str.clone());
                        messages.push(ChatMessage::tool(tool_call.id.clone(), result_str));
                    }
                }
                Route::Respond => {
                    let answer = response.content.clone().unwrap_or_default();
                    messages.push(response);

                    let content = last_tool_result.unwrap_or(answer);
                    return self.respond(&content).await;
                }
            }
        }

        Err(anyhow::anyhow!(
            "Max iterations ({}) reached without a final response",
            self.config.max_iterations
        ))
    }

    /// Second, tool-free LLM call: shape `content` into the structured
    /// reply. Only the content to structure is sent, not the whole
    /// conversation.
    async fn respond(&self, content: &str) -> anyhow::Result<StructuredReply> {
        let messages = [
            ChatMessage::system(RESPONDER_INSTRUCTION),
            ChatMessage::user(content),
        ];

        let raw = self
            .llm
            .structured_completion(
                &self.config.default_model,
                &messages,
                &StructuredReply::json_schema(),
            )
            .await?;

        StructuredReply::from_value(raw)
    }

    /// Execute a single tool call.
    async fn execute_tool_call(&self, tool_call: &ToolCall) -> anyhow::Result<String> {
        let args: serde_json::Value = serde_json::from_str(&tool_call.function.arguments)
            .unwrap_or(serde_json::Value::Null);

        self.tools.execute(&tool_call.function.name, args).await
    }
}

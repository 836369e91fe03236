//! Prompt templates for the two LLM calls.

use crate::tools::ToolRegistry;

/// Instruction for the responder call that shapes the final answer.
pub const RESPONDER_INSTRUCTION: &str = "You extract weather data into a structured reply. \
If the content contains forecast data, set response_type to \"weather\" and fill in \
temperature, wind_direction, and wind_speed. Otherwise set response_type to \"message\" \
and explain in \"error\" why no forecast is available.";

/// Build the intake system prompt with the tool catalog.
pub fn build_system_prompt(tools: &ToolRegistry) -> String {
    let tool_descriptions = tools
        .list_tools()
        .iter()
        .map(|t| format!("- **{}**: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a helpful assistant that provides weather information.

You have access to the following tools:
{tool_descriptions}

If the user asks about the weather, use the tool to get the forecast.
If not, respond with a message indicating that you can only provide weather information."#,
        tool_descriptions = tool_descriptions
    )
}

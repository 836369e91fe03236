//! Tool catalog exposed to the LLM.
//!
//! Tools are declared to the model as OpenAI-style function definitions;
//! the model picks a tool by name at runtime and the registry resolves and
//! executes it, validating arguments against the declared schema first.

mod weather;

pub use weather::GetWeatherForecast;

use async_trait::async_trait;
use serde_json::{json, Value};

/// A capability the LLM can invoke by name.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name as declared to the LLM.
    fn name(&self) -> &str;

    /// Tool description as declared to the LLM.
    fn description(&self) -> &str;

    /// JSON schema for the tool's arguments.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: Value) -> anyhow::Result<String>;
}

/// Name and description of a registered tool (for prompt building).
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// Registry of all available tools.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a registry with the default tool set.
    pub fn new() -> Self {
        let mut registry = Self { tools: Vec::new() };
        registry.register(Box::new(GetWeatherForecast));
        registry
    }

    /// Create an empty registry (useful for testing).
    pub fn empty() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.push(tool);
    }

    /// List name and description of every registered tool.
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect()
    }

    /// Tool declarations in the chat completions `tools` format.
    pub fn get_tool_schemas(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|t| {
                json!({
                    "type": "function",
                    "function": {
                        "name": t.name(),
                        "description": t.description(),
                        "parameters": t.parameters_schema(),
                    }
                })
            })
            .collect()
    }

    /// Execute a tool by name.
    ///
    /// Arguments are checked against the tool's declared schema (required
    /// properties) before the tool runs.
    pub async fn execute(&self, name: &str, args: Value) -> anyhow::Result<String> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {}", name))?;

        validate_args(name, &tool.parameters_schema(), &args)?;

        tool.execute(args).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Check that every required property declared in the schema is present.
fn validate_args(tool_name: &str, schema: &Value, args: &Value) -> anyhow::Result<()> {
    let required = match schema["required"].as_array() {
        Some(required) => required,
        None => return Ok(()),
    };

    for property in required {
        let Some(key) = property.as_str() else {
            continue;
        };
        if args.get(key).map(|v| v.is_null()).unwrap_or(true) {
            anyhow::bail!(
                "Missing required argument '{}' for tool '{}'",
                key,
                tool_name
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the input back"
        }

        fn parameters_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" }
                },
                "required": ["text"]
            })
        }

        async fn execute(&self, args: Value) -> anyhow::Result<String> {
            Ok(args["text"].as_str().unwrap_or_default().to_string())
        }
    }

    #[test]
    fn default_registry_declares_weather_tool() {
        let registry = ToolRegistry::new();
        let tools = registry.list_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "get_weather_forecast");

        let schemas = registry.get_tool_schemas();
        assert_eq!(schemas[0]["type"], "function");
        assert_eq!(schemas[0]["function"]["name"], "get_weather_forecast");
        assert_eq!(
            schemas[0]["function"]["parameters"]["required"][0],
            "location"
        );
    }

    #[tokio::test]
    async fn execute_unknown_tool_fails() {
        let registry = ToolRegistry::empty();
        let err = registry
            .execute("missing", json!({}))
            .await
            .expect_err("unknown tool should fail");
        assert!(err.to_string().contains("Unknown tool"));
    }

    #[tokio::test]
    async fn execute_rejects_missing_required_argument() {
        let mut registry = ToolRegistry::empty();
        registry.register(Box::new(Echo));

        let err = registry
            .execute("echo", json!({}))
            .await
            .expect_err("missing argument should fail");
        assert!(err.to_string().contains("Missing required argument 'text'"));
    }

    #[tokio::test]
    async fn execute_runs_tool_with_valid_arguments() {
        let mut registry = ToolRegistry::empty();
        registry.register(Box::new(Echo));

        let output = registry
            .execute("echo", json!({"text": "hello"}))
            .await
            .expect("echo should run");
        assert_eq!(output, "hello");
    }
}

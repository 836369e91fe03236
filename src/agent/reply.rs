//! Final structured answer produced by the responder call.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::llm::JsonSchemaFormat;

/// The final answer, one of two shapes selected by `response_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "response_type", rename_all = "lowercase")]
pub enum StructuredReply {
    /// Forecast data extracted from the conversation.
    Weather {
        temperature: f64,
        wind_direction: String,
        wind_speed: f64,
    },
    /// The query could not be answered as a weather question.
    Message { error: String },
}

impl StructuredReply {
    /// Schema handed to the LLM.
    ///
    /// Declares every field regardless of branch so any model output
    /// parses; conversion into the enum keeps only the active branch's
    /// fields.
    pub fn json_schema() -> JsonSchemaFormat {
        JsonSchemaFormat {
            name: "weather_reply".to_string(),
            strict: true,
            schema: json!({
                "type": "object",
                "properties": {
                    "response_type": {
                        "type": "string",
                        "enum": ["weather", "message"]
                    },
                    "error": {
                        "type": "string",
                        "description": "Why the query could not be answered; empty for weather replies"
                    },
                    "temperature": {
                        "type": "number",
                        "description": "The temperature in fahrenheit"
                    },
                    "wind_direction": {
                        "type": "string",
                        "description": "The direction of the wind in abbreviated form"
                    },
                    "wind_speed": {
                        "type": "number",
                        "description": "The speed of the wind in km/h"
                    }
                },
                "required": ["response_type", "error", "temperature", "wind_direction", "wind_speed"],
                "additionalProperties": false
            }),
        }
    }

    /// Parse a raw structured completion into the tagged union.
    pub fn from_value(value: Value) -> anyhow::Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| anyhow::anyhow!("structured reply does not match schema: {}", e))
    }
}

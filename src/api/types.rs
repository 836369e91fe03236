//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::agent::StructuredReply;

/// Request to chat with the agent.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// The user's message
    pub user_input: String,

    /// Correlation key for conversation continuity; passed through to logs,
    /// no in-process meaning
    #[serde(default = "default_thread_id")]
    pub thread_id: String,
}

fn default_thread_id() -> String {
    "default_thread".to_string()
}

/// Logical outcome of a chat flow run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatResponse {
    /// Whether the query produced a forecast
    pub status: ChatStatus,

    /// Forecast payload on success, error text on failure
    pub response: ResponsePayload,
}

/// Chat outcome discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatStatus {
    Success,
    Failure,
}

/// The `response` field: an object for forecasts, a bare string otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    Forecast(ForecastPayload),
    Text(String),
}

/// Forecast fields returned on success.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPayload {
    pub temperature: f64,
    pub wind_direction: String,
    pub wind_speed: f64,
}

impl ChatResponse {
    /// Map the structured reply onto the wire contract.
    pub fn from_reply(reply: StructuredReply) -> Self {
        match reply {
            StructuredReply::Weather {
                temperature,
                wind_direction,
                wind_speed,
            } => Self {
                status: ChatStatus::Success,
                response: ResponsePayload::Forecast(ForecastPayload {
                    temperature,
                    wind_direction,
                    wind_speed,
                }),
            },
            StructuredReply::Message { error } => Self {
                status: ChatStatus::Failure,
                response: ResponsePayload::Text(error),
            },
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn thread_id_defaults_when_omitted() {
        let request: ChatRequest =
            serde_json::from_str(r#"{"user_input": "What's the weather in Boston?"}"#)
                .expect("parse request");
        assert_eq!(request.thread_id, "default_thread");
    }

    #[test]
    fn explicit_thread_id_is_kept() {
        let request: ChatRequest =
            serde_json::from_str(r#"{"user_input": "hi", "thread_id": "t-42"}"#)
                .expect("parse request");
        assert_eq!(request.thread_id, "t-42");
    }

    #[test]
    fn weather_reply_maps_to_success_with_exactly_three_fields() {
        let response = ChatResponse::from_reply(StructuredReply::Weather {
            temperature: 72.4,
            wind_direction: "NW".to_string(),
            wind_speed: 12.0,
        });

        let value = serde_json::to_value(&response).expect("serialize response");
        assert_eq!(value["status"], "success");

        let payload = value["response"].as_object().expect("forecast object");
        assert_eq!(payload.len(), 3);
        assert_eq!(payload["temperature"], json!(72.4));
        assert_eq!(payload["wind_direction"], "NW");
        assert_eq!(payload["wind_speed"], json!(12.0));
        assert!(!payload.contains_key("error"));
    }

    #[test]
    fn message_reply_maps_to_failure_with_verbatim_error() {
        let response = ChatResponse::from_reply(StructuredReply::Message {
            error: "I can only provide weather information.".to_string(),
        });

        let value = serde_json::to_value(&response).expect("serialize response");
        assert_eq!(value["status"], "failure");
        assert_eq!(value["response"], "I can only provide weather information.");
    }
}

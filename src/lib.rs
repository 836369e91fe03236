//! # Weather Agent
//!
//! A minimal conversational agent that answers weather queries.
//!
//! This library provides:
//! - An HTTP API with a single chat endpoint
//! - A tool-calling agent loop with a weather-forecast tool
//! - Integration with OpenRouter for LLM access
//!
//! ## Architecture
//!
//! The agent follows the "tools in a loop" pattern:
//! 1. Receive a user message via the API
//! 2. Call the LLM with the conversation and the tool catalog
//! 3. If the LLM requests a tool call, execute it and feed the result back
//! 4. When no tool call is requested, a second schema-constrained LLM call
//!    shapes the final structured reply
//!
//! ## Example
//!
//! ```rust,ignore
//! use weather_agent::{agent::Agent, config::Config};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::new(config);
//! let reply = agent
//!     .run_chat("What's the weather in Boston?", "default_thread")
//!     .await?;
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod llm;
pub mod tools;

pub use config::Config;

//! Agent module - the conversational flow.
//!
//! The flow is a small directed graph run as "tools in a loop":
//! 1. Intake: call the LLM with the conversation and the tool catalog
//! 2. Branch: tool calls requested -> execute tools, loop back to intake
//! 3. Respond: no tool calls -> second LLM call shapes the structured reply

mod agent_loop;
mod prompt;
mod reply;

pub use agent_loop::{should_continue, Agent, Route};
pub use prompt::build_system_prompt;
pub use reply::StructuredReply;

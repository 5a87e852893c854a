//! Request and response bodies of the HTTP surface.
//!
//! Two entry points share the same dispatcher:
//! - the chat-extension endpoint (`POST /`), which speaks the
//!   `messages`/`choices` envelope;
//! - the direct endpoint (`POST /dispatch`), which takes a command plus
//!   agent options and returns the structured report alongside the
//!   rendered text.

use crate::agent_models::{AgentOptions, AgentSummary};
use crate::pipeline_models::PipelineReport;
use crate::tool_models::{ToolDefinition, ToolStatus};
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

impl ChatMessage {
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Incoming chat-extension request.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Content of the most recent message, if any.
    pub fn last_content(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

/// Outgoing chat-extension response with a single assistant choice.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

impl ChatResponse {
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            choices: vec![ChatChoice {
                message: ChatMessage::assistant(content),
            }],
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// Body of `POST /dispatch`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub command: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: AgentOptions,
}

/// Uniform success-or-failure envelope returned by `POST /dispatch`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DispatchResponse {
    pub success: bool,

    /// Rendered Markdown for display.
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<PipelineReport>,
}

/// Body of `GET /health`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub agents: Vec<String>,
    pub tools: Vec<ToolStatus>,
}

/// Body of `GET /agents`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AgentListResponse {
    pub agents: Vec<AgentSummary>,
}

impl DispatchResponse {
    /// A response for a request that never reached the dispatcher.
    pub fn rejected(content: impl Into<String>) -> Self {
        Self {
            success: false,
            content: content.into(),
            agent: None,
            report: None,
        }
    }
}

/// Body of `GET /tools`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ToolListResponse {
    pub tools: Vec<ToolDefinition>,
}

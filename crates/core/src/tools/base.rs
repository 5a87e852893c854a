//! Base Tool trait and supporting types.

use ak_protocol::tool_models::{ToolArgs, ToolDefinition, ToolResult};
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// A fault raised by a tool instead of a tagged result.
///
/// Tools report expected failures (missing image, capture command exited
/// non-zero) as `ToolResult { success: false, .. }`. A `ToolError` means
/// the invocation itself broke; the pipeline converts it into a failed
/// step at its own boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("Tool not available: {0}")]
    NotAvailable(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Execution failed: {0}")]
    Execution(String),
}

impl From<std::io::Error> for ToolError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// An external operation invoked by exactly one pipeline step.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Stable identifier recorded in the step log (e.g. `snapshot-tool`).
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema of the arguments accepted by [`invoke`](Self::invoke).
    fn input_schema(&self) -> Value;

    /// Whether the program backing this tool can be found.
    async fn check_availability(&self) -> bool;

    async fn invoke(&self, args: &ToolArgs) -> Result<ToolResult, ToolError>;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// Read a required string argument.
pub fn required_str<'a>(args: &'a ToolArgs, key: &str) -> Result<&'a str, ToolError> {
    args.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ToolError::InvalidArgument(format!("missing required argument '{key}'")))
}

/// Read an optional string argument.
pub fn optional_str<'a>(args: &'a ToolArgs, key: &str) -> Option<&'a str> {
    args.get(key).and_then(|v| v.as_str()).filter(|s| !s.is_empty())
}

/// Accept `value` only if it names a file directly inside a directory.
///
/// Rejects separators, `.`/`..`, absolute paths and quotes, so a
/// caller-supplied name can never leave the tool's artifact directory.
pub fn plain_file_name(value: &str) -> Option<&str> {
    let is_plain = !value.contains(['/', '\\', '\'', '"'])
        && Path::new(value).file_name().and_then(|n| n.to_str()) == Some(value);
    is_plain.then_some(value)
}

//! Tool invocation models.
//!
//! Every pipeline step calls exactly one tool. A tool answers with a
//! [`ToolResult`]: a `success` flag plus an opaque JSON payload whose keys
//! are tool specific (`filePath`, `outputPath`, `confidence`, ...).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arguments passed to a tool invocation.
pub type ToolArgs = Map<String, Value>;

/// Tagged result returned by a tool.
///
/// Serializes flat, so a successful snapshot looks like:
///
/// ```json
/// { "success": true, "filePath": "snapshots/a.png", "fileSize": 1024 }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// Whether the tool completed its work.
    pub success: bool,

    /// Tool specific payload.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl ToolResult {
    /// A successful result. Non-object payloads are stored under `value`.
    pub fn ok(payload: Value) -> Self {
        Self {
            success: true,
            payload: into_map(payload),
        }
    }

    /// A failed result carrying an `error` and a human-readable `message`.
    pub fn failure(error: impl Into<String>, message: impl Into<String>) -> Self {
        let mut payload = Map::new();
        payload.insert("error".to_string(), Value::String(error.into()));
        payload.insert("message".to_string(), Value::String(message.into()));
        Self {
            success: false,
            payload,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }

    pub fn u64_field(&self, key: &str) -> Option<u64> {
        self.payload.get(key).and_then(Value::as_u64)
    }

    pub fn f64_field(&self, key: &str) -> Option<f64> {
        self.payload.get(key).and_then(Value::as_f64)
    }

    pub fn error(&self) -> Option<&str> {
        self.str_field("error")
    }

    pub fn message(&self) -> Option<&str> {
        self.str_field("message")
    }
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}

/// Availability of a tool's backing program, as reported by `/health`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    pub name: String,
    pub available: bool,
}

/// Self-description of a tool: what it does and which arguments it takes.
///
/// `inputSchema` is a JSON Schema object, as listed by MCP `tools/list`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

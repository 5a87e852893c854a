//! Mock tool implementation for testing.

use crate::tools::base::{Tool, ToolError};
use ak_protocol::tool_models::{ToolArgs, ToolResult};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A tool that answers with a scripted outcome and counts invocations.
///
/// Clones share the invocation counter and the recorded arguments, so a
/// test can keep a handle while the agent owns another.
#[derive(Clone)]
pub struct MockTool {
    name: String,
    available: bool,
    outcome: Result<ToolResult, ToolError>,
    invocations: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<ToolArgs>>>,
}

impl MockTool {
    pub fn new(name: impl Into<String>, outcome: Result<ToolResult, ToolError>) -> Self {
        Self {
            name: name.into(),
            available: true,
            outcome,
            invocations: Arc::new(AtomicUsize::new(0)),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn returning(name: impl Into<String>, result: ToolResult) -> Self {
        Self::new(name, Ok(result))
    }

    pub fn faulting(name: impl Into<String>, error: ToolError) -> Self {
        Self::new(name, Err(error))
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Number of times `invoke` has been called.
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }

    /// Arguments of every invocation, in call order.
    pub fn received_args(&self) -> Vec<ToolArgs> {
        self.received
            .lock()
            .map(|received| received.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Tool for MockTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Scripted tool for tests"
    }

    fn input_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn check_availability(&self) -> bool {
        self.available
    }

    async fn invoke(&self, args: &ToolArgs) -> Result<ToolResult, ToolError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut received) = self.received.lock() {
            received.push(args.clone());
        }
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_tool_counts_invocations() {
        let tool = MockTool::returning("mock", ToolResult::ok(json!({ "value": 1 })));
        let handle = tool.clone();

        assert_eq!(handle.invocations(), 0);
        let result = tool.invoke(&ToolArgs::new()).await.unwrap();
        assert!(result.success);
        assert_eq!(handle.invocations(), 1);
        assert_eq!(handle.received_args().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_tool_fault() {
        let tool = MockTool::faulting("mock", ToolError::Execution("boom".to_string()));
        let result = tool.invoke(&ToolArgs::new()).await;
        assert_eq!(result, Err(ToolError::Execution("boom".to_string())));
    }

    #[tokio::test]
    async fn test_mock_tool_unavailable() {
        let tool = MockTool::returning("mock", ToolResult::ok(json!({}))).unavailable();
        assert!(!tool.check_availability().await);
    }
}

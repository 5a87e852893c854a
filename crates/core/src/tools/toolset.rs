//! Named collection of tools, callable outside any agent pipeline.

use crate::tools::base::Tool;
use ak_protocol::tool_models::{ToolArgs, ToolDefinition, ToolResult, ToolStatus};
use std::sync::Arc;

/// Tools in declaration order, addressable by name.
///
/// Backs the `/tools` routes and the MCP server, which expose each tool on
/// its own rather than through an agent.
#[derive(Clone, Default)]
pub struct ToolSet {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolSet {
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        Self { tools }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> + '_ {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|tool| tool.definition()).collect()
    }

    /// Availability of every tool, in declaration order.
    pub async fn statuses(&self) -> Vec<ToolStatus> {
        let mut statuses = Vec::with_capacity(self.tools.len());
        for tool in &self.tools {
            statuses.push(ToolStatus {
                name: tool.name().to_string(),
                available: tool.check_availability().await,
            });
        }
        statuses
    }

    /// Invoke the tool called `name`.
    ///
    /// Always answers with a tagged result: an unknown name and a tool
    /// fault both come back as `success: false`.
    pub async fn call(&self, name: &str, args: &ToolArgs) -> ToolResult {
        let Some(tool) = self.get(name) else {
            tracing::info!(tool = name, "call to unknown tool");
            return ToolResult::failure(
                format!("Unknown tool: {name}"),
                format!("No tool named '{name}'"),
            );
        };

        tracing::info!(tool = name, "direct tool call");
        match tool.invoke(args).await {
            Ok(result) => result,
            Err(fault) => {
                tracing::error!(tool = name, error = %fault, "tool raised an unexpected error");
                ToolResult::failure(fault.to_string(), "Tool invocation raised an unexpected error")
            }
        }
    }
}

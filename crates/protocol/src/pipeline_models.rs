//! Pipeline execution models.
//!
//! An agent runs a fixed sequence of tool calls. Each attempted call is
//! recorded as a [`PipelineStep`] and the whole run is summarized in a
//! [`PipelineReport`].

use crate::agent_models::AgentName;
use crate::tool_models::ToolResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome of a single pipeline step.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Success,
    Failed,
}

/// One tool invocation within an agent's pipeline.
///
/// Created exactly once per attempt and never modified afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStep {
    /// 1-based position within the pipeline.
    pub step_index: usize,

    /// Name of the tool that was invoked.
    #[serde(rename = "tool")]
    pub tool_name: String,

    pub status: StepStatus,

    /// Raw tagged result returned by the tool.
    pub result: ToolResult,
}

/// Aggregated outcome of one agent execution.
///
/// `steps` holds every step that was attempted, in execution order. On a
/// failed run it stops at the failing step. Agent specific fields (paths,
/// lengths, confidence scores) live in `output` and are flattened into
/// the serialized report:
///
/// ```json
/// {
///   "success": true,
///   "agent": "screen-agent",
///   "message": "Screenshot captured and text extracted successfully",
///   "screenshotPath": "a.png",
///   "steps": [ { "stepIndex": 1, "tool": "snapshot-tool", "status": "success", "result": {} } ]
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    /// True only if every step succeeded.
    pub success: bool,

    /// Agent that produced this report.
    #[serde(rename = "agent")]
    pub agent_name: AgentName,

    /// Human-readable summary.
    pub message: String,

    /// Error detail for failed runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Agent specific output fields, in the order the agent produced them.
    #[serde(flatten)]
    pub output: Map<String, Value>,

    /// Attempted steps in execution order.
    pub steps: Vec<PipelineStep>,
}

impl PipelineReport {
    /// The step that stopped a failed run, if any.
    pub fn failed_step(&self) -> Option<&PipelineStep> {
        self.steps
            .iter()
            .find(|step| step.status == StepStatus::Failed)
    }

    pub fn output_field(&self, key: &str) -> Option<&Value> {
        self.output.get(key)
    }
}

//! Pipeline execution engine.
//!
//! A [`PipelineRun`] drives one agent invocation through an explicit state
//! machine:
//!
//! ```text
//! Pending(1) --ok--> Pending(2) --ok--> ... Pending(n) --ok--> Succeeded
//!     |                  |                     |
//!     +-- fail/fault --> Failed(1)   Failed(2) ... Failed(n)
//! ```
//!
//! Each attempted step appends exactly one [`PipelineStep`] to the log.
//! Once the run is in a terminal state no further tool is invoked, so a
//! failed capture can never be followed by an extraction.

use crate::tools::base::Tool;
use ak_protocol::agent_models::AgentName;
use ak_protocol::pipeline_models::{PipelineReport, PipelineStep, StepStatus};
use ak_protocol::tool_models::{ToolArgs, ToolResult};
use serde_json::{Map, Value};

/// Position of a run in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Waiting to run the given 1-based step.
    Pending(usize),
    /// Every step succeeded.
    Succeeded,
    /// The given 1-based step failed; nothing after it ran.
    Failed(usize),
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending(_))
    }
}

#[derive(Debug, Clone)]
struct Failure {
    message: String,
    error: Option<String>,
}

/// Per-invocation executor for a statically defined step sequence.
///
/// The agent declares the number of steps up front and calls
/// [`run_step`](Self::run_step) once per step, threading values from one
/// result into the next step's arguments. `run_step` returns `None` as
/// soon as the run has failed; the agent then finishes with
/// [`into_report`](Self::into_report).
#[derive(Debug)]
pub struct PipelineRun {
    agent: AgentName,
    total_steps: usize,
    state: PipelineState,
    steps: Vec<PipelineStep>,
    failure: Option<Failure>,
}

impl PipelineRun {
    pub fn new(agent: AgentName, total_steps: usize) -> Self {
        let state = if total_steps == 0 {
            PipelineState::Succeeded
        } else {
            PipelineState::Pending(1)
        };

        Self {
            agent,
            total_steps,
            state,
            steps: Vec::with_capacity(total_steps),
            failure: None,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    /// Invoke `tool` as the current step.
    ///
    /// Returns the tool's result when the step succeeded. Returns `None`
    /// when the step failed, when the tool faulted, or when the run was
    /// already terminal (in which case the tool is not called).
    ///
    /// `failure` describes the step for the report message, e.g.
    /// `"Could not take screenshot"` becomes
    /// `"Failed at step 1: Could not take screenshot"`.
    pub async fn run_step(
        &mut self,
        tool: &dyn Tool,
        args: ToolArgs,
        failure: &str,
    ) -> Option<ToolResult> {
        let PipelineState::Pending(index) = self.state else {
            tracing::warn!(
                agent = %self.agent,
                tool = tool.name(),
                state = ?self.state,
                "step requested on a finished pipeline; skipping"
            );
            return None;
        };

        tracing::info!(agent = %self.agent, step = index, tool = tool.name(), "running pipeline step");

        match tool.invoke(&args).await {
            Ok(result) if result.success => {
                self.record(index, tool.name(), StepStatus::Success, result.clone());
                self.state = if index >= self.total_steps {
                    PipelineState::Succeeded
                } else {
                    PipelineState::Pending(index + 1)
                };
                tracing::info!(agent = %self.agent, step = index, "pipeline step succeeded");
                Some(result)
            }
            Ok(result) => {
                let error = result.error().map(str::to_string);
                tracing::warn!(agent = %self.agent, step = index, error = ?error, "pipeline step failed");
                self.record(index, tool.name(), StepStatus::Failed, result);
                self.fail(index, format!("Failed at step {index}: {failure}"), error);
                None
            }
            Err(fault) => {
                let error = fault.to_string();
                tracing::error!(agent = %self.agent, step = index, %error, "tool raised an unexpected error");
                self.record(
                    index,
                    tool.name(),
                    StepStatus::Failed,
                    ToolResult::failure(error.clone(), "Tool invocation raised an unexpected error"),
                );
                self.fail(
                    index,
                    format!("Agent encountered an unexpected error at step {index}"),
                    Some(error),
                );
                None
            }
        }
    }

    /// Take a string field produced by the previous step for the next one.
    ///
    /// A successful result that lacks the field fails the run at the
    /// producing step, so the next tool never sees a missing artifact. The
    /// producing step is re-recorded as failed.
    pub fn hand_off(&mut self, result: &ToolResult, key: &str) -> Option<String> {
        if let Some(value) = result.str_field(key).filter(|v| !v.is_empty()) {
            return Some(value.to_string());
        }

        let index = self.steps.len();
        let tool = self
            .steps
            .last()
            .map(|step| step.tool_name.clone())
            .unwrap_or_default();
        tracing::warn!(agent = %self.agent, step = index, %tool, key, "step result missing hand-off field");

        let error = format!("missing '{key}' in {tool} result");
        if let Some(step) = self.steps.last_mut() {
            step.status = StepStatus::Failed;
            step.result = ToolResult::failure(error.clone(), format!("{tool} returned no '{key}'"));
        }
        self.fail(
            index,
            format!("Failed at step {index}: {tool} returned no '{key}'"),
            Some(error),
        );
        None
    }

    /// Compose the final report.
    ///
    /// `message` and `output` are only used when the run succeeded; a
    /// failed run reports which step failed and why, with the partial step
    /// log.
    pub fn into_report(self, message: impl Into<String>, output: Map<String, Value>) -> PipelineReport {
        match self.state {
            PipelineState::Succeeded => PipelineReport {
                success: true,
                agent_name: self.agent,
                message: message.into(),
                error: None,
                output,
                steps: self.steps,
            },
            PipelineState::Failed(index) => {
                let failure = self.failure.unwrap_or_else(|| Failure {
                    message: format!("Failed at step {index}"),
                    error: None,
                });
                PipelineReport {
                    success: false,
                    agent_name: self.agent,
                    message: failure.message,
                    error: failure.error,
                    output: Map::new(),
                    steps: self.steps,
                }
            }
            PipelineState::Pending(index) => PipelineReport {
                success: false,
                agent_name: self.agent,
                message: format!("Pipeline stopped before step {index} of {}", self.total_steps),
                error: None,
                output: Map::new(),
                steps: self.steps,
            },
        }
    }

    fn record(&mut self, index: usize, tool_name: &str, status: StepStatus, result: ToolResult) {
        self.steps.push(PipelineStep {
            step_index: index,
            tool_name: tool_name.to_string(),
            status,
            result,
        });
    }

    fn fail(&mut self, index: usize, message: String, error: Option<String>) {
        self.state = PipelineState::Failed(index);
        self.failure = Some(Failure { message, error });
    }
}

/// Report for an agent execution that aborted outside any step.
pub fn fault_report(agent: AgentName, error: impl Into<String>) -> PipelineReport {
    PipelineReport {
        success: false,
        agent_name: agent,
        message: "Agent encountered an unexpected error".to_string(),
        error: Some(error.into()),
        output: Map::new(),
        steps: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::base::ToolError;
    use crate::tools::mock_tool::MockTool;
    use serde_json::json;

    fn agent() -> AgentName {
        AgentName::parse("test-agent").unwrap()
    }

    fn ok_tool(name: &str) -> MockTool {
        MockTool::returning(name, ToolResult::ok(json!({ "filePath": "a.png" })))
    }

    #[tokio::test]
    async fn test_all_steps_succeed() {
        let first = ok_tool("first");
        let second = ok_tool("second");
        let mut run = PipelineRun::new(agent(), 2);

        assert_eq!(run.state(), PipelineState::Pending(1));
        assert!(run.run_step(&first, ToolArgs::new(), "first").await.is_some());
        assert_eq!(run.state(), PipelineState::Pending(2));
        assert!(run.run_step(&second, ToolArgs::new(), "second").await.is_some());
        assert_eq!(run.state(), PipelineState::Succeeded);

        let report = run.into_report("done", Map::new());
        assert!(report.success);
        assert_eq!(report.message, "done");
        let indices: Vec<_> = report.steps.iter().map(|s| s.step_index).collect();
        assert_eq!(indices, [1, 2]);
        assert!(report.steps.iter().all(|s| s.status == StepStatus::Success));
    }

    #[tokio::test]
    async fn test_failed_step_is_terminal() {
        let first = MockTool::returning("first", ToolResult::failure("no display", "nope"));
        let second = ok_tool("second");
        let mut run = PipelineRun::new(agent(), 2);

        assert!(run.run_step(&first, ToolArgs::new(), "Could not start").await.is_none());
        assert_eq!(run.state(), PipelineState::Failed(1));

        // Terminal: the next tool is never called.
        assert!(run.run_step(&second, ToolArgs::new(), "second").await.is_none());
        assert_eq!(second.invocations(), 0);

        let report = run.into_report("unused", Map::new());
        assert!(!report.success);
        assert_eq!(report.message, "Failed at step 1: Could not start");
        assert_eq!(report.error.as_deref(), Some("no display"));
        assert_eq!(report.steps.len(), 1);
        assert_eq!(report.steps[0].status, StepStatus::Failed);
    }

    #[tokio::test]
    async fn test_fault_is_converted_to_failed_step() {
        let first = ok_tool("first");
        let second = MockTool::faulting("second", ToolError::Io("disk full".to_string()));
        let mut run = PipelineRun::new(agent(), 2);

        run.run_step(&first, ToolArgs::new(), "first").await;
        assert!(run.run_step(&second, ToolArgs::new(), "second").await.is_none());
        assert_eq!(run.state(), PipelineState::Failed(2));

        let report = run.into_report("unused", Map::new());
        assert!(!report.success);
        assert!(report.message.contains("unexpected error at step 2"));
        assert_eq!(report.error.as_deref(), Some("I/O error: disk full"));
        assert_eq!(report.steps.len(), 2);
        assert_eq!(report.steps[1].status, StepStatus::Failed);
        assert!(!report.steps[1].result.success);
    }

    #[tokio::test]
    async fn test_missing_hand_off_fails_at_producing_step() {
        let first = MockTool::returning("first", ToolResult::ok(json!({})));
        let mut run = PipelineRun::new(agent(), 2);

        let result = run.run_step(&first, ToolArgs::new(), "first").await.unwrap();
        assert!(run.hand_off(&result, "filePath").is_none());
        assert_eq!(run.state(), PipelineState::Failed(1));

        let report = run.into_report("unused", Map::new());
        assert!(report.message.contains("step 1"));
        assert!(report.message.contains("filePath"));
        assert_eq!(report.steps.len(), 1);
        assert_eq!(report.steps[0].status, StepStatus::Failed);
        assert_eq!(report.failed_step().map(|s| s.step_index), Some(1));
        assert_eq!(report.steps[0].result.error(), Some("missing 'filePath' in first result"));
    }

    #[tokio::test]
    async fn test_abandoned_run_reports_pending_step() {
        let first = ok_tool("first");
        let mut run = PipelineRun::new(agent(), 3);
        run.run_step(&first, ToolArgs::new(), "first").await;

        let report = run.into_report("unused", Map::new());
        assert!(!report.success);
        assert_eq!(report.message, "Pipeline stopped before step 2 of 3");
    }

    #[test]
    fn test_fault_report() {
        let report = fault_report(agent(), "panicked");
        assert!(!report.success);
        assert_eq!(report.error.as_deref(), Some("panicked"));
        assert!(report.steps.is_empty());
    }
}

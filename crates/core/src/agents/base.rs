//! Base Agent trait.

use ak_protocol::agent_models::{AgentDefinition, AgentName, AgentOptions};
use ak_protocol::pipeline_models::PipelineReport;
use async_trait::async_trait;

/// A named, statically defined pipeline of tool invocations.
///
/// `execute` never returns an error: tool failures and faults are folded
/// into the returned [`PipelineReport`], so one agent's problems cannot
/// escape its own invocation.
#[async_trait]
pub trait Agent: Send + Sync {
    fn definition(&self) -> &AgentDefinition;

    async fn execute(&self, options: &AgentOptions) -> PipelineReport;

    fn name(&self) -> &AgentName {
        &self.definition().name
    }
}

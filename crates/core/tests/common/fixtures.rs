//! Test fixtures for tools, agents and dispatchers.

use ak_core::agents::base::Agent;
use ak_core::agents::registry::AgentRegistry;
use ak_core::agents::screen_agent::ScreenAgent;
use ak_core::dispatch::Dispatcher;
use ak_core::engine::PipelineRun;
use ak_core::tools::base::Tool;
use ak_core::tools::mock_tool::MockTool;
use ak_protocol::agent_models::{AgentDefinition, AgentName, AgentOptions};
use ak_protocol::config_models::DispatchConfig;
use ak_protocol::pipeline_models::PipelineReport;
use ak_protocol::tool_models::{ToolArgs, ToolResult};
use async_trait::async_trait;
use serde_json::{json, Map};
use std::sync::Arc;

/// Snapshot result pointing at `path`.
#[allow(dead_code)]
pub fn capture_ok(path: &str) -> ToolResult {
    ToolResult::ok(json!({
        "filePath": path,
        "fileSize": 2048,
        "message": "Screenshot saved",
    }))
}

/// OCR result with 42 characters of text at 93.5 confidence.
#[allow(dead_code)]
pub fn extract_ok(output_path: &str) -> ToolResult {
    ToolResult::ok(json!({
        "imagePath": "a.png",
        "outputPath": output_path,
        "textLength": 42,
        "text": "The quick brown fox jumps over the lazy do",
        "confidence": 93.5,
        "message": "Text extracted",
    }))
}

/// Screen agent over two mock tools; returns the handles for inspection.
#[allow(dead_code)]
pub fn screen_agent(snapshot: MockTool, ocr: MockTool) -> (ScreenAgent, MockTool, MockTool) {
    let agent = ScreenAgent::new(Arc::new(snapshot.clone()), Arc::new(ocr.clone()))
        .expect("built-in name is valid");
    (agent, snapshot, ocr)
}

/// An agent that runs its tools in order, handing nothing between steps.
#[allow(dead_code)]
pub struct SequenceAgent {
    definition: AgentDefinition,
    tools: Vec<Arc<dyn Tool>>,
}

impl SequenceAgent {
    #[allow(dead_code)]
    pub fn new(name: &str, phrases: &[&str], tools: Vec<Arc<dyn Tool>>) -> Self {
        let name = AgentName::parse(name).expect("valid test agent name");
        Self {
            definition: AgentDefinition::new(name, "Runs tools in sequence", phrases.iter().copied()),
            tools,
        }
    }
}

#[async_trait]
impl Agent for SequenceAgent {
    fn definition(&self) -> &AgentDefinition {
        &self.definition
    }

    async fn execute(&self, _options: &AgentOptions) -> PipelineReport {
        let mut run = PipelineRun::new(self.definition.name.clone(), self.tools.len());
        for (i, tool) in self.tools.iter().enumerate() {
            let failure = format!("Step {} did not complete", i + 1);
            if run
                .run_step(tool.as_ref(), ToolArgs::new(), &failure)
                .await
                .is_none()
            {
                break;
            }
        }
        run.into_report("All steps completed", Map::new())
    }
}

/// Dispatcher over `agents` with the default directive and mention.
#[allow(dead_code)]
pub fn dispatcher_with(agents: Vec<Arc<dyn Agent>>) -> Dispatcher {
    let mut registry = AgentRegistry::new();
    for agent in agents {
        registry.register(agent).expect("test agents register cleanly");
    }
    Dispatcher::new(registry, DispatchConfig::default()).expect("no duplicate phrases")
}

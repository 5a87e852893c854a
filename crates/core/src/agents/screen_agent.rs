//! Screen agent: capture the desktop, then OCR the capture.
//!
//! Step 1 calls the snapshot tool; its `filePath` is handed to step 2, the
//! OCR tool, which writes the recognized text to the output directory.

use crate::agents::base::Agent;
use crate::engine::PipelineRun;
use crate::tools::base::Tool;
use crate::tools::ocr_extract::DEFAULT_OUTPUT_FILENAME;
use ak_protocol::agent_models::{AgentDefinition, AgentName, AgentNameError, AgentOptions};
use ak_protocol::pipeline_models::PipelineReport;
use ak_protocol::tool_models::ToolArgs;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

pub const SCREEN_AGENT: &str = "screen-agent";
pub const SCREEN_AGENT_DESCRIPTION: &str = "Takes a screenshot and extracts text from it using OCR";
pub const SCREEN_AGENT_COMMANDS: [&str; 3] = ["screen process", "capture and extract", "screenshot ocr"];

const STEP_COUNT: usize = 2;

pub struct ScreenAgent {
    definition: AgentDefinition,
    snapshot: Arc<dyn Tool>,
    ocr: Arc<dyn Tool>,
}

impl ScreenAgent {
    pub fn new(snapshot: Arc<dyn Tool>, ocr: Arc<dyn Tool>) -> Result<Self, AgentNameError> {
        Ok(Self {
            definition: Self::default_definition()?,
            snapshot,
            ocr,
        })
    }

    /// The built-in definition with its three trigger phrases.
    pub fn default_definition() -> Result<AgentDefinition, AgentNameError> {
        let name = AgentName::parse(SCREEN_AGENT)?;
        Ok(AgentDefinition::new(name, SCREEN_AGENT_DESCRIPTION, SCREEN_AGENT_COMMANDS))
    }

    /// Replace the definition, e.g. to add trigger phrases from configuration.
    pub fn with_definition(mut self, definition: AgentDefinition) -> Self {
        self.definition = definition;
        self
    }
}

fn default_filename() -> String {
    format!("screenshot-{}.png", chrono::Utc::now().timestamp_millis())
}

#[async_trait]
impl Agent for ScreenAgent {
    fn definition(&self) -> &AgentDefinition {
        &self.definition
    }

    async fn execute(&self, options: &AgentOptions) -> PipelineReport {
        let filename = options
            .get("filename")
            .map(str::to_string)
            .unwrap_or_else(default_filename);
        let output_filename = options
            .get("outputFilename")
            .unwrap_or(DEFAULT_OUTPUT_FILENAME)
            .to_string();

        let mut run = PipelineRun::new(self.definition.name.clone(), STEP_COUNT);

        let mut args = ToolArgs::new();
        args.insert("filename".to_string(), Value::String(filename));
        let Some(capture) = run
            .run_step(self.snapshot.as_ref(), args, "Could not take screenshot")
            .await
        else {
            return run.into_report("", Map::new());
        };

        let Some(screenshot_path) = run.hand_off(&capture, "filePath") else {
            return run.into_report("", Map::new());
        };

        let mut args = ToolArgs::new();
        args.insert("imagePath".to_string(), Value::String(screenshot_path.clone()));
        args.insert("outputFilename".to_string(), Value::String(output_filename));
        let Some(extraction) = run
            .run_step(self.ocr.as_ref(), args, "Could not extract text")
            .await
        else {
            return run.into_report("", Map::new());
        };

        let mut output = Map::new();
        output.insert("screenshotPath".to_string(), Value::String(screenshot_path));
        for (from, to) in [
            ("outputPath", "textOutputPath"),
            ("textLength", "extractedTextLength"),
            ("confidence", "confidence"),
        ] {
            if let Some(value) = extraction.get(from) {
                output.insert(to.to_string(), value.clone());
            }
        }

        run.into_report("Screenshot captured and text extracted successfully", output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_definition() {
        let definition = ScreenAgent::default_definition().unwrap();
        assert_eq!(definition.name.as_str(), "screen-agent");
        assert_eq!(definition.trigger_phrases(), SCREEN_AGENT_COMMANDS);
    }

    #[test]
    fn test_default_filename_shape() {
        let filename = default_filename();
        assert!(filename.starts_with("screenshot-"));
        assert!(filename.ends_with(".png"));
    }
}

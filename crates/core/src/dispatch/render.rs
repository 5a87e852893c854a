//! Markdown rendering of dispatch outcomes.

use ak_protocol::agent_models::AgentSummary;
use ak_protocol::pipeline_models::{PipelineReport, StepStatus};
use serde_json::Value;
use std::fmt::Write;

/// Full help text listing every agent and its commands.
pub fn format_help(agents: &[AgentSummary], mention: &str, directive: &str) -> String {
    let mut help = String::from("## Orchestrator Help\n\n");
    let _ = writeln!(help, "**Usage:** `{mention} {directive} <command>`\n");
    help.push_str("### Available Agents:\n\n");

    for agent in agents {
        let commands = agent
            .commands
            .iter()
            .map(|c| format!("`{c}`"))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(help, "**{}**", agent.name);
        let _ = writeln!(help, "  {}", agent.description);
        let _ = writeln!(help, "  Commands: {commands}\n");
    }

    if let Some(example) = agents.iter().find_map(|a| a.commands.first()) {
        help.push_str("### Example:\n");
        let _ = write!(help, "`{mention} {directive} {example}`");
    }

    help
}

/// Reply for a command that no agent recognizes.
pub fn format_unknown_command(command: &str, agents: &[AgentSummary]) -> String {
    let commands = agents
        .iter()
        .flat_map(|a| a.commands.iter().map(|c| format!("- {c}")))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Unknown command: \"{command}\"\n\nAvailable commands:\n{commands}")
}

/// Human-readable summary of a pipeline report.
pub fn format_report(report: &PipelineReport) -> String {
    let agent = &report.agent_name;

    if report.success {
        let mut output = format!("## {agent} - Success\n\n{}\n\n", report.message);
        for (key, value) in &report.output {
            if let Some((label, value)) = format_field(key, value) {
                let _ = writeln!(output, "**{label}:** {value}");
            }
        }
        return output;
    }

    let mut output = format!("## {agent} - Failed\n\n**Error:** {}\n", report.message);
    if let Some(error) = &report.error {
        let _ = writeln!(output, "**Details:** {error}");
    }
    if !report.steps.is_empty() {
        output.push_str("\n**Steps:**\n");
        for step in &report.steps {
            let status = match step.status {
                StepStatus::Success => "success",
                StepStatus::Failed => "failed",
            };
            let _ = writeln!(output, "{}. `{}`: {status}", step.step_index, step.tool_name);
        }
    }
    output
}

/// Label and display value of one output field; `None` hides the field.
///
/// Known screen-agent fields get their own label and unit. Anything else
/// is shown under its humanized key.
fn format_field(key: &str, value: &Value) -> Option<(String, String)> {
    let known = match (key, value) {
        ("screenshotPath", Value::String(path)) => Some(("Screenshot", format!("`{path}`"))),
        ("textOutputPath", Value::String(path)) => Some(("Extracted Text", format!("`{path}`"))),
        ("extractedTextLength", Value::Number(n)) => {
            Some(("Text Length", format!("{n} characters")))
        }
        ("confidence", Value::Number(n)) => n
            .as_f64()
            .map(|c| ("OCR Confidence", format!("{c:.1}%"))),
        _ => None,
    };

    match known {
        Some((label, value)) => Some((label.to_string(), value)),
        None => format_value(value).map(|value| (humanize_key(key), value)),
    }
}

/// `screenshotPath` -> `Screenshot Path`.
fn humanize_key(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if i == 0 {
            label.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            label.push(' ');
            label.push(c);
        } else if c == '_' || c == '-' {
            label.push(' ');
        } else {
            label.push(c);
        }
    }
    label
}

fn format_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(format!("`{s}`")),
        Value::Number(n) if n.is_f64() => n.as_f64().map(|f| format!("{f:.1}")),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(format!("`{other}`")),
    }
}

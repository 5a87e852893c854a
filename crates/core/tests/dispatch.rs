//! Integration tests for command resolution and dispatch.

mod common;

use ak_core::agents::base::Agent;
use ak_core::agents::registry::{AgentRegistry, RegistryError};
use ak_core::agents::resolver::{CommandMapping, CommandResolver};
use ak_core::config::loader::CONFIG_DIR;
use ak_core::dispatch::{bootstrap, DispatchOutcome};
use ak_core::tools::base::Tool;
use ak_core::tools::mock_tool::MockTool;
use ak_core::tools::{OCR_EXTRACT_TOOL, SNAPSHOT_TOOL};
use ak_protocol::agent_models::AgentOptions;
use ak_protocol::tool_models::ToolResult;
use common::*;
use serde_json::json;
use std::sync::Arc;

fn screen_dispatcher() -> (ak_core::dispatch::Dispatcher, MockTool) {
    let (agent, _snapshot, ocr) = screen_agent(
        MockTool::returning(SNAPSHOT_TOOL, capture_ok("a.png")),
        MockTool::returning(OCR_EXTRACT_TOOL, extract_ok("text.txt")),
    );
    (dispatcher_with(vec![Arc::new(agent)]), ocr)
}

fn single_step_agent(name: &str, phrases: &[&str]) -> Arc<dyn Agent> {
    let tool: Arc<dyn Tool> = Arc::new(MockTool::returning("noop-tool", ToolResult::ok(json!({}))));
    Arc::new(SequenceAgent::new(name, phrases, vec![tool]))
}

#[tokio::test]
async fn test_directive_routes_to_screen_agent() {
    let (dispatcher, ocr) = screen_dispatcher();

    let outcome = dispatcher
        .dispatch("@orchestrator run screen process", AgentOptions::new())
        .await;

    assert!(outcome.success());
    let report = outcome.report().unwrap();
    assert_eq!(report.agent_name.as_str(), "screen-agent");
    assert!(outcome.content().starts_with("## screen-agent - Success"));
    assert!(outcome.content().contains("**OCR Confidence:** 93.5%"));
    assert!(outcome.content().contains("**Text Length:** 42 characters"));
    assert_eq!(ocr.invocations(), 1);
}

#[tokio::test]
async fn test_bare_phrase_without_directive_routes() {
    let (dispatcher, _ocr) = screen_dispatcher();

    let outcome = dispatcher.dispatch("Screenshot OCR", AgentOptions::new()).await;
    assert!(matches!(outcome, DispatchOutcome::Completed { ref agent, .. } if agent == "screen-agent"));
}

#[tokio::test]
async fn test_unrelated_text_yields_help() {
    let (dispatcher, ocr) = screen_dispatcher();

    let outcome = dispatcher.dispatch("hello there", AgentOptions::new()).await;

    assert!(matches!(outcome, DispatchOutcome::Help { .. }));
    assert!(outcome.content().contains("## Orchestrator Help"));
    assert!(outcome.content().contains("`screen process`"));
    assert_eq!(ocr.invocations(), 0);
}

#[tokio::test]
async fn test_unknown_command_after_directive() {
    let (dispatcher, _ocr) = screen_dispatcher();

    let outcome = dispatcher.dispatch("run deploy everything", AgentOptions::new()).await;

    match outcome {
        DispatchOutcome::UnknownCommand { command, content } => {
            assert_eq!(command, "deploy everything");
            assert!(content.contains("- capture and extract"));
        }
        other => panic!("expected UnknownCommand, got {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_pipeline_renders_failure() {
    let (agent, _snapshot, ocr) = screen_agent(
        MockTool::returning(
            SNAPSHOT_TOOL,
            ToolResult::failure("no display", "Failed to take screenshot"),
        ),
        MockTool::returning(OCR_EXTRACT_TOOL, extract_ok("text.txt")),
    );
    let dispatcher = dispatcher_with(vec![Arc::new(agent)]);

    let response = dispatcher
        .dispatch("run screen process", AgentOptions::new())
        .await
        .into_response();

    assert!(!response.success);
    assert_eq!(response.agent.as_deref(), Some("screen-agent"));
    assert!(response.content.contains("**Details:** no display"));
    assert_eq!(ocr.invocations(), 0);
}

#[test]
fn test_exact_match_beats_earlier_substring() {
    let registry = AgentRegistry::new()
        .with_agent(single_step_agent("broad-agent", &["screen"]))
        .unwrap()
        .with_agent(single_step_agent("exact-agent", &["screen process now"]))
        .unwrap();
    let resolver = CommandResolver::from_registry(&registry).unwrap();

    assert_eq!(
        resolver.resolve("screen process now").map(|n| n.as_str()),
        Some("exact-agent")
    );
    // Falls back to the first registered substring match.
    assert_eq!(
        resolver.resolve("screen process").map(|n| n.as_str()),
        Some("broad-agent")
    );
}

#[test]
fn test_disjoint_phrases_resolve_to_their_own_agent() {
    let registry = AgentRegistry::new()
        .with_agent(single_step_agent("screen-agent", &["screen process", "screenshot ocr"]))
        .unwrap()
        .with_agent(single_step_agent("deploy-agent", &["deploy app", "ship release"]))
        .unwrap();
    let resolver = CommandResolver::from_registry(&registry).unwrap();

    for (phrase, expected) in [
        ("screen process", "screen-agent"),
        ("screenshot ocr", "screen-agent"),
        ("deploy app", "deploy-agent"),
        ("ship release", "deploy-agent"),
        ("please ship release now", "deploy-agent"),
        ("Screen Process", "screen-agent"),
    ] {
        assert_eq!(
            resolver.resolve(phrase).map(|n| n.as_str()),
            Some(expected),
            "phrase {phrase:?}"
        );
    }
    assert!(resolver.resolve("brew coffee").is_none());
}

#[test]
fn test_resolution_is_case_and_whitespace_insensitive() {
    let registry = AgentRegistry::new()
        .with_agent(single_step_agent("screen-agent", &["screen process"]))
        .unwrap();
    let resolver = CommandResolver::from_registry(&registry).unwrap();

    for input in ["SCREEN PROCESS", "  screen process\t", "please screen process it", "screen"] {
        assert_eq!(
            resolver.resolve(input).map(|n| n.as_str()),
            Some("screen-agent"),
            "input {input:?}"
        );
    }
    assert!(resolver.resolve("").is_none());
    assert!(resolver.resolve("   ").is_none());
}

#[test]
fn test_mapping_rejects_phrase_claimed_twice() {
    let registry = AgentRegistry::new()
        .with_agent(single_step_agent("one-agent", &["go"]))
        .unwrap()
        .with_agent(single_step_agent("two-agent", &["go"]))
        .unwrap();

    assert!(matches!(
        CommandMapping::from_registry(&registry),
        Err(RegistryError::DuplicateTriggerPhrase { .. })
    ));
}

#[tokio::test]
async fn test_bootstrap_applies_configuration() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let ak_dir = dir.path().join(CONFIG_DIR);
    std::fs::create_dir_all(&ak_dir).unwrap();
    std::fs::write(
        ak_dir.join("config.toml"),
        "[dispatch]\ndirective = \"do\"\nmention = \"@bot\"\n",
    )
    .unwrap();
    std::fs::write(ak_dir.join("commands.yaml"), "screen-agent:\n  - read my screen\n").unwrap();

    let (config, dispatcher) = bootstrap(dir.path()).await.expect("bootstrap succeeds");

    assert_eq!(config.global.dispatch.directive, "do");
    assert_eq!(config.global.paths.snapshots_dir, dir.path().join("snapshots"));
    assert_eq!(config.global.paths.output_dir, dir.path().join("output"));
    assert_eq!(dispatcher.registry().names(), ["screen-agent"]);
    assert_eq!(
        dispatcher
            .resolver()
            .resolve("read my screen")
            .map(|n| n.as_str()),
        Some("screen-agent")
    );

    let help = dispatcher.help();
    assert!(help.contains("**Usage:** `@bot do <command>`"));
    assert!(help.contains("`read my screen`"));
}

#[tokio::test]
async fn test_bootstrap_rejects_commands_for_unknown_agent() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let ak_dir = dir.path().join(CONFIG_DIR);
    std::fs::create_dir_all(&ak_dir).unwrap();
    std::fs::write(ak_dir.join("commands.yaml"), "ghost-agent:\n  - boo\n").unwrap();

    let err = bootstrap(dir.path()).await.err().expect("bootstrap fails");
    assert!(format!("{err:#}").contains("ghost-agent"));
}

//! Built-in agents and the tools they use.
//!
//! [`builtin_catalog`] wires the concrete tools into the shipped agents,
//! applies extra trigger phrases from configuration and registers
//! everything in a fresh [`AgentRegistry`].

use crate::agents::base::Agent;
use crate::agents::registry::{AgentRegistry, RegistryError};
use crate::agents::screen_agent::ScreenAgent;
use crate::config::models::AppConfig;
use crate::tools::base::Tool;
use crate::tools::ocr_extract::OcrExtractTool;
use crate::tools::snapshot::SnapshotTool;
use crate::tools::toolset::ToolSet;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registered agents plus the tools backing them.
pub struct Catalog {
    pub registry: AgentRegistry,
    pub tools: ToolSet,
}

/// Build the catalog of built-in agents.
///
/// # Errors
///
/// - `UnknownAgent` if `commands.yaml` names an agent that is not built in
/// - any registration error from [`AgentRegistry::register`]
pub fn builtin_catalog(config: &AppConfig) -> Result<Catalog, RegistryError> {
    let paths = &config.global.paths;
    let snapshot: Arc<dyn Tool> = Arc::new(SnapshotTool::new(&paths.snapshots_dir));
    let ocr: Arc<dyn Tool> = Arc::new(OcrExtractTool::new(&paths.output_dir));

    let mut screen = ScreenAgent::new(Arc::clone(&snapshot), Arc::clone(&ocr))?;
    if let Some(extra) = config.commands.get(screen.name().as_str()) {
        let definition = screen.definition().clone().with_trigger_phrases(extra);
        screen = screen.with_definition(definition);
    }

    let agents: Vec<Arc<dyn Agent>> = vec![Arc::new(screen)];
    let registry = register_all(agents, &config.commands)?;

    Ok(Catalog {
        registry,
        tools: ToolSet::new(vec![snapshot, ocr]),
    })
}

/// Register `agents` in order, then check that every agent named in the
/// extra commands exists.
pub fn register_all(
    agents: Vec<Arc<dyn Agent>>,
    commands: &BTreeMap<String, Vec<String>>,
) -> Result<AgentRegistry, RegistryError> {
    let mut registry = AgentRegistry::new();
    for agent in agents {
        registry.register(agent)?;
    }

    for name in commands.keys() {
        if registry.get_by_str(name).is_none() {
            return Err(RegistryError::UnknownAgent(name.clone()));
        }
    }

    Ok(registry)
}

//! Agent registry.
//!
//! The `AgentRegistry` is the single source of truth for which agents
//! exist. It is filled once at startup, then shared read-only (usually
//! behind an `Arc`) by the resolver, the dispatcher and the HTTP layer.

use crate::agents::base::Agent;
use ak_protocol::agent_models::{AgentName, AgentNameError, AgentSummary};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Startup-time configuration errors of the registry and command mapping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Agent '{0}' is already registered")]
    DuplicateAgent(String),

    #[error("Agent '{0}' declares no trigger phrases")]
    EmptyTriggerPhrases(String),

    #[error(transparent)]
    InvalidAgentName(#[from] AgentNameError),

    #[error("Command mapping references unknown agent '{0}'")]
    UnknownAgent(String),

    #[error("Trigger phrase '{phrase}' is claimed by both '{first}' and '{second}'")]
    DuplicateTriggerPhrase {
        phrase: String,
        first: String,
        second: String,
    },
}

/// Registration-ordered collection of agents keyed by [`AgentName`].
#[derive(Default, Clone)]
pub struct AgentRegistry {
    agents: Vec<Arc<dyn Agent>>,
    index: HashMap<AgentName, usize>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an agent.
    ///
    /// # Errors
    ///
    /// - `DuplicateAgent` if an agent with the same name exists
    /// - `EmptyTriggerPhrases` if the definition has no trigger phrases
    pub fn register(&mut self, agent: Arc<dyn Agent>) -> Result<(), RegistryError> {
        let definition = agent.definition();
        let name = definition.name.clone();

        if self.index.contains_key(&name) {
            return Err(RegistryError::DuplicateAgent(name.to_string()));
        }
        if definition.trigger_phrases().is_empty() {
            return Err(RegistryError::EmptyTriggerPhrases(name.to_string()));
        }

        tracing::debug!(agent = %name, commands = ?definition.trigger_phrases(), "registering agent");
        self.index.insert(name, self.agents.len());
        self.agents.push(agent);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_agent(mut self, agent: Arc<dyn Agent>) -> Result<Self, RegistryError> {
        self.register(agent)?;
        Ok(self)
    }

    /// Look up an agent. `None` is an ordinary outcome callers must handle.
    pub fn get(&self, name: &AgentName) -> Option<Arc<dyn Agent>> {
        self.index.get(name).map(|&i| Arc::clone(&self.agents[i]))
    }

    /// Look up an agent by an unvalidated string.
    pub fn get_by_str(&self, name: &str) -> Option<Arc<dyn Agent>> {
        AgentName::parse(name).ok().and_then(|name| self.get(&name))
    }

    pub fn contains(&self, name: &AgentName) -> bool {
        self.index.contains_key(name)
    }

    /// Summaries of every agent in registration order.
    ///
    /// The iterator is lazy and borrows the registry; call `list()` again
    /// to restart it.
    pub fn list(&self) -> impl Iterator<Item = AgentSummary> + '_ {
        self.agents.iter().map(|agent| agent.definition().summary())
    }

    /// Agents in registration order.
    pub fn agents(&self) -> impl Iterator<Item = &Arc<dyn Agent>> + '_ {
        self.agents.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.agents.iter().map(|a| a.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRegistry")
            .field("agents", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ak_protocol::agent_models::{AgentDefinition, AgentOptions};
    use ak_protocol::pipeline_models::PipelineReport;
    use async_trait::async_trait;

    struct StubAgent {
        definition: AgentDefinition,
    }

    impl StubAgent {
        fn arc(name: &str, phrases: &[&str]) -> Arc<dyn Agent> {
            Arc::new(Self {
                definition: AgentDefinition::new(
                    AgentName::parse(name).unwrap(),
                    format!("Test agent {name}"),
                    phrases.iter().copied(),
                ),
            })
        }
    }

    #[async_trait]
    impl Agent for StubAgent {
        fn definition(&self) -> &AgentDefinition {
            &self.definition
        }

        async fn execute(&self, _options: &AgentOptions) -> PipelineReport {
            crate::engine::fault_report(self.definition.name.clone(), "not used")
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = AgentRegistry::new();
        registry.register(StubAgent::arc("agent1", &["one"])).unwrap();
        registry.register(StubAgent::arc("agent2", &["two"])).unwrap();

        let name = AgentName::parse("agent1").unwrap();
        assert!(registry.contains(&name));
        assert_eq!(registry.get(&name).unwrap().name(), &name);
        assert!(registry.get_by_str("agent3").is_none());
        assert!(registry.get_by_str("Not A Name").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut registry = AgentRegistry::new();
        registry.register(StubAgent::arc("agent1", &["one"])).unwrap();

        let result = registry.register(StubAgent::arc("agent1", &["uno"]));
        assert_eq!(result, Err(RegistryError::DuplicateAgent("agent1".to_string())));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_without_triggers_fails() {
        let result = AgentRegistry::new().with_agent(StubAgent::arc("agent1", &[]));
        assert!(matches!(result, Err(RegistryError::EmptyTriggerPhrases(_))));
    }

    #[test]
    fn test_list_is_ordered_and_restartable() {
        let registry = AgentRegistry::new()
            .with_agent(StubAgent::arc("zeta", &["z"]))
            .unwrap()
            .with_agent(StubAgent::arc("alpha", &["a", "aa"]))
            .unwrap();

        let first: Vec<_> = registry.list().collect();
        let second: Vec<_> = registry.list().collect();
        assert_eq!(first, second);

        let names: Vec<_> = first.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha"]);
        assert_eq!(first[1].commands, ["a", "aa"]);
        assert_eq!(registry.names(), ["zeta", "alpha"]);
    }
}

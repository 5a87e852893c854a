//! Command resolution.
//!
//! Maps free text to the agent that should handle it, using a two-phase
//! match against the trigger phrases of every registered agent:
//!
//! 1. exact match on the normalized text;
//! 2. otherwise, the first `(phrase, agent)` pair in registration order
//!    where the text contains the phrase or the phrase contains the text.
//!
//! Exact matching runs first so that a short phrase that happens to be a
//! substring of a longer, unrelated phrase does not steal the match.

use crate::agents::registry::{AgentRegistry, RegistryError};
use ak_protocol::agent_models::{normalize_phrase, AgentName};
use std::collections::HashMap;

/// Read-only mapping from normalized trigger phrase to agent name.
#[derive(Debug, Clone, Default)]
pub struct CommandMapping {
    pairs: Vec<(String, AgentName)>,
    exact: HashMap<String, usize>,
}

impl CommandMapping {
    /// Build the mapping from every registered agent's trigger phrases.
    pub fn from_registry(registry: &AgentRegistry) -> Result<Self, RegistryError> {
        let pairs = registry.agents().flat_map(|agent| {
            let name = agent.name().clone();
            agent
                .definition()
                .trigger_phrases()
                .iter()
                .map(move |phrase| (phrase.clone(), name.clone()))
                .collect::<Vec<_>>()
        });
        Self::from_pairs(pairs, registry)
    }

    /// Build the mapping from explicit pairs, validated against `registry`.
    ///
    /// # Errors
    ///
    /// - `UnknownAgent` if a pair names an agent missing from the registry
    /// - `DuplicateTriggerPhrase` if two agents claim the same phrase
    pub fn from_pairs<I>(pairs: I, registry: &AgentRegistry) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (String, AgentName)>,
    {
        let mut mapping = Self::default();

        for (phrase, agent) in pairs {
            if !registry.contains(&agent) {
                return Err(RegistryError::UnknownAgent(agent.to_string()));
            }

            let phrase = normalize_phrase(&phrase);
            if phrase.is_empty() {
                continue;
            }

            if let Some(&i) = mapping.exact.get(&phrase) {
                let first = &mapping.pairs[i].1;
                if first == &agent {
                    continue;
                }
                return Err(RegistryError::DuplicateTriggerPhrase {
                    phrase,
                    first: first.to_string(),
                    second: agent.to_string(),
                });
            }

            mapping.exact.insert(phrase.clone(), mapping.pairs.len());
            mapping.pairs.push((phrase, agent));
        }

        Ok(mapping)
    }

    pub fn pairs(&self) -> &[(String, AgentName)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Resolves raw text to an agent name.
#[derive(Debug, Clone)]
pub struct CommandResolver {
    mapping: CommandMapping,
}

impl CommandResolver {
    pub fn new(mapping: CommandMapping) -> Self {
        Self { mapping }
    }

    pub fn from_registry(registry: &AgentRegistry) -> Result<Self, RegistryError> {
        Ok(Self::new(CommandMapping::from_registry(registry)?))
    }

    pub fn mapping(&self) -> &CommandMapping {
        &self.mapping
    }

    /// Resolve `raw` to the agent that handles it.
    ///
    /// Empty or whitespace-only input never matches.
    pub fn resolve(&self, raw: &str) -> Option<&AgentName> {
        let command = normalize_phrase(raw);
        if command.is_empty() {
            return None;
        }

        if let Some(&i) = self.mapping.exact.get(&command) {
            return Some(&self.mapping.pairs[i].1);
        }

        self.mapping
            .pairs
            .iter()
            .find(|(phrase, _)| command.contains(phrase.as_str()) || phrase.contains(command.as_str()))
            .map(|(_, agent)| agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::base::Agent;
    use ak_protocol::agent_models::{AgentDefinition, AgentOptions};
    use ak_protocol::pipeline_models::PipelineReport;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct StubAgent {
        definition: AgentDefinition,
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

    fn name(s: &str) -> AgentName {
        AgentName::parse(s).unwrap()
    }

    fn registry(agents: &[(&str, &[&str])]) -> AgentRegistry {
        let mut registry = AgentRegistry::new();
        for (agent, phrases) in agents {
            registry
                .register(Arc::new(StubAgent {
                    definition: AgentDefinition::new(name(agent), "stub", phrases.iter().copied()),
                }))
                .unwrap();
        }
        registry
    }

    fn screen_resolver() -> CommandResolver {
        CommandResolver::from_registry(&registry(&[(
            "screen-agent",
            &["screen process", "capture and extract", "screenshot ocr"],
        )]))
        .unwrap()
    }

    #[test]
    fn test_exact_match_is_case_and_whitespace_insensitive() {
        let resolver = screen_resolver();
        assert_eq!(resolver.resolve("  Screen PROCESS "), Some(&name("screen-agent")));
    }

    #[test]
    fn test_partial_match_both_directions() {
        let resolver = screen_resolver();

        // input contains the phrase
        assert_eq!(
            resolver.resolve("please screen process now"),
            Some(&name("screen-agent"))
        );
        // phrase contains the input
        assert_eq!(resolver.resolve("capture"), Some(&name("screen-agent")));
        assert_eq!(resolver.resolve("deploy the app"), None);
    }

    #[test]
    fn test_empty_input_never_matches() {
        let resolver = screen_resolver();
        assert_eq!(resolver.resolve(""), None);
        assert_eq!(resolver.resolve("   \t\n"), None);
    }

    #[test]
    fn test_exact_match_beats_earlier_partial_match() {
        // "ocr" is a substring of the earlier "screenshot ocr" phrase, but the
        // exact phrase of the later agent wins.
        let resolver = CommandResolver::from_registry(&registry(&[
            ("screen-agent", &["screenshot ocr"]),
            ("ocr-agent", &["ocr"]),
        ]))
        .unwrap();

        assert_eq!(resolver.resolve("ocr"), Some(&name("ocr-agent")));
    }

    #[test]
    fn test_partial_match_first_registration_wins() {
        let resolver = CommandResolver::from_registry(&registry(&[
            ("first-agent", &["report"]),
            ("second-agent", &["daily report"]),
        ]))
        .unwrap();

        // Both phrases are substrings of the input; registration order decides.
        assert_eq!(
            resolver.resolve("send the daily report please"),
            Some(&name("first-agent"))
        );
    }

    #[test]
    fn test_mapping_rejects_unknown_agent() {
        let registry = registry(&[("screen-agent", &["screen process"])]);
        let result = CommandMapping::from_pairs(
            vec![("data process".to_string(), name("data-agent"))],
            &registry,
        );

        assert_eq!(result.unwrap_err(), RegistryError::UnknownAgent("data-agent".to_string()));
    }

    #[test]
    fn test_mapping_rejects_phrase_claimed_twice() {
        let result = CommandResolver::from_registry(&registry(&[
            ("screen-agent", &["process"]),
            ("data-agent", &["Process"]),
        ]));

        assert!(matches!(
            result,
            Err(RegistryError::DuplicateTriggerPhrase { ref phrase, .. }) if phrase == "process"
        ));
    }

    #[test]
    fn test_mapping_preserves_registration_order() {
        let resolver = CommandResolver::from_registry(&registry(&[
            ("b-agent", &["two", "three"]),
            ("a-agent", &["one"]),
        ]))
        .unwrap();

        let phrases: Vec<_> = resolver
            .mapping()
            .pairs()
            .iter()
            .map(|(p, _)| p.as_str())
            .collect();
        assert_eq!(phrases, ["two", "three", "one"]);
    }
}

//! Agent definition models.
//!
//! This module defines the static metadata that describes an agent: its
//! validated name, a human-readable description and the trigger phrases
//! that route free-text commands to it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Error returned when a string is not a valid agent name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid agent name '{name}': {reason}")]
pub struct AgentNameError {
    pub name: String,
    pub reason: &'static str,
}

/// Validated agent identifier.
///
/// Agent names are non-empty and consist of lowercase ASCII letters,
/// digits and `-` (e.g. `screen-agent`). Every registry lookup is keyed
/// by this type, so an arbitrary string has to pass validation before it
/// can address an agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentName(String);

impl AgentName {
    /// Parse and validate an agent name.
    ///
    /// # Examples
    ///
    /// ```
    /// use ak_protocol::agent_models::AgentName;
    ///
    /// assert!(AgentName::parse("screen-agent").is_ok());
    /// assert!(AgentName::parse("Screen Agent").is_err());
    /// assert!(AgentName::parse("").is_err());
    /// ```
    pub fn parse(name: impl Into<String>) -> Result<Self, AgentNameError> {
        let name = name.into();

        if name.is_empty() {
            return Err(AgentNameError {
                name,
                reason: "name must not be empty",
            });
        }

        if name.starts_with('-') || name.ends_with('-') {
            return Err(AgentNameError {
                name,
                reason: "name must not start or end with '-'",
            });
        }

        let valid = name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid {
            return Err(AgentNameError {
                name,
                reason: "only lowercase ASCII letters, digits and '-' are allowed",
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AgentName {
    type Error = AgentNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<AgentName> for String {
    fn from(name: AgentName) -> Self {
        name.0
    }
}

impl AsRef<str> for AgentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize a trigger phrase or a raw command for matching.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
pub fn normalize_phrase(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Static metadata describing an agent.
///
/// Trigger phrases are stored normalized and deduplicated, keeping the
/// order in which they were first declared. Registration order of the
/// phrases matters: it is the tie-break for partial command matching.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgentDefinition {
    /// Unique identifier for this agent.
    pub name: AgentName,

    /// Human-readable description of what the agent does.
    pub description: String,

    /// Phrases recognized as invocation commands for this agent.
    trigger_phrases: Vec<String>,
}

impl AgentDefinition {
    pub fn new<I, S>(name: AgentName, description: impl Into<String>, trigger_phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut definition = Self {
            name,
            description: description.into(),
            trigger_phrases: Vec::new(),
        };
        definition.extend_trigger_phrases(trigger_phrases);
        definition
    }

    /// Append additional trigger phrases, skipping blanks and duplicates.
    pub fn extend_trigger_phrases<I, S>(&mut self, phrases: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for phrase in phrases {
            let phrase = normalize_phrase(phrase.as_ref());
            if !phrase.is_empty() && !self.trigger_phrases.contains(&phrase) {
                self.trigger_phrases.push(phrase);
            }
        }
    }

    pub fn with_trigger_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extend_trigger_phrases(phrases);
        self
    }

    pub fn trigger_phrases(&self) -> &[String] {
        &self.trigger_phrases
    }

    /// Build the public listing entry for this definition.
    pub fn summary(&self) -> AgentSummary {
        AgentSummary {
            name: self.name.to_string(),
            description: self.description.clone(),
            commands: self.trigger_phrases.clone(),
        }
    }
}

/// Listing entry exposed to callers and used for help text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AgentSummary {
    pub name: String,
    pub description: String,
    pub commands: Vec<String>,
}

/// Optional per-invocation options handed to an agent.
///
/// Keys are agent specific (e.g. `filename`, `outputFilename` for the
/// screen agent); agents ignore keys they do not understand.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct AgentOptions(BTreeMap<String, String>);

impl AgentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

//! Global configuration models for `.agent-kit/config.toml`.
//!
//! Every section and key is optional; missing values fall back to the
//! defaults documented on each field.

use serde::Deserialize;
use serde::Serialize;
use std::path::PathBuf;

/// Represents global settings from `.agent-kit/config.toml`.
///
/// # Example
///
/// ```toml
/// # .agent-kit/config.toml
/// [server]
/// host = "0.0.0.0"
/// port = 8080
///
/// [dispatch]
/// directive = "run"
/// mention = "@orchestrator"
///
/// [paths]
/// snapshots_dir = "snapshots"
/// output_dir = "output"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GlobalConfig {
    pub server: ServerConfig,
    pub dispatch: DispatchConfig,
    pub paths: PathsConfig,
}

/// HTTP listener settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind. Defaults to `127.0.0.1`.
    pub host: String,

    /// Port to bind. Defaults to `3000`; the `PORT` environment variable wins.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Command extraction settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DispatchConfig {
    /// Leading keyword that marks the rest of a message as a command.
    pub directive: String,

    /// How users address the orchestrator in chat. A leading mention is
    /// stripped before command extraction and shown in help text.
    pub mention: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            directive: "run".to_string(),
            mention: "@orchestrator".to_string(),
        }
    }
}

/// Where tools persist their artifacts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    /// Relative paths are resolved against the project root at load time.
    pub snapshots_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            snapshots_dir: PathBuf::from("snapshots"),
            output_dir: PathBuf::from("output"),
        }
    }
}

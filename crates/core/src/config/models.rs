//! Configuration models that aggregate all settings.

use ak_protocol::config_models::GlobalConfig;
use std::collections::BTreeMap;

/// Unified application configuration loaded from the `.agent-kit/` directory.
///
/// This structure aggregates all configuration sources:
/// - `config.toml`: Global settings
/// - `commands.yaml`: Extra trigger phrases per agent
///
/// # Example
///
/// ```rust,no_run
/// use ak_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Listening on port {}", config.global.server.port);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Global settings from `config.toml`.
    pub global: GlobalConfig,

    /// Extra trigger phrases keyed by agent name, from `commands.yaml`.
    pub commands: BTreeMap<String, Vec<String>>,
}

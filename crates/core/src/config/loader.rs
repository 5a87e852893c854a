//! Configuration file loader for the `.agent-kit/` directory.
//!
//! This module loads:
//! - `config.toml`: Global settings (server, dispatch, artifact paths)
//! - `commands.yaml`: Extra trigger phrases per agent
//!
//! and applies the `PORT` environment override.

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::AppConfig;
use ak_protocol::config_models::GlobalConfig;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name of the configuration directory under the project root.
pub const CONFIG_DIR: &str = ".agent-kit";

/// Loads all configuration from the `.agent-kit/` directory.
///
/// # Arguments
///
/// * `root` - Root directory containing the `.agent-kit/` folder
///
/// # Returns
///
/// An `AppConfig` containing all loaded configuration. Missing directories
/// or files yield defaults rather than an error. Relative artifact
/// directories are resolved against `root`.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - Files exist but cannot be read
/// - Files have invalid TOML or YAML syntax
/// - Values are out of range (empty directive, invalid `PORT`)
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let config = load_files(root)?;
    let config = apply_env_overrides(config, std::env::var("PORT").ok().as_deref())?;
    Ok(resolve_paths(config, root))
}

fn load_files(root: &Path) -> ConfigResult<AppConfig> {
    let ak_dir = root.join(CONFIG_DIR);

    // If .agent-kit doesn't exist, return default config
    if !ak_dir.exists() {
        return Ok(AppConfig::default());
    }

    let global = load_global_config(&ak_dir)?;
    let commands = load_commands(&ak_dir)?;

    Ok(AppConfig { global, commands })
}

/// Loads global configuration from `config.toml`.
fn load_global_config(ak_dir: &Path) -> ConfigResult<GlobalConfig> {
    let config_path = ak_dir.join("config.toml");

    if !config_path.exists() {
        return Ok(GlobalConfig::default());
    }

    let content = read(&config_path)?;

    let config: GlobalConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path.clone(),
            source,
        })?;

    let directive = config.dispatch.directive.trim();
    if directive.is_empty() || directive.contains(char::is_whitespace) {
        return Err(ConfigError::InvalidConfig {
            path: config_path,
            reason: format!(
                "dispatch.directive must be a single word, got '{}'",
                config.dispatch.directive
            ),
        });
    }

    Ok(config)
}

/// Loads extra trigger phrases from `commands.yaml`.
///
/// ```yaml
/// screen-agent:
///   - grab screen text
///   - read my screen
/// ```
fn load_commands(ak_dir: &Path) -> ConfigResult<BTreeMap<String, Vec<String>>> {
    let commands_path = ak_dir.join("commands.yaml");

    if !commands_path.exists() {
        return Ok(BTreeMap::new());
    }

    let content = read(&commands_path)?;
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    serde_yaml::from_str(&content).map_err(|source| ConfigError::YamlParse {
        path: commands_path,
        source,
    })
}

fn read(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply environment overrides on top of file configuration.
///
/// `port` is the raw value of the `PORT` variable, if set.
pub fn apply_env_overrides(mut config: AppConfig, port: Option<&str>) -> ConfigResult<AppConfig> {
    if let Some(port) = port {
        config.global.server.port =
            port.trim()
                .parse()
                .map_err(|_| ConfigError::InvalidConfig {
                    path: PathBuf::from("$PORT"),
                    reason: format!("'{port}' is not a valid port number"),
                })?;
    }
    Ok(config)
}

/// Anchor relative artifact directories at `root`; absolute ones are kept.
pub fn resolve_paths(mut config: AppConfig, root: &Path) -> AppConfig {
    let paths = &mut config.global.paths;
    for dir in [&mut paths.snapshots_dir, &mut paths.output_dir] {
        if dir.is_relative() {
            *dir = root.join(&*dir);
        }
    }
    config
}

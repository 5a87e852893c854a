//! Free-text dispatch to registered agents.
//!
//! The [`Dispatcher`] turns a line of chat text into one of three outcomes:
//! help, an unknown-command notice, or the rendered report of an agent run.
//! It shares the registry and resolver immutably, so one instance can serve
//! any number of concurrent requests.

pub mod command;
pub mod render;

use crate::agents::builtin::{builtin_catalog, Catalog};
use crate::agents::registry::{AgentRegistry, RegistryError};
use crate::agents::resolver::CommandResolver;
use crate::config::loader::load_config;
use crate::config::models::AppConfig;
use crate::engine::fault_report;
use crate::tools::toolset::ToolSet;
use ak_protocol::agent_models::{AgentOptions, AgentSummary};
use ak_protocol::config_models::DispatchConfig;
use ak_protocol::http_models::DispatchResponse;
use ak_protocol::pipeline_models::PipelineReport;
use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Result of dispatching one line of text.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// No command could be extracted; `content` lists every agent.
    Help { content: String },
    /// A command was given but no agent claims it.
    UnknownCommand { command: String, content: String },
    /// An agent ran to completion (successfully or not).
    Completed {
        agent: String,
        report: PipelineReport,
        content: String,
    },
}

impl DispatchOutcome {
    /// Rendered Markdown for the user.
    pub fn content(&self) -> &str {
        match self {
            Self::Help { content }
            | Self::UnknownCommand { content, .. }
            | Self::Completed { content, .. } => content,
        }
    }

    /// True only for a pipeline that completed every step.
    pub fn success(&self) -> bool {
        matches!(self, Self::Completed { report, .. } if report.success)
    }

    pub fn report(&self) -> Option<&PipelineReport> {
        match self {
            Self::Completed { report, .. } => Some(report),
            _ => None,
        }
    }

    pub fn into_response(self) -> DispatchResponse {
        let success = self.success();
        match self {
            Self::Help { content } | Self::UnknownCommand { content, .. } => DispatchResponse {
                success,
                content,
                agent: None,
                report: None,
            },
            Self::Completed {
                agent,
                report,
                content,
            } => DispatchResponse {
                success,
                content,
                agent: Some(agent),
                report: Some(report),
            },
        }
    }
}

/// Routes free text to agents and runs them.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<AgentRegistry>,
    resolver: Arc<CommandResolver>,
    tools: ToolSet,
    config: DispatchConfig,
}

impl Dispatcher {
    /// Build a dispatcher over `registry`, deriving the resolver from the
    /// registered trigger phrases.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateTriggerPhrase` if two agents claim the same phrase.
    pub fn new(registry: AgentRegistry, config: DispatchConfig) -> Result<Self, RegistryError> {
        let resolver = CommandResolver::from_registry(&registry)?;
        Ok(Self {
            registry: Arc::new(registry),
            resolver: Arc::new(resolver),
            tools: ToolSet::default(),
            config,
        })
    }

    pub fn from_catalog(catalog: Catalog, config: DispatchConfig) -> Result<Self, RegistryError> {
        let Catalog { registry, tools } = catalog;
        let mut dispatcher = Self::new(registry, config)?;
        dispatcher.tools = tools;
        Ok(dispatcher)
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &CommandResolver {
        &self.resolver
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn agents(&self) -> Vec<AgentSummary> {
        self.registry.list().collect()
    }

    /// Tools backing the registered agents.
    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    pub fn help(&self) -> String {
        render::format_help(&self.agents(), &self.config.mention, &self.config.directive)
    }

    /// Dispatch one line of text.
    ///
    /// A leading mention is ignored. After that the text either starts with
    /// the directive keyword, in which case the rest is the command, or is
    /// itself a command only when it resolves to an agent.
    pub async fn dispatch(&self, text: &str, options: AgentOptions) -> DispatchOutcome {
        let request_id = Uuid::new_v4();
        let text = command::strip_mention(text, &self.config.mention).trim();
        tracing::info!(%request_id, text, "dispatch received");

        if text.is_empty() {
            return DispatchOutcome::Help {
                content: self.help(),
            };
        }

        let candidate = match command::strip_directive(text, &self.config.directive) {
            Some(command) => command,
            None if self.resolver.resolve(text).is_some() => text,
            None => {
                tracing::debug!(%request_id, "no command in text");
                return DispatchOutcome::Help {
                    content: self.help(),
                };
            }
        };

        let Some(name) = self.resolver.resolve(candidate) else {
            tracing::info!(%request_id, command = candidate, "unknown command");
            return DispatchOutcome::UnknownCommand {
                command: candidate.to_string(),
                content: render::format_unknown_command(candidate, &self.agents()),
            };
        };

        let Some(agent) = self.registry.get(name) else {
            tracing::warn!(%request_id, agent = %name, "resolved agent is not registered");
            return DispatchOutcome::Help {
                content: self.help(),
            };
        };

        tracing::info!(%request_id, agent = %name, command = candidate, "routing to agent");

        let agent_name = name.clone();
        let handle = tokio::spawn(async move { agent.execute(&options).await });
        let report = match handle.await {
            Ok(report) => report,
            Err(err) => {
                tracing::error!(%request_id, agent = %agent_name, error = %err, "agent task aborted");
                fault_report(agent_name.clone(), err.to_string())
            }
        };

        tracing::info!(
            %request_id,
            agent = %agent_name,
            success = report.success,
            steps = report.steps.len(),
            "dispatch finished"
        );

        DispatchOutcome::Completed {
            agent: agent_name.to_string(),
            content: render::format_report(&report),
            report,
        }
    }
}

/// Load configuration under `root` and build a dispatcher over the built-in
/// agents.
pub async fn bootstrap(root: &Path) -> anyhow::Result<(AppConfig, Dispatcher)> {
    let config = load_config(root)
        .await
        .with_context(|| format!("Failed to load configuration from {}", root.display()))?;

    let catalog = builtin_catalog(&config).context("Failed to register built-in agents")?;
    let dispatcher = Dispatcher::from_catalog(catalog, config.global.dispatch.clone())
        .context("Failed to build command mapping")?;

    tracing::info!(
        agents = dispatcher.registry().len(),
        commands = dispatcher.resolver().mapping().len(),
        "dispatcher ready"
    );

    Ok((config, dispatcher))
}

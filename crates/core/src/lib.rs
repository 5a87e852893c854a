//! # ak-core
//!
//! Command routing and agent execution for agent-kit.
//!
//! This crate provides:
//! - Configuration loading from the `.agent-kit/` directory
//! - The agent registry and the free-text command resolver
//! - A fail-fast, step-by-step pipeline executor
//! - The tools and built-in agents that drive external programs
//! - The dispatcher that ties everything together
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and management
//! - [`agents`]: Agent trait, registry, resolver and built-in agents
//! - [`engine`]: Pipeline execution state machine
//! - [`tools`]: Tool trait and concrete tools
//! - [`dispatch`]: Text-to-agent dispatch and Markdown rendering

pub mod agents;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod tools;

//! # ak-protocol
//!
//! Core protocol definitions and data models for agent-kit.
//!
//! This crate defines all shared data structures used for:
//! - Agent metadata (names, descriptions, trigger phrases)
//! - Tool results and pipeline reports
//! - Configuration file parsing (`config.toml`)
//! - The HTTP request/response envelopes
//!
//! ## Modules
//!
//! - [`agent_models`]: Agent definitions, listing entries and options
//! - [`tool_models`]: Tagged tool results
//! - [`pipeline_models`]: Pipeline steps and reports
//! - [`config_models`]: Global configuration from config.toml
//! - [`http_models`]: Chat, dispatch, health and listing bodies
//!
//! ## Design Principles
//!
//! - Minimal dependencies: only serde, serde_json and thiserror
//! - Independent compilation: no dependencies on other agent-kit crates

pub mod agent_models;
pub mod config_models;
pub mod http_models;
pub mod pipeline_models;
pub mod tool_models;

// Re-export all public types for convenience
pub use agent_models::*;
pub use config_models::*;
pub use http_models::*;
pub use pipeline_models::*;
pub use tool_models::*;

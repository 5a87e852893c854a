//! Agent abstraction, registration and command resolution.
//!
//! This module provides the `Agent` trait, the `AgentRegistry` that owns
//! every agent, the `CommandResolver` that routes free text to an agent,
//! and the built-in agents.

pub mod base;
pub mod builtin;
pub mod registry;
pub mod resolver;
pub mod screen_agent;

pub use base::Agent;
pub use builtin::{builtin_catalog, Catalog};
pub use registry::{AgentRegistry, RegistryError};
pub use resolver::{CommandMapping, CommandResolver};
pub use screen_agent::ScreenAgent;

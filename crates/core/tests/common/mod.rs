//! Common test utilities shared by the integration suites.
//!
//! - Scripted tool results for the screen agent
//! - A generic multi-step agent built on `PipelineRun`
//! - Registry and dispatcher builders

pub mod fixtures;

#[allow(unused_imports)]
pub use fixtures::*;

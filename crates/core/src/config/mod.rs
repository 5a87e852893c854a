//! Configuration loading and management.
//!
//! This module provides functionality to load and parse the configuration
//! files of the `.agent-kit/` directory.

pub mod error;
pub mod loader;
pub mod models;

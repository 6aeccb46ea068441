//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.

mod generate;

pub use generate::{run_generate, run_generate_with};

// Re-export config types used by handlers
pub use crate::config::{GenerateConfig, GeneratePaths};

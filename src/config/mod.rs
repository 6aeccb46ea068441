//! Configuration module for pypi2nix.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation of values that end up as Nix attribute names
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pypi2nix::config::{AppConfig, Validatable};
//! use pypi2nix::config::file::load_or_default;
//!
//! let (mut config, loaded_from) = load_or_default(None)?;
//! config.merge(&AppConfig::builder().python_version("python35").build());
//! config.ensure_valid()?;
//! ```
//!
//! # Configuration File
//!
//! Place a `.pypi2nix.yaml` file in your project root or `~/.config/pypi2nix/`:
//!
//! ```yaml
//! generation:
//!   python_version: python35
//!   extra_build_inputs: [libffi]
//! licenses:
//!   aliases:
//!     Expat: mit
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{CONFIG_DIR_NAME, CONFIG_FILE_NAMES, DEFAULT_PYTHON_VERSION};
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, GenerateConfig, GeneratePaths, GenerationConfig,
    LicenseConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    ConfigFileError, discover_config_file, generate_full_example_config, load_config_file,
    load_or_default,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and complete `.pypi2nix.yaml` files.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).expect("schema serialization should not fail")
}

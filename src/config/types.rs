//! Configuration types for pypi2nix.
//!
//! Provides the file-backed [`AppConfig`] and the per-run [`GenerateConfig`]
//! the command line assembles from it.

use super::defaults::DEFAULT_PYTHON_VERSION;
use crate::model::NixLicense;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Application configuration that can be loaded from config files and
/// layered with command line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Settings embedded into the generated expressions
    pub generation: GenerationConfig,
    /// License recognition
    pub licenses: LicenseConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the interpreter package-set prefix, e.g. `python35`.
    pub fn python_version(mut self, version: impl Into<String>) -> Self {
        self.config.generation.python_version = version.into();
        self
    }

    /// Add a `pkgs` attribute to every derivation's build inputs.
    pub fn extra_build_input(mut self, input: impl Into<String>) -> Self {
        self.config.generation.extra_build_inputs.push(input.into());
        self
    }

    /// Run package test suites during the build.
    pub const fn enable_tests(mut self, enable: bool) -> Self {
        self.config.generation.enable_tests = enable;
        self
    }

    /// Recognize an additional license spelling.
    pub fn license_alias(mut self, spelling: impl Into<String>, license: NixLicense) -> Self {
        self.config.licenses.aliases.insert(spelling.into(), license);
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section Configurations
// ============================================================================

/// Settings that end up in the generated expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GenerationConfig {
    /// Interpreter package-set prefix; `python27` selects `pkgs.python27Packages`
    pub python_version: String,
    /// Attribute names from `pkgs` added to every derivation's build inputs
    pub extra_build_inputs: Vec<String>,
    /// Run package test suites during the build
    pub enable_tests: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            python_version: DEFAULT_PYTHON_VERSION.to_string(),
            extra_build_inputs: Vec::new(),
            enable_tests: false,
        }
    }
}

/// License recognition on top of the built-in table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LicenseConfig {
    /// Exact license spellings mapped to a Nix license
    pub aliases: IndexMap<String, NixLicense>,
}

/// Behavior flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Suppress progress notices (warnings are still shown)
    pub quiet: bool,
}

// ============================================================================
// Per-run Configuration
// ============================================================================

/// Input files of a `generate` run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratePaths {
    /// JSON file with the resolved package metadata
    pub metadata: PathBuf,
    /// Requirements files the metadata was resolved from
    pub requirements_files: Vec<PathBuf>,
}

/// Configuration for the `generate` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateConfig {
    pub paths: GeneratePaths,
    /// Base name of the output files; derived from the first requirements
    /// file when absent
    pub requirements_name: Option<String>,
    /// Packages requested directly by the user
    pub top_level: Vec<String>,
    /// The invocation, recorded in the generated files
    pub command_arguments: String,
    pub generation: GenerationConfig,
    pub licenses: LicenseConfig,
    pub behavior: BehaviorConfig,
}

impl GenerateConfig {
    /// Run configuration with every file-backed section taken from `app`.
    #[must_use]
    pub fn from_app(app: AppConfig, paths: GeneratePaths) -> Self {
        Self {
            paths,
            generation: app.generation,
            licenses: app.licenses,
            behavior: app.behavior,
            ..Self::default()
        }
    }

    /// The output base name: explicit, or the stem of the first requirements file.
    #[must_use]
    pub fn effective_requirements_name(&self) -> Option<String> {
        self.requirements_name.clone().or_else(|| {
            self.paths
                .requirements_files
                .first()
                .and_then(|path| path.file_stem())
                .map(|stem| stem.to_string_lossy().into_owned())
        })
    }
}

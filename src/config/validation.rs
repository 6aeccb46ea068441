//! Configuration validation for pypi2nix.
//!
//! Values that end up as Nix attribute names cannot be quoted, so they are
//! checked here before anything is rendered.

use super::types::{AppConfig, BehaviorConfig, GenerateConfig, GenerationConfig, LicenseConfig};
use crate::error::{Pypi2NixError, Result};
use crate::render::escape::{is_nix_attr_path, is_nix_identifier, is_nix_path_segment};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Fail with every validation error joined into one message.
    fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(Pypi2NixError::config(joined))
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.generation.validate());
        errors.extend(self.licenses.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for GenerationConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !is_nix_identifier(&self.python_version) {
            errors.push(ConfigError::new(
                "generation.python_version",
                format!(
                    "'{}' is not a Nix identifier (expected e.g. python27 or python35)",
                    self.python_version
                ),
            ));
        }

        for input in &self.extra_build_inputs {
            if !is_nix_attr_path(input) {
                errors.push(ConfigError::new(
                    "generation.extra_build_inputs",
                    format!("'{input}' is not a Nix attribute path"),
                ));
            }
        }

        errors
    }
}

impl Validatable for LicenseConfig {
    fn validate(&self) -> Vec<ConfigError> {
        self.aliases
            .keys()
            .filter(|spelling| spelling.trim().is_empty())
            .map(|_| ConfigError::new("licenses.aliases", "alias spelling must not be empty"))
            .collect()
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for GenerateConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.paths.requirements_files.is_empty() {
            errors.push(ConfigError::new(
                "requirements_files",
                "at least one requirements file is required",
            ));
        }

        match self.effective_requirements_name() {
            Some(name) if name.is_empty() || !is_nix_path_segment(&name) => {
                errors.push(ConfigError::new(
                    "requirements_name",
                    format!("'{name}' may only contain letters, digits, '.', '_', '+' and '-'"),
                ));
            }
            Some(_) => {}
            None if self.paths.requirements_files.is_empty() => {}
            None => errors.push(ConfigError::new(
                "requirements_name",
                "cannot derive a name from the first requirements file",
            )),
        }

        errors.extend(self.generation.validate());
        errors.extend(self.licenses.validate());
        errors
    }
}

//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::defaults::{CONFIG_DIR_NAME, CONFIG_FILE_NAMES, DEFAULT_PYTHON_VERSION};
use super::types::AppConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/pypi2nix/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Some(path) = find_config_in_dir(&cwd)
    {
        return Some(path);
    }

    if let Some(git_root) = find_git_root()
        && let Some(path) = find_config_in_dir(&git_root)
    {
        return Some(path);
    }

    if let Some(config_dir) = dirs::config_dir()
        && let Some(path) = find_config_in_dir(&config_dir.join(CONFIG_DIR_NAME))
    {
        return Some(path);
    }

    if let Some(home) = dirs::home_dir()
        && let Some(path) = find_config_in_dir(&home)
    {
        return Some(path);
    }

    None
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// File not found
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error reading file
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// YAML parsing error
    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| ConfigFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load config from the explicit or discovered file, or return default.
///
/// An explicit path must exist. A file that exists but cannot be read or
/// parsed is an error wherever it was found.
pub fn load_or_default(
    explicit_path: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    let path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => match discover_config_file(None) {
            Some(path) => path,
            None => return Ok((AppConfig::default(), None)),
        },
    };

    let config = load_config_file(&path)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok((config, Some(path)))
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Values still at their default in `other` do not override. Aliases are
    /// combined, `other` winning on equal spellings.
    pub fn merge(&mut self, other: &Self) {
        if other.generation.python_version != DEFAULT_PYTHON_VERSION {
            self.generation
                .python_version
                .clone_from(&other.generation.python_version);
        }
        if !other.generation.extra_build_inputs.is_empty() {
            self.generation
                .extra_build_inputs
                .clone_from(&other.generation.extra_build_inputs);
        }
        if other.generation.enable_tests {
            self.generation.enable_tests = true;
        }

        for (spelling, license) in &other.licenses.aliases {
            self.licenses.aliases.insert(spelling.clone(), *license);
        }

        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> Result<(Self, Option<PathBuf>), ConfigFileError> {
        let (mut config, loaded_from) = load_or_default(config_path)?;
        config.merge(cli_overrides);
        Ok((config, loaded_from))
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# pypi2nix Configuration File
# ============================
#
# Place it at:
#   - .pypi2nix.yaml in your project root
#   - ~/.config/pypi2nix/pypi2nix.yaml for global config
#
# Command line flags always override file settings.

# Values embedded into the generated expressions
generation:
  # Interpreter package set: python27 selects pkgs.python27Packages
  python_version: python27
  # Attributes of pkgs added to every package's buildInputs
  extra_build_inputs: []
  #   - libffi
  #   - openssl
  # Run package test suites during the build
  enable_tests: false

# License spellings to recognize on top of the built-in table.
# Values: zpt21, mit, bsd_original, asl20, lgpl3, psfl
licenses:
  aliases: {}
  #   Expat: mit
  #   ZPL 2.1: zpt21

# Behavior flags
behavior:
  # Suppress progress notices; warnings are still printed
  quiet: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

//! Default values for pypi2nix configuration.

/// Interpreter package set used when none is configured.
pub const DEFAULT_PYTHON_VERSION: &str = "python27";

/// Config file names searched for, in order, in every discovery location.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".pypi2nix.yaml",
    ".pypi2nix.yml",
    "pypi2nix.yaml",
    "pypi2nix.yml",
];

/// Directory below the platform config dir holding the user config.
pub const CONFIG_DIR_NAME: &str = "pypi2nix";

//! Normalized per-package records and run-wide render parameters.

use super::{PackageMetadata, ResolvedLicense};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A package ready for rendering: license and dependencies already resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedPackageRecord {
    /// The metadata this record was derived from
    pub metadata: PackageMetadata,
    pub resolved_license: ResolvedLicense,
    /// Display names of sibling packages this one depends on, sorted and unique
    pub resolved_deps: BTreeSet<String>,
    /// Whether the user asked for this package directly
    pub is_top_level: bool,
}

impl NormalizedPackageRecord {
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

/// Run-wide values embedded into the rendered documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunParameters {
    /// Version of this tool, recorded in the provenance header
    pub tool_version: String,
    /// Invocation arguments, recorded in the provenance header
    pub command_arguments: String,
    /// Interpreter package-set prefix, e.g. `python27` for `pkgs.python27Packages`
    pub python_version: String,
    /// Attribute names from `pkgs` added to every derivation's `buildInputs`
    pub extra_build_inputs: Vec<String>,
    pub enable_tests: bool,
    /// File name of the generated document, relative to the entry point
    pub generated_file_name: String,
    /// File name of the override document, relative to the entry point
    pub overrides_file_name: String,
}

impl RunParameters {
    /// Parameters with file names derived from the requirements name.
    pub fn new(requirements_name: &str, python_version: impl Into<String>) -> Self {
        Self {
            tool_version: String::new(),
            command_arguments: String::new(),
            python_version: python_version.into(),
            extra_build_inputs: Vec::new(),
            enable_tests: false,
            generated_file_name: format!("{requirements_name}_generated.nix"),
            overrides_file_name: format!("{requirements_name}_override.nix"),
        }
    }
}

//! Pipeline orchestration for expression generation.
//!
//! This module ties the stages together: normalize the resolved metadata,
//! render the three documents once, then write them in a fixed order.

mod normalize;
mod output;

pub use normalize::normalize_packages;
pub use output::{OutputPaths, write_document, write_document_if_absent};

use crate::error::Result;
use crate::model::{NixLicense, PackageMetadata, RunParameters};
use crate::notify::{CountingNotifier, Notifier};
use crate::render::{DocumentKind, DocumentRenderer, NixRenderer};
use crate::resolve::LicenseResolver;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::PathBuf;

/// Everything one generation run needs.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Resolved packages, in any order
    pub packages_metadata: Vec<PackageMetadata>,
    /// Base name of the output files, e.g. `requirements`
    pub requirements_name: String,
    /// Requirements files; the first one decides the output directory
    pub requirements_files: Vec<PathBuf>,
    pub extra_build_inputs: Vec<String>,
    pub enable_tests: bool,
    pub python_version: String,
    /// Exact names of the packages the user asked for directly
    pub top_level: HashSet<String>,
    pub tool_version: String,
    pub command_arguments: String,
    /// Extra license spellings on top of the built-in table
    pub license_aliases: IndexMap<String, NixLicense>,
}

impl GenerateRequest {
    fn run_parameters(&self) -> RunParameters {
        RunParameters {
            tool_version: self.tool_version.clone(),
            command_arguments: self.command_arguments.clone(),
            extra_build_inputs: self.extra_build_inputs.clone(),
            enable_tests: self.enable_tests,
            ..RunParameters::new(&self.requirements_name, self.python_version.clone())
        }
    }
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Files written, in write order
    pub written: Vec<PathBuf>,
    /// Whether the override file was created by this run
    pub overrides_created: bool,
    /// Packages rendered after duplicates collapsed
    pub package_count: usize,
    /// Warnings emitted during the run
    pub warning_count: usize,
}

/// Exit codes for the command line
pub mod exit_codes {
    /// Documents were written; warnings do not change this
    pub const SUCCESS: i32 = 0;
    /// A fatal error stopped the run
    pub const ERROR: i32 = 1;
}

/// Generate and write the Nix documents for one requirements set.
///
/// The generated file and the entry point are overwritten on every run. The
/// override file is only created when missing, so hand edits survive.
pub fn run(request: &GenerateRequest, notifier: &mut dyn Notifier) -> Result<GenerateSummary> {
    let paths =
        OutputPaths::from_requirements(&request.requirements_files, &request.requirements_name)?;
    let params = request.run_parameters();
    let licenses = LicenseResolver::new().with_aliases(request.license_aliases.clone());

    let mut counting = CountingNotifier::new(notifier);

    let records = normalize_packages(
        &request.packages_metadata,
        &request.top_level,
        &licenses,
        &mut counting,
    );
    let documents = NixRenderer::new().render(&records, &params)?;

    let mut written = Vec::with_capacity(3);
    let mut overrides_created = false;

    for kind in DocumentKind::write_order() {
        let path = paths.get(kind);
        let content = documents.get(kind);

        if kind.preserves_existing() {
            if !write_document_if_absent(path, content)? {
                tracing::debug!(path = %path.display(), "keeping existing {kind} file");
                continue;
            }
            overrides_created = true;
        } else {
            write_document(path, content)?;
        }

        counting.progress(&format!("writing {}", path.display()));
        written.push(path.to_path_buf());
    }

    let summary = GenerateSummary {
        written,
        overrides_created,
        package_count: records.len(),
        warning_count: counting.warnings,
    };

    tracing::info!(
        packages = summary.package_count,
        warnings = summary.warning_count,
        files = summary.written.len(),
        "generation complete"
    );

    Ok(summary)
}

//! Generate command handler.
//!
//! Implements the `generate` subcommand: read resolved metadata, write the
//! Nix expressions next to the requirements file.

use crate::config::{GenerateConfig, Validatable};
use crate::model::load_metadata_file;
use crate::notify::{ConsoleNotifier, Notifier};
use crate::pipeline::{self, GenerateRequest, GenerateSummary};
use anyhow::{Context, Result};

/// Run the generate command, printing notices to stdout.
pub fn run_generate(config: GenerateConfig) -> Result<GenerateSummary> {
    let mut notifier = ConsoleNotifier::new().quiet(config.behavior.quiet);
    run_generate_with(config, &mut notifier)
}

/// Run the generate command with a caller-supplied notifier.
#[allow(clippy::needless_pass_by_value)]
pub fn run_generate_with(
    config: GenerateConfig,
    notifier: &mut dyn Notifier,
) -> Result<GenerateSummary> {
    config.ensure_valid()?;

    let requirements_name = config
        .effective_requirements_name()
        .context("cannot derive an output name from the requirements files")?;

    let packages_metadata = load_metadata_file(&config.paths.metadata).with_context(|| {
        format!(
            "failed to load package metadata from {}",
            config.paths.metadata.display()
        )
    })?;

    tracing::info!(
        "Loaded {} packages from {}",
        packages_metadata.len(),
        config.paths.metadata.display()
    );

    let request = GenerateRequest {
        packages_metadata,
        requirements_name,
        requirements_files: config.paths.requirements_files,
        extra_build_inputs: config.generation.extra_build_inputs,
        enable_tests: config.generation.enable_tests,
        python_version: config.generation.python_version,
        top_level: config.top_level.into_iter().collect(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        command_arguments: config.command_arguments,
        license_aliases: config.licenses.aliases,
    };

    pipeline::run(&request, notifier).context("failed to generate Nix expressions")
}

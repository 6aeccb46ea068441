//! pypi2nix: Nix expressions for resolved Python packages
//!
//! Turns the package metadata produced by a dependency resolver into a
//! `python.mkDerivation` package set plus an entry point and override file.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use pypi2nix::{
    cli,
    config::{AppConfig, GenerateConfig, GeneratePaths},
    pipeline::exit_codes,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pypi2nix")]
#[command(version)]
#[command(about = "Generate Nix expressions for resolved Python packages", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Expressions written (unrecognized licenses only warn)
    1  Error occurred

EXAMPLES:
    # Write requirements.nix, requirements_generated.nix and requirements_override.nix
    pypi2nix generate --metadata metadata.json -r requirements.txt --top-level Flask

    # Target Python 3.5 and add native build inputs
    pypi2nix generate --metadata metadata.json -r requirements.txt -V python35 -E libffi")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress progress notices
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `generate` subcommand
#[derive(Parser)]
struct GenerateArgs {
    /// JSON file with the resolved package metadata
    #[arg(long, value_name = "FILE")]
    metadata: PathBuf,

    /// Requirements file the metadata was resolved from (repeatable; the
    /// first one decides where the output goes)
    #[arg(short = 'r', long = "requirements-file", value_name = "FILE", required = true)]
    requirements_files: Vec<PathBuf>,

    /// Base name of the output files (default: stem of the first requirements file)
    #[arg(long)]
    name: Option<String>,

    /// Interpreter package set, e.g. python27 or python35
    #[arg(short = 'V', long, env = "PYPI2NIX_PYTHON_VERSION")]
    python_version: Option<String>,

    /// Attribute of pkgs added to every package's build inputs (repeatable)
    #[arg(short = 'E', long = "extra-build-input", value_name = "ATTR")]
    extra_build_inputs: Vec<String>,

    /// Run package test suites during the build
    #[arg(long)]
    enable_tests: bool,

    /// Package requested directly by the user (repeatable)
    #[arg(long = "top-level", value_name = "NAME")]
    top_level: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Nix expressions from resolved package metadata
    Generate(GenerateArgs),

    /// Print a commented example config file
    InitConfig,

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    if let Err(err) = dispatch(cli) {
        eprintln!("Error: {err:?}");
        std::process::exit(exit_codes::ERROR);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate(args) => {
            let cli_overrides = args
                .extra_build_inputs
                .iter()
                .fold(AppConfig::builder(), |builder, input| {
                    builder.extra_build_input(input.as_str())
                })
                .enable_tests(args.enable_tests)
                .quiet(cli.quiet)
                .build();

            let (mut app_config, loaded_from) =
                AppConfig::from_file_with_overrides(cli.config.as_deref(), &cli_overrides)
                    .context("failed to load configuration")?;
            if let Some(path) = &loaded_from {
                tracing::debug!("Using config file {}", path.display());
            }
            if let Some(python_version) = args.python_version {
                app_config.generation.python_version = python_version;
            }

            let config = GenerateConfig {
                requirements_name: args.name,
                top_level: args.top_level,
                command_arguments: invocation_arguments(),
                ..GenerateConfig::from_app(
                    app_config,
                    GeneratePaths {
                        metadata: args.metadata,
                        requirements_files: args.requirements_files,
                    },
                )
            };

            let summary = cli::run_generate(config)?;
            tracing::debug!(
                "Wrote {} files ({} warnings)",
                summary.written.len(),
                summary.warning_count
            );
            Ok(())
        }

        Commands::InitConfig => {
            print!("{}", pypi2nix::config::generate_full_example_config());
            Ok(())
        }

        Commands::ConfigSchema { output } => {
            let schema = pypi2nix::config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "pypi2nix", &mut io::stdout());
            Ok(())
        }
    }
}

/// The arguments this process was started with, joined by single spaces.
fn invocation_arguments() -> String {
    std::env::args().skip(1).collect::<Vec<_>>().join(" ")
}

//! **Nix expressions for resolved Python packages.**
//!
//! `pypi2nix` takes the metadata of an already resolved set of Python
//! packages (name, version, source URL, digest, declared dependencies,
//! license, homepage, description) and turns it into three Nix files:
//!
//! - `<name>_generated.nix`: a `python.mkDerivation` per package, regenerated
//!   on every run
//! - `<name>_override.nix`: an empty overlay for hand edits, created once and
//!   never touched again
//! - `<name>.nix`: the entry point composing both into a Python environment
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`PackageMetadata`] as it comes in, the case-insensitive
//!   [`MetadataIndex`], and the [`NormalizedPackageRecord`]s handed to the renderer.
//! - **[`resolve`]**: license recognition ([`LicenseResolver`]) and dependency
//!   linking against the resolved set.
//! - **[`render`]**: the [`DocumentRenderer`] trait and its Nix implementation.
//! - **[`pipeline`]**: [`run`] ties everything together and writes the files.
//! - **[`notify`]**: warnings and progress notices, kept apart from logging.
//! - **[`config`]**: YAML config discovery, validation and merging.
//!
//! ## Getting Started
//!
//! ```no_run
//! use pypi2nix::{GenerateRequest, RecordingNotifier, load_metadata_file};
//! use std::path::{Path, PathBuf};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let request = GenerateRequest {
//!         packages_metadata: load_metadata_file(Path::new("metadata.json"))?,
//!         requirements_name: "requirements".to_string(),
//!         requirements_files: vec![PathBuf::from("requirements.txt")],
//!         python_version: "python35".to_string(),
//!         top_level: ["Flask".to_string()].into(),
//!         ..GenerateRequest::default()
//!     };
//!
//!     let mut notifier = RecordingNotifier::new();
//!     let summary = pypi2nix::run(&request, &mut notifier)?;
//!
//!     for warning in notifier.warning_lines() {
//!         println!("{warning}");
//!     }
//!     println!("Rendered {} packages", summary.package_count);
//!     Ok(())
//! }
//! ```

#![warn(clippy::unwrap_used)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod notify;
pub mod pipeline;
pub mod render;
pub mod resolve;

// Re-export main types for convenience
pub use error::{ErrorContext, OptionContext, Pypi2NixError, Result};
pub use model::{
    MetadataIndex, NixLicense, NormalizedPackageRecord, PackageMetadata, ResolvedLicense,
    RunParameters, load_metadata_file, load_metadata_str,
};
pub use notify::{ConsoleNotifier, Notifier, RecordingNotifier};
pub use pipeline::{GenerateRequest, GenerateSummary, OutputPaths, run};
pub use render::{DocumentKind, DocumentRenderer, NixRenderer, RenderedDocuments};
pub use resolve::LicenseResolver;

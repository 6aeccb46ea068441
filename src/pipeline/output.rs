//! Output handling for generated Nix files.
//!
//! Provides path derivation for a requirements set and the two write modes:
//! overwrite, and create-only for files the user is expected to edit.

use crate::error::{OptionContext, Pypi2NixError, Result};
use crate::render::DocumentKind;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where the three documents of a requirements set live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Directory holding all three files
    pub project_dir: PathBuf,
    /// `<name>.nix`
    pub entry_point: PathBuf,
    /// `<name>_generated.nix`
    pub generated: PathBuf,
    /// `<name>_override.nix`
    pub overrides: PathBuf,
}

impl OutputPaths {
    /// Place the files next to a requirements file.
    pub fn beside(requirements_file: &Path, requirements_name: &str) -> Self {
        let project_dir = requirements_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::in_dir(project_dir, requirements_name)
    }

    /// Place the files in `project_dir`.
    pub fn in_dir(project_dir: impl Into<PathBuf>, requirements_name: &str) -> Self {
        let project_dir = project_dir.into();
        Self {
            entry_point: project_dir.join(format!("{requirements_name}.nix")),
            generated: project_dir.join(format!("{requirements_name}_generated.nix")),
            overrides: project_dir.join(format!("{requirements_name}_override.nix")),
            project_dir,
        }
    }

    /// Derive paths from the first of the requirements files.
    pub fn from_requirements(
        requirements_files: &[PathBuf],
        requirements_name: &str,
    ) -> Result<Self> {
        let first = requirements_files.first().context_none(
            "at least one requirements file is needed to locate the output directory",
        )?;
        Ok(Self::beside(first, requirements_name))
    }

    /// Path of one document.
    pub fn get(&self, kind: DocumentKind) -> &Path {
        match kind {
            DocumentKind::Generated => &self.generated,
            DocumentKind::Overrides => &self.overrides,
            DocumentKind::EntryPoint => &self.entry_point,
        }
    }
}

/// Replace the file at `path` with `content`.
pub fn write_document(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| Pypi2NixError::io(path, e))
}

/// Create `path` with `content` unless it already exists.
///
/// Returns `false` when an existing file was left alone. A partial write is
/// removed again, so the next run creates the file afresh.
pub fn write_document_if_absent(path: &Path, content: &str) -> Result<bool> {
    create_new_with(path, |file| {
        file.write_all(content.as_bytes())?;
        file.flush()
    })
}

fn create_new_with(
    path: &Path,
    fill: impl FnOnce(&mut File) -> std::io::Result<()>,
) -> Result<bool> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(Pypi2NixError::io(path, e)),
    };

    if let Err(e) = fill(&mut file) {
        drop(file);
        if let Err(cleanup) = std::fs::remove_file(path) {
            tracing::warn!(path = %path.display(), "could not remove partial file: {cleanup}");
        }
        return Err(Pypi2NixError::io(path, e));
    }
    Ok(true)
}

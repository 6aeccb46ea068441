//! Rendering of normalized package records into Nix expressions.
//!
//! Rendering is pure: records and run parameters in, three strings out. The
//! pipeline decides which of them reach the disk.
//!
//! # Security
//!
//! The `escape` module provides the quoting rules for Nix string literals.
//! Every value that originates from package metadata is escaped before it is
//! embedded; attribute names (hash types, interpreter and build-input names)
//! are validated instead, since they cannot be quoted.

pub mod escape;
mod nix;

pub use nix::{
    NixRenderer, build_inputs_expression, license_expression, render_entry_point,
    render_generated,
};

use crate::error::Result;
use crate::model::{NormalizedPackageRecord, RunParameters};
use std::fmt;

/// The three documents produced for one requirements set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocuments {
    /// Package set, regenerated on every run
    pub generated: String,
    /// User overlay, only written when it does not exist yet
    pub overrides: String,
    /// Entry point composing the two
    pub entry_point: String,
}

impl RenderedDocuments {
    /// Content of one document.
    #[must_use]
    pub fn get(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Generated => &self.generated,
            DocumentKind::Overrides => &self.overrides,
            DocumentKind::EntryPoint => &self.entry_point,
        }
    }
}

/// Identifies one of the rendered documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Generated,
    Overrides,
    EntryPoint,
}

impl DocumentKind {
    /// Documents in the order they are written.
    #[must_use]
    pub const fn write_order() -> [Self; 3] {
        [Self::Generated, Self::Overrides, Self::EntryPoint]
    }

    /// Whether an existing file must be left untouched.
    #[must_use]
    pub const fn preserves_existing(&self) -> bool {
        matches!(self, Self::Overrides)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated => write!(f, "generated"),
            Self::Overrides => write!(f, "overrides"),
            Self::EntryPoint => write!(f, "entry point"),
        }
    }
}

/// Trait for document renderers.
pub trait DocumentRenderer {
    /// Render all documents. `records` must already be sorted by name.
    fn render(
        &self,
        records: &[NormalizedPackageRecord],
        params: &RunParameters,
    ) -> Result<RenderedDocuments>;
}

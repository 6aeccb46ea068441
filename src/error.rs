//! Unified error types for pypi2nix.
//!
//! This module provides the error hierarchy for the library, with context
//! strings that chain as errors travel up through the pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pypi2nix operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Pypi2NixError {
    /// Errors while loading package metadata
    #[error("Failed to load package metadata: {context}")]
    Metadata {
        context: String,
        #[source]
        source: MetadataErrorKind,
    },

    /// Errors while rendering Nix documents
    #[error("Rendering failed: {context}")]
    Render {
        context: String,
        #[source]
        source: RenderErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific metadata error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MetadataErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Expected a list of packages or an object with a `packages` list")]
    UnexpectedShape,
}

/// Specific render error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RenderErrorKind {
    #[error("Hash type `{0}` is not a valid Nix attribute name")]
    InvalidHashType(String),

    #[error("Invalid {field} `{value}`: expected a Nix attribute name")]
    InvalidAttribute { field: String, value: String },

    #[error("File name `{0}` cannot be imported as a Nix path")]
    InvalidFileName(String),

    #[error("Formatting failed: {0}")]
    Format(#[from] std::fmt::Error),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for pypi2nix operations
pub type Result<T> = std::result::Result<T, Pypi2NixError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl Pypi2NixError {
    /// Create a metadata error with context
    pub fn metadata(context: impl Into<String>, source: MetadataErrorKind) -> Self {
        Self::Metadata {
            context: context.into(),
            source,
        }
    }

    /// Create a metadata error for a missing field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::metadata(
            "missing required field",
            MetadataErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Create a render error with context
    pub fn render(context: impl Into<String>, source: RenderErrorKind) -> Self {
        Self::Render {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for Pypi2NixError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for Pypi2NixError {
    fn from(err: serde_json::Error) -> Self {
        Self::metadata(
            "JSON deserialization",
            MetadataErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<std::fmt::Error> for Pypi2NixError {
    fn from(err: std::fmt::Error) -> Self {
        Self::render("writing document", RenderErrorKind::Format(err))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to any context the error already carries,
/// so a failure reads as a path through the pipeline:
///
/// ```ignore
/// use pypi2nix::error::ErrorContext;
///
/// let packages = load_metadata_str(&content)
///     .with_context(|| format!("reading {}", path.display()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<Pypi2NixError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: Pypi2NixError, new_ctx: &str) -> Pypi2NixError {
    match err {
        Pypi2NixError::Metadata {
            context: existing,
            source,
        } => Pypi2NixError::Metadata {
            context: chain_context(new_ctx, &existing),
            source,
        },
        Pypi2NixError::Render {
            context: existing,
            source,
        } => Pypi2NixError::Render {
            context: chain_context(new_ctx, &existing),
            source,
        },
        Pypi2NixError::Io {
            path,
            message,
            source,
        } => Pypi2NixError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        Pypi2NixError::Config(msg) => Pypi2NixError::Config(chain_context(new_ctx, &msg)),
        Pypi2NixError::Validation(msg) => Pypi2NixError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// Returns "`new`: `existing`", or just `new` when nothing existed before.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| Pypi2NixError::Validation(context.into()))
    }
}

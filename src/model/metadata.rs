//! Resolved package metadata as handed over by the dependency resolver.

use crate::error::{ErrorContext, MetadataErrorKind, Pypi2NixError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Fields every package record must carry.
const REQUIRED_FIELDS: &[&str] = &["name", "version", "url", "hash_type", "hash_value"];

/// Metadata for one resolved Python package.
///
/// The name keeps its upstream display case; lookups against other packages
/// are case-insensitive (see [`MetadataIndex`](super::MetadataIndex)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    /// Package name as published
    pub name: String,
    /// Exact resolved version
    pub version: String,
    /// Source artifact location
    pub url: String,
    /// Digest algorithm, used as the `fetchurl` attribute name (e.g. `sha256`)
    pub hash_type: String,
    /// Digest value
    pub hash_value: String,
    /// Declared dependency names, possibly naming packages outside the resolved set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deps: Option<Vec<String>>,
    /// Free-text license string from the package metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default)]
    pub homepage: String,
    #[serde(default)]
    pub description: String,
}

impl PackageMetadata {
    /// Create a record with the required fields and everything else empty.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        url: impl Into<String>,
        hash_type: impl Into<String>,
        hash_value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            url: url.into(),
            hash_type: hash_type.into(),
            hash_value: hash_value.into(),
            deps: None,
            license: None,
            homepage: String::new(),
            description: String::new(),
        }
    }

    /// Set the declared dependencies.
    #[must_use]
    pub fn with_deps<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deps = Some(deps.into_iter().map(Into::into).collect());
        self
    }

    /// Set the license string.
    #[must_use]
    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    #[must_use]
    pub fn with_homepage(mut self, homepage: impl Into<String>) -> Self {
        self.homepage = homepage.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Lower-cased name used as the lookup key.
    pub fn name_key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Attribute name of the derivation, `name-version`.
    pub fn derivation_name(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }
}

/// Parse package metadata from a JSON string.
///
/// Accepts either a bare array of package objects or an object with a
/// `packages` array. Unknown fields are ignored.
pub fn load_metadata_str(content: &str) -> Result<Vec<PackageMetadata>> {
    let value: Value = serde_json::from_str(content)?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("packages") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(Pypi2NixError::metadata(
                    "top-level object",
                    MetadataErrorKind::UnexpectedShape,
                ));
            }
        },
        _ => {
            return Err(Pypi2NixError::metadata(
                "top-level value",
                MetadataErrorKind::UnexpectedShape,
            ));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(position, item)| {
            let label = describe_item(position, &item);
            check_required_fields(&item, &label)?;
            serde_json::from_value::<PackageMetadata>(item).context(label)
        })
        .collect()
}

/// Read and parse a package metadata JSON file.
pub fn load_metadata_file(path: &Path) -> Result<Vec<PackageMetadata>> {
    tracing::debug!("Loading package metadata from {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| Pypi2NixError::io(path, e))?;
    let packages = load_metadata_str(&content)
        .with_context(|| format!("reading {}", path.display()))?;

    tracing::debug!("Loaded {} package records", packages.len());
    Ok(packages)
}

fn describe_item(position: usize, item: &Value) -> String {
    match item.get("name").and_then(Value::as_str) {
        Some(name) => format!("package #{position} (`{name}`)"),
        None => format!("package #{position}"),
    }
}

fn check_required_fields(item: &Value, label: &str) -> Result<()> {
    for field in REQUIRED_FIELDS {
        if item.get(*field).is_none_or(Value::is_null) {
            return Err(Pypi2NixError::missing_field(*field, label));
        }
    }
    Ok(())
}

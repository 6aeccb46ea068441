//! Case-insensitive lookup index over the resolved package set.
//!
//! The index is two-tier: keys are lower-cased names, values keep the
//! package's display-case metadata, so matching ignores case while rendered
//! references use the name exactly as published.
//!
//! ```ignore
//! let index = MetadataIndex::build(&packages);
//!
//! // "django" and "Django" find the same package
//! let canonical = index.canonical_name("django");
//! ```

use super::PackageMetadata;
use std::collections::HashMap;

/// A package that was replaced by a later record with the same lower-cased name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateName {
    /// Display name of the record that was dropped
    pub replaced: String,
    /// Display name of the record that took its place
    pub kept: String,
}

/// Index from lower-cased package name to package metadata.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct MetadataIndex<'a> {
    by_name_lower: HashMap<String, &'a PackageMetadata>,
    duplicates: Vec<DuplicateName>,
}

impl<'a> MetadataIndex<'a> {
    /// Build the index. Later records win over earlier ones with the same
    /// lower-cased name; every replacement is recorded in [`Self::duplicates`].
    pub fn build(packages: &'a [PackageMetadata]) -> Self {
        let mut by_name_lower: HashMap<String, &'a PackageMetadata> =
            HashMap::with_capacity(packages.len());
        let mut duplicates = Vec::new();

        for package in packages {
            if let Some(previous) = by_name_lower.insert(package.name_key(), package) {
                duplicates.push(DuplicateName {
                    replaced: previous.name.clone(),
                    kept: package.name.clone(),
                });
            }
        }

        Self {
            by_name_lower,
            duplicates,
        }
    }

    /// Look up a package by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&'a PackageMetadata> {
        self.by_name_lower.get(&name.to_lowercase()).copied()
    }

    /// Display-case name of the indexed package matching `name`.
    pub fn canonical_name(&self, name: &str) -> Option<&'a str> {
        self.get(name).map(|pkg| pkg.name.as_str())
    }

    /// Records that were shadowed by a later record with the same name.
    pub fn duplicates(&self) -> &[DuplicateName] {
        &self.duplicates
    }

    /// The surviving records, one per lower-cased name, in no particular order.
    pub fn packages(&self) -> impl Iterator<Item = &'a PackageMetadata> + '_ {
        self.by_name_lower.values().copied()
    }

    pub fn len(&self) -> usize {
        self.by_name_lower.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name_lower.is_empty()
    }
}

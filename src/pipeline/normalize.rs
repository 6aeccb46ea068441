//! Normalization stage.
//!
//! Turns raw package metadata into sorted [`NormalizedPackageRecord`]s ready
//! for rendering.

use crate::model::{MetadataIndex, NormalizedPackageRecord, PackageMetadata};
use crate::notify::Notifier;
use crate::resolve::{LicenseResolver, link_for};
use std::collections::HashSet;

/// Resolve license, dependencies and top-level status for every package.
///
/// Packages sharing a lower-cased name collapse to the last one, with a
/// warning per dropped record. The result is sorted by name.
pub fn normalize_packages(
    packages: &[PackageMetadata],
    top_level: &HashSet<String>,
    licenses: &LicenseResolver,
    notifier: &mut dyn Notifier,
) -> Vec<NormalizedPackageRecord> {
    let index = MetadataIndex::build(packages);

    for duplicate in index.duplicates() {
        notifier.warning(&format!(
            "Duplicate package `{}` replaced by later `{}`",
            duplicate.replaced, duplicate.kept
        ));
    }

    let mut survivors: Vec<&PackageMetadata> = index.packages().collect();
    survivors.sort_by(|a, b| a.name.cmp(&b.name));

    survivors
        .into_iter()
        .map(|package| {
            let resolved_license =
                licenses.resolve(package.license.as_deref(), &package.name, notifier);
            let resolved_deps = link_for(&package.name, package.deps.as_deref(), &index);
            let is_top_level = top_level.contains(&package.name);

            tracing::debug!(
                package = package.name.as_str(),
                deps = resolved_deps.len(),
                top_level = is_top_level,
                "normalized package"
            );

            NormalizedPackageRecord {
                metadata: package.clone(),
                resolved_license,
                resolved_deps,
                is_top_level,
            }
        })
        .collect()
}

//! Linking declared dependency names to packages in the resolved set.

use crate::model::MetadataIndex;
use std::collections::BTreeSet;

/// Resolve declared dependency names against the index.
///
/// Names without a match are dropped: the resolver may have pruned optional
/// or platform-specific dependencies, so they are not an error. Survivors are
/// replaced by the indexed display name, which deduplicates spellings that
/// differ only in case.
pub fn link(raw_deps: Option<&[String]>, index: &MetadataIndex<'_>) -> BTreeSet<String> {
    let Some(raw_deps) = raw_deps else {
        return BTreeSet::new();
    };

    raw_deps
        .iter()
        .filter_map(|dep| {
            let canonical = index.canonical_name(dep);
            if canonical.is_none() {
                tracing::trace!(dependency = dep.as_str(), "dependency outside resolved set");
            }
            canonical
        })
        .map(str::to_string)
        .collect()
}

/// Like [`link`], but without a reference from `package_name` to itself.
///
/// A self-reference would make the derivation's `propagatedBuildInputs`
/// depend on its own fixpoint value, which Nix cannot evaluate.
pub fn link_for(
    package_name: &str,
    raw_deps: Option<&[String]>,
    index: &MetadataIndex<'_>,
) -> BTreeSet<String> {
    let mut deps = link(raw_deps, index);
    let own_key = package_name.to_lowercase();
    deps.retain(|dep| {
        let is_self = dep.to_lowercase() == own_key;
        if is_self {
            tracing::debug!(package = package_name, "dropping self-reference");
        }
        !is_self
    });
    deps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PackageMetadata;

    fn pkg(name: &str) -> PackageMetadata {
        PackageMetadata::new(name, "1.0", "http://x", "sha256", "0")
    }

    fn deps(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_missing_dependency_dropped() {
        let packages = vec![pkg("Foo")];
        let index = MetadataIndex::build(&packages);

        let raw = deps(&["Foo", "missing-pkg"]);
        let linked = link(Some(raw.as_slice()), &index);
        assert_eq!(linked.into_iter().collect::<Vec<_>>(), vec!["Foo"]);
    }

    #[test]
    fn test_empty_and_absent() {
        let packages = vec![pkg("Foo")];
        let index = MetadataIndex::build(&packages);

        let empty: Vec<String> = Vec::new();
        assert!(link(Some(empty.as_slice()), &index).is_empty());
        assert!(link(None, &index).is_empty());
    }

    #[test]
    fn test_canonical_case_sorted_and_deduplicated() {
        let packages = vec![pkg("zope.interface"), pkg("Django"), pkg("Babel")];
        let index = MetadataIndex::build(&packages);

        let raw = deps(&["zope.interface", "django", "DJANGO", "babel", "Django"]);
        let linked: Vec<String> = link(Some(raw.as_slice()), &index).into_iter().collect();
        assert_eq!(linked, vec!["Babel", "Django", "zope.interface"]);
    }

    #[test]
    fn test_sort_is_by_canonical_name_bytes() {
        let packages = vec![pkg("b"), pkg("A"), pkg("C")];
        let index = MetadataIndex::build(&packages);

        let raw = deps(&["c", "b", "a"]);
        let linked: Vec<String> = link(Some(raw.as_slice()), &index).into_iter().collect();
        assert_eq!(linked, vec!["A", "C", "b"]);
    }

    #[test]
    fn test_link_for_drops_self_reference() {
        let packages = vec![pkg("Foo"), pkg("Bar")];
        let index = MetadataIndex::build(&packages);

        let raw = deps(&["foo", "bar"]);
        let linked: Vec<String> = link_for("Foo", Some(raw.as_slice()), &index)
            .into_iter()
            .collect();
        assert_eq!(linked, vec!["Bar"]);

        // plain link keeps it
        assert!(link(Some(raw.as_slice()), &index).contains("Foo"));
    }
}

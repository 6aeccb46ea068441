//! Property-based tests for resolution and rendering.
//!
//! Ensures metadata of any shape is handled without panicking, and that the
//! generated documents depend only on the package set, not its order.

use proptest::prelude::*;
use pypi2nix::model::{MetadataIndex, RunParameters};
use pypi2nix::notify::RecordingNotifier;
use pypi2nix::pipeline::normalize_packages;
use pypi2nix::render::escape::escape_nix_string;
use pypi2nix::render::render_generated;
use pypi2nix::resolve::link_for;
use pypi2nix::{LicenseResolver, PackageMetadata, ResolvedLicense};
use std::collections::HashSet;

/// Packages with unique names whose dependencies point at each other
/// (in arbitrary case) or at nothing.
fn package_set() -> impl Strategy<Value = Vec<PackageMetadata>> {
    prop::collection::btree_set("[a-z][a-z0-9]{0,6}", 1..12).prop_flat_map(|names| {
        let names: Vec<String> = names.into_iter().collect();
        let count = names.len();
        prop::collection::vec(prop::collection::vec(0..count + 1, 0..4), count).prop_map(
            move |dep_indices| {
                names
                    .iter()
                    .zip(dep_indices)
                    .map(|(name, deps)| {
                        let deps = deps.into_iter().map(|i| {
                            names
                                .get(i)
                                .map_or_else(|| "not-resolved".to_string(), |n| n.to_uppercase())
                        });
                        PackageMetadata::new(
                            name.as_str(),
                            "1.0",
                            format!("http://x/{name}.tgz"),
                            "sha256",
                            "00",
                        )
                        .with_deps(deps)
                    })
                    .collect::<Vec<_>>()
            },
        )
    })
}

fn render(packages: &[PackageMetadata]) -> String {
    let params = RunParameters::new("requirements", "python27");
    let records = normalize_packages(
        packages,
        &HashSet::new(),
        &LicenseResolver::new(),
        &mut RecordingNotifier::new(),
    );
    render_generated(&records, &params).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn escaped_text_stays_inside_one_literal(s in "\\PC{0,200}") {
        let escaped = escape_nix_string(&s);
        prop_assert!(!escaped.contains('\n'));
        prop_assert!(!escaped.contains('\r'));

        let bytes = escaped.as_bytes();
        for (i, window) in bytes.windows(2).enumerate() {
            if window == b"${" {
                prop_assert!(i > 0 && bytes[i - 1] == b'\\', "unescaped antiquotation in {:?}", escaped);
            }
        }
    }

    #[test]
    fn license_resolution_warns_at_most_once(raw in proptest::option::of("\\PC{0,60}")) {
        let mut notifier = RecordingNotifier::new();
        let resolved = LicenseResolver::new().resolve(raw.as_deref(), "pkg", &mut notifier);

        match resolved {
            ResolvedLicense::Undeclared => {
                prop_assert!(raw.is_none());
                prop_assert!(notifier.warnings.is_empty());
            }
            ResolvedLicense::Known(_) => prop_assert!(notifier.warnings.is_empty()),
            ResolvedLicense::Literal(text) => {
                prop_assert_eq!(Some(text), raw);
                prop_assert_eq!(notifier.warnings.len(), 1);
            }
        }
    }

    #[test]
    fn rendering_ignores_input_order(
        (packages, shuffled) in package_set()
            .prop_flat_map(|p| (Just(p.clone()), Just(p).prop_shuffle()))
    ) {
        prop_assert_eq!(render(&packages), render(&shuffled));
    }

    #[test]
    fn linked_dependencies_are_known_siblings(packages in package_set()) {
        let index = MetadataIndex::build(&packages);
        for package in &packages {
            let linked = link_for(&package.name, package.deps.as_deref(), &index);
            prop_assert!(!linked.contains(&package.name));
            for dep in &linked {
                prop_assert!(packages.iter().any(|p| &p.name == dep));
            }
        }
    }

    #[test]
    fn metadata_loader_never_panics(s in "\\PC{0,300}") {
        let _ = pypi2nix::load_metadata_str(&s);
    }
}

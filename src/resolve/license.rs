//! Mapping of upstream license strings onto the Nix license vocabulary.

use crate::model::{NixLicense, ResolvedLicense};
use crate::notify::Notifier;
use indexmap::IndexMap;

/// Upstream spellings recognized verbatim (case-sensitive).
const KNOWN_LICENSES: &[(&str, NixLicense)] = &[
    ("ZPL 2.1", NixLicense::Zpt21),
    ("MIT", NixLicense::Mit),
    ("MIT License", NixLicense::Mit),
    ("BSD", NixLicense::BsdOriginal),
    ("BSD License", NixLicense::BsdOriginal),
    ("BSD-like", NixLicense::BsdOriginal),
    ("BSD or Apache License, Version 2.0", NixLicense::BsdOriginal),
    ("Apache 2.0", NixLicense::Asl20),
    ("Apache License 2.0", NixLicense::Asl20),
    (
        "GNU Lesser General Public License (LGPL), Version 3",
        NixLicense::Lgpl3,
    ),
    ("Python Software Foundation License", NixLicense::Psfl),
];

/// Prefixes whose every continuation maps to one identifier.
const KNOWN_LICENSE_PREFIXES: &[(&str, NixLicense)] = &[("BSD -", NixLicense::BsdOriginal)];

/// Look a license string up in the built-in table.
#[must_use]
pub fn lookup_known_license(raw: &str) -> Option<NixLicense> {
    KNOWN_LICENSES
        .iter()
        .find(|(spelling, _)| *spelling == raw)
        .or_else(|| {
            KNOWN_LICENSE_PREFIXES
                .iter()
                .find(|(prefix, _)| raw.starts_with(prefix))
        })
        .map(|(_, license)| *license)
}

/// Resolves free-text license declarations.
///
/// The built-in table is consulted first, then user-supplied aliases. Anything
/// left over is passed through as a literal and reported as a warning.
#[derive(Debug, Clone, Default)]
pub struct LicenseResolver {
    aliases: IndexMap<String, NixLicense>,
}

impl LicenseResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add exact-match aliases on top of the built-in table.
    #[must_use]
    pub fn with_aliases(mut self, aliases: IndexMap<String, NixLicense>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Resolve the license declared by `package_name`.
    pub fn resolve(
        &self,
        raw: Option<&str>,
        package_name: &str,
        notifier: &mut dyn Notifier,
    ) -> ResolvedLicense {
        let Some(raw) = raw else {
            return ResolvedLicense::Undeclared;
        };

        if let Some(license) = lookup_known_license(raw).or_else(|| self.aliases.get(raw).copied())
        {
            tracing::trace!(package = package_name, license = %license, "license recognized");
            return ResolvedLicense::Known(license);
        }

        notifier.warning(&format!(
            "Couldn't recognize license `{raw}` for `{package_name}`"
        ));
        ResolvedLicense::Literal(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;

    fn resolve(raw: Option<&str>) -> (ResolvedLicense, RecordingNotifier) {
        let mut notifier = RecordingNotifier::new();
        let resolved = LicenseResolver::new().resolve(raw, "pkg", &mut notifier);
        (resolved, notifier)
    }

    #[test]
    fn test_every_table_entry_resolves_silently() {
        for (spelling, expected) in KNOWN_LICENSES {
            let (resolved, notifier) = resolve(Some(*spelling));
            assert_eq!(resolved, ResolvedLicense::Known(*expected), "{spelling}");
            assert!(notifier.warnings.is_empty(), "{spelling}");
        }
    }

    #[test]
    fn test_bsd_prefix_family() {
        for spelling in ["BSD - 3 clause", "BSD -", "BSD - see LICENSE"] {
            let (resolved, notifier) = resolve(Some(spelling));
            assert_eq!(resolved, ResolvedLicense::Known(NixLicense::BsdOriginal));
            assert!(notifier.warnings.is_empty());
        }
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let (resolved, notifier) = resolve(Some("mit"));
        assert_eq!(resolved, ResolvedLicense::Literal("mit".to_string()));
        assert_eq!(notifier.warnings.len(), 1);
    }

    #[test]
    fn test_unrecognized_license_warns_once() {
        let mut notifier = RecordingNotifier::new();
        let resolved = LicenseResolver::new().resolve(Some("Custom-1.0"), "foo", &mut notifier);

        assert_eq!(resolved, ResolvedLicense::Literal("Custom-1.0".to_string()));
        assert_eq!(
            notifier.warnings,
            vec!["Couldn't recognize license `Custom-1.0` for `foo`".to_string()]
        );
    }

    #[test]
    fn test_empty_string_is_unrecognized() {
        let (resolved, notifier) = resolve(Some(""));
        assert_eq!(resolved, ResolvedLicense::Literal(String::new()));
        assert_eq!(notifier.warnings.len(), 1);
    }

    #[test]
    fn test_absent_license_is_undeclared() {
        let (resolved, notifier) = resolve(None);
        assert_eq!(resolved, ResolvedLicense::Undeclared);
        assert!(notifier.warnings.is_empty());
    }

    #[test]
    fn test_aliases_extend_table() {
        let mut aliases = IndexMap::new();
        aliases.insert("MIT/X11".to_string(), NixLicense::Mit);
        let resolver = LicenseResolver::new().with_aliases(aliases);

        let mut notifier = RecordingNotifier::new();
        assert_eq!(
            resolver.resolve(Some("MIT/X11"), "x", &mut notifier),
            ResolvedLicense::Known(NixLicense::Mit)
        );
        assert!(notifier.warnings.is_empty());
    }

    #[test]
    fn test_builtin_table_wins_over_alias() {
        let mut aliases = IndexMap::new();
        aliases.insert("MIT".to_string(), NixLicense::Psfl);
        let resolver = LicenseResolver::new().with_aliases(aliases);

        let mut notifier = RecordingNotifier::new();
        assert_eq!(
            resolver.resolve(Some("MIT"), "x", &mut notifier),
            ResolvedLicense::Known(NixLicense::Mit)
        );
    }
}

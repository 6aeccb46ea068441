//! Pipeline and CLI integration tests.
//!
//! These tests run the full metadata → records → documents → files path
//! against temporary project directories.

use pypi2nix::cli::{GenerateConfig, GeneratePaths, run_generate_with};
use pypi2nix::pipeline::{GenerateRequest, run};
use pypi2nix::{Pypi2NixError, RecordingNotifier, load_metadata_file};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn request(dir: &Path) -> GenerateRequest {
    GenerateRequest {
        packages_metadata: load_metadata_file(&fixture_path("metadata.json")).unwrap(),
        requirements_name: "requirements".to_string(),
        requirements_files: vec![dir.join("requirements.txt")],
        python_version: "python27".to_string(),
        top_level: ["Foo".to_string()].into(),
        tool_version: "1.0.0".to_string(),
        command_arguments: "-r requirements.txt".to_string(),
        ..GenerateRequest::default()
    }
}

fn read(path: PathBuf) -> String {
    std::fs::read_to_string(path).unwrap()
}

// ============================================================================
// End-to-end Scenario
// ============================================================================

mod end_to_end {
    use super::*;

    #[test]
    fn foo_bar_scenario() {
        let tmp = TempDir::new().unwrap();
        let mut notifier = RecordingNotifier::new();
        let summary = run(&request(tmp.path()), &mut notifier).unwrap();

        assert_eq!(summary.package_count, 2);
        assert_eq!(summary.warning_count, 1);

        let generated = read(tmp.path().join("requirements_generated.nix"));
        let bar = generated.find("  \"Bar\" = python.mkDerivation {").unwrap();
        let foo = generated.find("  \"Foo\" = python.mkDerivation {").unwrap();
        assert!(bar < foo, "entries must be sorted by name");

        let foo_entry = &generated[foo..];
        assert!(foo_entry.contains("      self.\"Bar\"\n"));
        assert!(foo_entry.contains("      license = licenses.mit;\n"));
        assert!(foo_entry.contains("    passthru.top_level = true;\n"));
        assert!(!foo_entry.contains("missing-pkg"));

        let bar_entry = &generated[bar..foo];
        assert!(bar_entry.contains("    propagatedBuildInputs = [ ];\n"));
        assert!(bar_entry.contains("      license = \"Custom-1.0\";\n"));
        assert!(bar_entry.contains("    passthru.top_level = false;\n"));
    }

    #[test]
    fn notices_in_write_order() {
        let tmp = TempDir::new().unwrap();
        let mut notifier = RecordingNotifier::new();
        run(&request(tmp.path()), &mut notifier).unwrap();

        let expected: Vec<String> = [
            "requirements_generated.nix",
            "requirements_override.nix",
            "requirements.nix",
        ]
        .iter()
        .map(|name| format!("|-> writing {}", tmp.path().join(name).display()))
        .collect();
        assert_eq!(notifier.progress_lines(), expected);
        assert_eq!(
            notifier.warning_lines(),
            vec!["WARNING: Couldn't recognize license `Custom-1.0` for `Bar`".to_string()]
        );
    }

    #[test]
    fn entry_point_references_sibling_files() {
        let tmp = TempDir::new().unwrap();
        run(&request(tmp.path()), &mut RecordingNotifier::new()).unwrap();

        let entry = read(tmp.path().join("requirements.nix"));
        assert!(entry.contains("import ./requirements_generated.nix"));
        assert!(entry.contains("import ./requirements_override.nix"));
        assert!(entry.ends_with("in python\n"));
    }
}

// ============================================================================
// Rerun Behavior
// ============================================================================

mod rerun {
    use super::*;

    #[test]
    fn second_run_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let req = request(tmp.path());

        run(&req, &mut RecordingNotifier::new()).unwrap();
        let first: Vec<String> = ["requirements.nix", "requirements_generated.nix", "requirements_override.nix"]
            .iter()
            .map(|name| read(tmp.path().join(name)))
            .collect();

        run(&req, &mut RecordingNotifier::new()).unwrap();
        let second: Vec<String> = ["requirements.nix", "requirements_generated.nix", "requirements_override.nix"]
            .iter()
            .map(|name| read(tmp.path().join(name)))
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn hand_edited_override_survives() {
        let tmp = TempDir::new().unwrap();
        let override_path = tmp.path().join("requirements_override.nix");
        let edited = "{ pkgs, python }:\n\nself: super: {\n  \"Foo\" = super.\"Foo\";\n}\n";
        std::fs::write(&override_path, edited).unwrap();

        let mut notifier = RecordingNotifier::new();
        let summary = run(&request(tmp.path()), &mut notifier).unwrap();

        assert!(!summary.overrides_created);
        assert_eq!(read(override_path), edited);
        assert_eq!(notifier.progress.len(), 2);
        assert!(
            notifier
                .progress
                .iter()
                .all(|line| !line.contains("requirements_override.nix"))
        );
    }

    #[test]
    fn override_created_only_once() {
        let tmp = TempDir::new().unwrap();
        let req = request(tmp.path());

        let first = run(&req, &mut RecordingNotifier::new()).unwrap();
        let second = run(&req, &mut RecordingNotifier::new()).unwrap();

        assert!(first.overrides_created);
        assert!(!second.overrides_created);
    }
}

// ============================================================================
// Determinism
// ============================================================================

mod determinism {
    use super::*;

    #[test]
    fn input_order_does_not_matter() {
        let forward = TempDir::new().unwrap();
        let reversed = TempDir::new().unwrap();

        run(&request(forward.path()), &mut RecordingNotifier::new()).unwrap();

        let mut req = request(reversed.path());
        req.packages_metadata.reverse();
        for package in &mut req.packages_metadata {
            if let Some(deps) = package.deps.as_mut() {
                deps.reverse();
            }
        }
        run(&req, &mut RecordingNotifier::new()).unwrap();

        assert_eq!(
            read(forward.path().join("requirements_generated.nix")),
            read(reversed.path().join("requirements_generated.nix"))
        );
    }
}

// ============================================================================
// Error Handling
// ============================================================================

mod errors {
    use super::*;

    #[test]
    fn missing_output_directory_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let mut req = request(tmp.path());
        req.requirements_files = vec![tmp.path().join("absent").join("requirements.txt")];

        let err = run(&req, &mut RecordingNotifier::new()).unwrap_err();
        match err {
            Pypi2NixError::Io { path: Some(path), .. } => {
                assert_eq!(path, tmp.path().join("absent").join("requirements_generated.nix"));
            }
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn empty_requirements_list_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut req = request(tmp.path());
        req.requirements_files.clear();

        let err = run(&req, &mut RecordingNotifier::new()).unwrap_err();
        assert!(matches!(err, Pypi2NixError::Validation(_)));
    }

    #[test]
    fn invalid_hash_type_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut req = request(tmp.path());
        req.packages_metadata[0].hash_type = "sha 256".to_string();

        let err = run(&req, &mut RecordingNotifier::new()).unwrap_err();
        assert!(matches!(err, Pypi2NixError::Render { .. }));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn keyword_hash_type_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut req = request(tmp.path());
        req.packages_metadata[1].hash_type = "in".to_string();

        assert!(run(&req, &mut RecordingNotifier::new()).is_err());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }
}

// ============================================================================
// CLI Handler
// ============================================================================

mod cli_handler {
    use super::*;

    #[test]
    fn generate_from_metadata_file() {
        let tmp = TempDir::new().unwrap();
        let config = GenerateConfig {
            paths: GeneratePaths {
                metadata: fixture_path("metadata.json"),
                requirements_files: vec![tmp.path().join("requirements.txt")],
            },
            top_level: vec!["Foo".to_string()],
            ..GenerateConfig::default()
        };

        let mut notifier = RecordingNotifier::new();
        let summary = run_generate_with(config, &mut notifier).unwrap();

        assert_eq!(summary.written.len(), 3);
        assert!(tmp.path().join("requirements.nix").exists());
    }

    #[test]
    fn malformed_metadata_is_reported() {
        let tmp = TempDir::new().unwrap();
        let metadata = tmp.path().join("metadata.json");
        std::fs::write(&metadata, r#"[{"name": "Foo", "version": "1.0"}]"#).unwrap();

        let config = GenerateConfig {
            paths: GeneratePaths {
                metadata,
                requirements_files: vec![tmp.path().join("requirements.txt")],
            },
            ..GenerateConfig::default()
        };

        let err = run_generate_with(config, &mut RecordingNotifier::new()).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("url"), "unexpected error: {chain}");
    }

    #[test]
    fn requirements_name_must_be_importable() {
        let tmp = TempDir::new().unwrap();
        let config = GenerateConfig {
            paths: GeneratePaths {
                metadata: fixture_path("metadata.json"),
                requirements_files: vec![tmp.path().join("my reqs.txt")],
            },
            ..GenerateConfig::default()
        };

        let err = run_generate_with(config, &mut RecordingNotifier::new()).unwrap_err();
        assert!(format!("{err:#}").contains("requirements_name"));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }
}

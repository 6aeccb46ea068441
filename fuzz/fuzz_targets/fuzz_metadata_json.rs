#![no_main]
use libfuzzer_sys::fuzz_target;
use pypi2nix::model::RunParameters;
use pypi2nix::notify::RecordingNotifier;
use pypi2nix::pipeline::normalize_packages;
use pypi2nix::render::render_generated;
use pypi2nix::LicenseResolver;
use std::collections::HashSet;

/// Fuzz metadata loading and everything downstream of it.
///
/// Any document the loader accepts must normalize and render without
/// panicking; rendering may still reject it (e.g. an odd hash type).
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(packages) = pypi2nix::load_metadata_str(s) else {
        return;
    };
    let records = normalize_packages(
        &packages,
        &HashSet::new(),
        &LicenseResolver::new(),
        &mut RecordingNotifier::new(),
    );
    let _ = render_generated(&records, &RunParameters::new("requirements", "python27"));
});

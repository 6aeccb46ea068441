#![no_main]
use libfuzzer_sys::fuzz_target;
use pypi2nix::notify::RecordingNotifier;
use pypi2nix::render::license_expression;
use pypi2nix::LicenseResolver;

/// Fuzz license resolution and the expression it renders to.
fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let mut notifier = RecordingNotifier::new();
    let resolved = LicenseResolver::new().resolve(Some(raw.as_ref()), "fuzz", &mut notifier);
    let expression = license_expression(&resolved);
    assert!(!expression.contains('\n'));
    assert!(notifier.warnings.len() <= 1);
});

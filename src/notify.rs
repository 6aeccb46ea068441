//! User-facing notices emitted while generating.
//!
//! Warnings and progress lines share stdout but carry distinct markers, so a
//! reader (or a script) can tell them apart. Structured logs go through
//! `tracing` separately and land on stderr.

/// Marker prefixed to warning notices.
pub const WARNING_MARKER: &str = "WARNING: ";

/// Marker prefixed to progress notices.
pub const PROGRESS_MARKER: &str = "|-> ";

/// Sink for warnings and progress notices.
pub trait Notifier {
    /// Report a recoverable problem. Never aborts the run.
    fn warning(&mut self, message: &str);

    /// Report progress, e.g. a file that was written.
    fn progress(&mut self, message: &str);
}

/// Prints notices to stdout, one line each.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress progress notices. Warnings are still printed.
    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl Notifier for ConsoleNotifier {
    fn warning(&mut self, message: &str) {
        tracing::debug!(message, "warning notice");
        println!("{WARNING_MARKER}{message}");
    }

    fn progress(&mut self, message: &str) {
        tracing::debug!(message, "progress notice");
        if !self.quiet {
            println!("{PROGRESS_MARKER}{message}");
        }
    }
}

/// Keeps notices in memory instead of printing them.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub warnings: Vec<String>,
    pub progress: Vec<String>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Warnings rendered the way the console would print them.
    pub fn warning_lines(&self) -> Vec<String> {
        self.warnings
            .iter()
            .map(|w| format!("{WARNING_MARKER}{w}"))
            .collect()
    }

    /// Progress notices rendered the way the console would print them.
    pub fn progress_lines(&self) -> Vec<String> {
        self.progress
            .iter()
            .map(|p| format!("{PROGRESS_MARKER}{p}"))
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn progress(&mut self, message: &str) {
        self.progress.push(message.to_string());
    }
}

/// Counts warnings passing through to another notifier.
pub(crate) struct CountingNotifier<'a> {
    inner: &'a mut dyn Notifier,
    pub(crate) warnings: usize,
}

impl<'a> CountingNotifier<'a> {
    pub(crate) fn new(inner: &'a mut dyn Notifier) -> Self {
        Self { inner, warnings: 0 }
    }
}

impl Notifier for CountingNotifier<'_> {
    fn warning(&mut self, message: &str) {
        self.warnings += 1;
        self.inner.warning(message);
    }

    fn progress(&mut self, message: &str) {
        self.inner.progress(message);
    }
}

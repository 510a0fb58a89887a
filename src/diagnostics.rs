//! Warning aggregation for a command run.

/// Collects warnings emitted while rendering workflow sources.
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// Collected warning messages.
    warnings: Vec<String>,
}

impl Diagnostics {
    /// Create a new diagnostics collector.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a warning and print it immediately.
    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        eprintln!("Warning: {message}");
        self.warnings.push(message);
    }

    /// Warnings recorded so far.
    pub(crate) fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Print a warning summary when warnings were emitted.
    pub(crate) fn print_warning_summary(&self) {
        let warnings = self.warnings();
        if warnings.is_empty() {
            return;
        }

        eprintln!("Completed with {} warning(s).", warnings.len());
    }
}

//! Diagnostic sink port (interface).

use std::sync::Arc;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    Debug,
    Info,
    Warn,
}

/// Port for diagnostic output.
///
/// Discovery and termination report what they did through this trait
/// instead of a process-wide logger, so callers decide where messages go.
pub trait DiagnosticSink: Send + Sync {
    /// Record one message.
    fn log(&self, level: DiagnosticLevel, message: &str);

    fn debug(&self, message: &str) {
        self.log(DiagnosticLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(DiagnosticLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(DiagnosticLevel::Warn, message);
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for Arc<T> {
    fn log(&self, level: DiagnosticLevel, message: &str) {
        (**self).log(level, message);
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    fn log(&self, level: DiagnosticLevel, message: &str) {
        (**self).log(level, message);
    }
}

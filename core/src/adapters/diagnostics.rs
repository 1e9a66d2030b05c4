//! Diagnostic sink adapters.

use parking_lot::Mutex;

use crate::ports::{DiagnosticLevel, DiagnosticSink};

/// Forwards diagnostics to `tracing`. The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn log(&self, level: DiagnosticLevel, message: &str) {
        match level {
            DiagnosticLevel::Debug => tracing::debug!(target: "portscout", "{}", message),
            DiagnosticLevel::Info => tracing::info!(target: "portscout", "{}", message),
            DiagnosticLevel::Warn => tracing::warn!(target: "portscout", "{}", message),
        }
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn log(&self, _level: DiagnosticLevel, _message: &str) {}
}

/// Keeps every message in memory, in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<(DiagnosticLevel, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded entries.
    pub fn entries(&self) -> Vec<(DiagnosticLevel, String)> {
        self.entries.lock().clone()
    }

    /// Messages recorded at exactly `level`.
    pub fn messages(&self, level: DiagnosticLevel) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl DiagnosticSink for MemorySink {
    fn log(&self, level: DiagnosticLevel, message: &str) {
        self.entries.lock().push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.info("scanning");
        sink.warn("no tool");
        sink.debug("details");

        assert_eq!(
            sink.entries(),
            vec![
                (DiagnosticLevel::Info, "scanning".to_string()),
                (DiagnosticLevel::Warn, "no tool".to_string()),
                (DiagnosticLevel::Debug, "details".to_string()),
            ]
        );
        assert_eq!(sink.messages(DiagnosticLevel::Warn), vec!["no tool".to_string()]);

        sink.clear();
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn test_noop_and_tracing_sinks_accept_messages() {
        NoopSink.warn("ignored");
        TracingSink.info("forwarded");
    }
}

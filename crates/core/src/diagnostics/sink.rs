//! Diagnostic sink trait and implementations.

use std::sync::{Arc, Mutex};

use super::Diagnostic;

/// Trait for receiving per-ticker diagnostics.
///
/// `emit()` is called from inside the calculation and must be fast and
/// non-blocking. Failure to record a diagnostic must not affect the
/// calculation.
pub trait DiagnosticSink: Send + Sync {
    /// Emit a single diagnostic.
    fn emit(&self, diagnostic: Diagnostic);

    /// Emit multiple diagnostics.
    ///
    /// Default implementation calls `emit()` for each diagnostic.
    fn emit_batch(&self, diagnostics: Vec<Diagnostic>) {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
        }
    }
}

/// No-op implementation for contexts that read diagnostics off the result.
#[derive(Clone, Default)]
pub struct NoOpDiagnosticSink;

impl DiagnosticSink for NoOpDiagnosticSink {
    fn emit(&self, _diagnostic: Diagnostic) {}
}

/// Collects emitted diagnostics in memory.
#[derive(Clone, Default)]
pub struct CollectingDiagnosticSink {
    diagnostics: Arc<Mutex<Vec<Diagnostic>>>,
}

impl CollectingDiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Returns the diagnostics recorded for one ticker.
    pub fn for_ticker(&self, ticker: &str) -> Vec<Diagnostic> {
        self.lock()
            .iter()
            .filter(|d| d.ticker == ticker)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        // A poisoned lock only means another emitter panicked; the vector is still usable.
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DiagnosticSink for CollectingDiagnosticSink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.lock().push(diagnostic);
    }
}

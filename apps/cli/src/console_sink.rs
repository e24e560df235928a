use fundnav_core::diagnostics::{Diagnostic, DiagnosticSink, Severity};

use crate::output::{print_error, print_warning};

/// Prints each diagnostic to stderr as it arrives.
#[derive(Clone, Copy, Default)]
pub struct ConsoleDiagnosticSink;

impl DiagnosticSink for ConsoleDiagnosticSink {
    fn emit(&self, diagnostic: Diagnostic) {
        let message = diagnostic.to_string();
        match diagnostic.severity() {
            Severity::Warning => print_warning(&message),
            Severity::Error => print_error(&message),
        }
    }
}

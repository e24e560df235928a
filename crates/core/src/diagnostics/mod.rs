//! Per-ticker diagnostics.
//!
//! The price resolver never fails a calculation because of one ticker.
//! Instead it reports what went wrong as a [`Diagnostic`] through a
//! [`DiagnosticSink`] supplied by the caller, and also hands the same
//! events back with the result. Presentation layers pick whichever suits
//! them.

mod diagnostic;
mod sink;

pub use diagnostic::*;
pub use sink::*;

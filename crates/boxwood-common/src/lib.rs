//! Common utilities for the boxwood layout engine.
//!
//! This crate provides shared infrastructure used by all layout components:
//! - **Diagnostics** - an injectable sink for warnings about unsupported
//!   input, with a deduplicating coloured terminal printer, a `log` bridge
//!   and a recording sink for tests

pub mod diagnostics;

pub use diagnostics::{
    Diagnostic, DiagnosticSink, LogSink, NullSink, RecordingSink, Severity, StderrSink,
};

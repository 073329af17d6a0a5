//! Layout diagnostics with pluggable output.
//!
//! Style errors and structural anomalies never abort a layout pass. They are
//! corrected in place and reported through a [`DiagnosticSink`] supplied by
//! the caller, so an embedding application decides whether they end up on a
//! terminal, in a log file, or in a test assertion.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Expected but noteworthy input, e.g. a unitless length.
    Info,
    /// Input that was ignored or replaced by a default.
    Warning,
}

/// A single report from a layout component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    /// How serious the report is.
    pub severity: Severity,
    /// Which component raised it ("style", "layout", "table", ...).
    pub component: &'static str,
    /// Human readable description.
    pub message: String,
}

impl Diagnostic {
    /// Create a warning.
    pub fn warning(component: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            component,
            message: message.into(),
        }
    }

    /// Create an informational note.
    pub fn info(component: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            component,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.component, self.message)
    }
}

/// Destination for layout diagnostics.
///
/// Layout is single threaded, so implementations are free to use interior
/// mutability without synchronisation.
pub trait DiagnosticSink {
    /// Record one diagnostic.
    fn report(&self, diagnostic: Diagnostic);

    /// Shorthand for reporting a [`Severity::Warning`].
    fn warn(&self, component: &'static str, message: &str) {
        self.report(Diagnostic::warning(component, message));
    }

    /// Shorthand for reporting a [`Severity::Info`].
    fn info(&self, component: &'static str, message: &str) {
        self.report(Diagnostic::info(component, message));
    }
}

/// Prints each unique warning once to stderr, coloured.
///
/// Informational diagnostics are suppressed unless `verbose` is set.
#[derive(Debug, Default)]
pub struct StderrSink {
    verbose: bool,
    seen: Mutex<HashSet<String>>,
}

impl StderrSink {
    /// A sink that only prints warnings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that also prints informational diagnostics.
    #[must_use]
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            seen: Mutex::new(HashSet::new()),
        }
    }

    /// Forget every printed message (call before laying out a new page).
    pub fn clear(&self) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl DiagnosticSink for StderrSink {
    fn report(&self, diagnostic: Diagnostic) {
        if diagnostic.severity == Severity::Info && !self.verbose {
            return;
        }
        let first_time = self
            .seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(diagnostic.to_string());
        if !first_time {
            return;
        }
        let line = format!("[boxwood {}] {}", diagnostic.component, diagnostic.message);
        match diagnostic.severity {
            Severity::Warning => eprintln!("{}", line.yellow()),
            Severity::Info => eprintln!("{}", line.dimmed()),
        }
    }
}

/// Forwards diagnostics to the [`log`] facade, one target per component.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: Diagnostic) {
        let target = format!("boxwood::{}", diagnostic.component);
        match diagnostic.severity {
            Severity::Warning => log::warn!(target: &target, "{}", diagnostic.message),
            Severity::Info => log::info!(target: &target, "{}", diagnostic.message),
        }
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _diagnostic: Diagnostic) {}
}

/// Keeps every diagnostic in order of arrival.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: RefCell<Vec<Diagnostic>>,
}

impl RecordingSink {
    /// An empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.records.borrow().clone()
    }

    /// Recorded warnings only.
    #[must_use]
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.records
            .borrow()
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .cloned()
            .collect()
    }

    /// True if any recorded message contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.records
            .borrow()
            .iter()
            .any(|d| d.message.contains(needle))
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.records.borrow_mut().push(diagnostic);
    }
}

//! Diagnostics routed through the [`Reporter`] sink.
//!
//! The pipeline never raises on bad user input. Every recoverable or fatal
//! finding becomes a [`Diagnostic`] and is handed to the reporter
//! synchronously; the stages decide locally whether to continue.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
            Severity::Note => f.write_str("note"),
        }
    }
}

/// The diagnostic taxonomy. Kinds marked fatal halt code generation for the
/// affected mapper; the rest are logged and processing continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// `#[mapper]` applied to something that is not a trait.
    ShapeError,
    /// A `#[map]` attribute that cannot be materialized.
    ParseError,
    /// A directive path that does not exist on its declared type.
    PathUnresolved,
    /// A constructor parameter with no incoming slot edge.
    SlotUncovered,
    /// A terminal edge across an unbridgeable type gap.
    TypeIncompatible,
    /// Mapper methods cyclically calling each other.
    CycleDetected,
    /// The source writer refused a generated file.
    WriterFailed,
}

impl DiagnosticKind {
    /// Fatal kinds abort code generation for the current mapper.
    pub fn is_fatal(self) -> bool {
        matches!(
            self,
            DiagnosticKind::SlotUncovered
                | DiagnosticKind::TypeIncompatible
                | DiagnosticKind::CycleDetected
                | DiagnosticKind::WriterFailed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::ShapeError => "shape-error",
            DiagnosticKind::ParseError => "parse-error",
            DiagnosticKind::PathUnresolved => "path-unresolved",
            DiagnosticKind::SlotUncovered => "slot-uncovered",
            DiagnosticKind::TypeIncompatible => "type-incompatible",
            DiagnosticKind::CycleDetected => "cycle-detected",
            DiagnosticKind::WriterFailed => "writer-failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,

    /// The source element the diagnostic points at, when one is known.
    /// Rendered as `mapper` or `mapper::method`.
    pub origin: Option<String>,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            message: message.into(),
            origin: None,
        }
    }

    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            message: message.into(),
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

// Single-line rendering; multi-line payloads (the rendered constructor
// tree) keep their own line breaks inside `message`.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.kind.as_str(), self.message)?;
        if let Some(origin) = &self.origin {
            write!(f, " (at {origin})")?;
        }
        Ok(())
    }
}

/// Synchronous, side-effect-only diagnostic sink.
pub trait Reporter {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// A reporter that buffers diagnostics in memory. The default choice for
/// tests and for callers that render diagnostics themselves after a run.
#[derive(Debug, Default)]
pub struct BufferReporter {
    diagnostics: Vec<Diagnostic>,
}

impl BufferReporter {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }
}

impl Reporter for BufferReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_origin() {
        let diag = Diagnostic::error(DiagnosticKind::SlotUncovered, "venue has no source mapping")
            .with_origin("demo::TicketMapper::map_person");
        assert_eq!(
            diag.to_string(),
            "error[slot-uncovered]: venue has no source mapping (at demo::TicketMapper::map_person)"
        );
    }

    #[test]
    fn fatal_partition() {
        assert!(DiagnosticKind::SlotUncovered.is_fatal());
        assert!(DiagnosticKind::TypeIncompatible.is_fatal());
        assert!(DiagnosticKind::CycleDetected.is_fatal());
        assert!(DiagnosticKind::WriterFailed.is_fatal());
        assert!(!DiagnosticKind::ShapeError.is_fatal());
        assert!(!DiagnosticKind::ParseError.is_fatal());
        assert!(!DiagnosticKind::PathUnresolved.is_fatal());
    }

    #[test]
    fn buffer_reporter_filters_by_kind() {
        let mut reporter = BufferReporter::default();
        reporter.report(Diagnostic::warning(
            DiagnosticKind::PathUnresolved,
            "no property `venue` on `Order`",
        ));
        reporter.report(Diagnostic::error(DiagnosticKind::SlotUncovered, "venue"));

        assert!(reporter.has_errors());
        assert_eq!(reporter.of_kind(DiagnosticKind::PathUnresolved).count(), 1);
        assert_eq!(reporter.of_kind(DiagnosticKind::CycleDetected).count(), 0);
    }
}

//! Non-fatal diagnostics accumulated during a normalization run.

use std::fmt;

use crate::base::SourceLocation;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "lowercase"))]
pub enum Severity {
    Warning,
    Error,
}

/// What went wrong, at the taxonomy level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "snake_case"))]
pub enum DiagnosticKind {
    /// A raw fact was rejected because a required field was missing.
    Validation,
    /// A cross-reference or ancestor could not be resolved; the
    /// referencing entity is kept with a dangling edge.
    ResolutionWarning,
    /// An inheritance or module dependency cycle was detected; the full
    /// cycle path is in the message and the affected entities are kept.
    StructuralCycle,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::Validation => "validation",
            DiagnosticKind::ResolutionWarning => "resolution_warning",
            DiagnosticKind::StructuralCycle => "structural_cycle",
        }
    }
}

/// One recorded problem. Runs always complete; diagnostics tell the
/// caller what the result is missing or approximating.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    pub location: Option<SourceLocation>,
}

impl Diagnostic {
    /// A rejected raw fact.
    pub fn validation(message: impl Into<String>, location: Option<SourceLocation>) -> Self {
        Self {
            severity: Severity::Error,
            kind: DiagnosticKind::Validation,
            message: message.into(),
            location,
        }
    }

    /// An unresolved reference or missing ancestor.
    pub fn resolution_warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind: DiagnosticKind::ResolutionWarning,
            message: message.into(),
            location: None,
        }
    }

    /// A detected cycle. `path` is the ordered cycle, first node repeated
    /// nowhere; the rendered message closes the loop for readability.
    pub fn structural_cycle(graph_name: &str, path: &[String]) -> Self {
        let mut rendered = path.join(" -> ");
        if let Some(first) = path.first() {
            rendered.push_str(" -> ");
            rendered.push_str(first);
        }
        Self {
            severity: Severity::Error,
            kind: DiagnosticKind::StructuralCycle,
            message: format!("{graph_name} cycle: {rendered}"),
            location: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)?;
        if let Some(location) = &self.location {
            write!(f, " ({location})")?;
        }
        Ok(())
    }
}

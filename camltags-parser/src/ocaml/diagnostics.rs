//! Diagnostics
//!
//! Extraction never fails, but some conditions degrade its output. Those are reported as
//! [`Diagnostic`] values next to the tags so callers can surface them. Today the only source
//! is the scope stack refusing pushes past its capacity: tags found while it is saturated may
//! carry a truncated scope.

use serde::Serialize;
use std::fmt;

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Information,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Information => write!(f, "info"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// 1-based line the condition was first seen on
    pub line: usize,
}

impl Diagnostic {
    pub fn new(severity: DiagnosticSeverity, message: impl Into<String>, line: usize) -> Self {
        Self {
            severity,
            message: message.into(),
            code: None,
            line,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Scope stack saturation summary for one run
    pub fn scope_overflow(capacity: usize, refused: usize, first_line: usize) -> Self {
        Diagnostic::new(
            DiagnosticSeverity::Warning,
            format!(
                "scope nesting exceeded {} levels; {} scope(s) were not tracked",
                capacity, refused
            ),
            first_line,
        )
        .with_code("scope-overflow")
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(
                f,
                "{} [{}]: {} at line {}",
                self.severity, code, self.message, self.line
            ),
            None => write!(f, "{}: {} at line {}", self.severity, self.message, self.line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_overflow_display() {
        let diagnostic = Diagnostic::scope_overflow(256, 3, 12);
        assert_eq!(diagnostic.severity, DiagnosticSeverity::Warning);
        assert_eq!(
            diagnostic.to_string(),
            "warning [scope-overflow]: scope nesting exceeded 256 levels; 3 scope(s) were not tracked at line 12"
        );
    }

    #[test]
    fn test_display_without_code() {
        let diagnostic = Diagnostic::new(DiagnosticSeverity::Information, "note", 1);
        assert_eq!(diagnostic.to_string(), "info: note at line 1");
    }
}

//! Error types and diagnostics
//!
//! This module provides error handling for structure extraction and
//! diffing, plus a small diagnostics collector used by batch runs that
//! record one failure per package version and keep going.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for dts-etch operations
pub type EtchResult<T> = Result<T, EtchError>;

/// Main error type for dts-etch
#[derive(Debug, Error)]
pub enum EtchError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source text the TypeScript grammar could not parse
    #[error("Syntax error: {message}")]
    Syntax { message: String },

    /// A declaration, member or type node with no mapping
    #[error("Unsupported {kind} at {line}:{col}")]
    Unsupported {
        kind: String,
        line: usize,
        col: usize,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid path
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(String),
}

impl EtchError {
    /// Create a syntax error
    pub fn syntax(message: impl Into<String>) -> Self {
        EtchError::Syntax {
            message: message.into(),
        }
    }

    /// Create an unsupported-syntax error at a location
    pub fn unsupported(kind: impl Into<String>, line: usize, col: usize) -> Self {
        EtchError::Unsupported {
            kind: kind.into(),
            line,
            col,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        EtchError::Config(message.into())
    }

    /// Whether this error came from the source text rather than the environment
    pub fn is_parse_error(&self) -> bool {
        matches!(self, EtchError::Syntax { .. } | EtchError::Unsupported { .. })
    }
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// Error - the item was skipped
    Error,
    /// Warning - processing continued
    Warning,
}

impl DiagnosticSeverity {
    /// Get display string
    pub fn display(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
        }
    }

    /// Get ANSI color code
    pub fn color(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "\x1b[31m",   // Red
            DiagnosticSeverity::Warning => "\x1b[33m", // Yellow
        }
    }
}

/// A diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub severity: DiagnosticSeverity,
    /// Message
    pub message: String,
    /// Source file
    pub file: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            file: None,
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Error, message)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Warning, message)
    }

    /// Set the source file
    pub fn in_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Format the diagnostic for display
    pub fn format(&self) -> String {
        let mut result = String::new();
        if let Some(ref file) = self.file {
            result.push_str(&file.display().to_string());
            result.push_str(": ");
        }
        result.push_str(self.severity.display());
        result.push_str(": ");
        result.push_str(&self.message);
        result
    }

    /// Format with ANSI colors
    pub fn format_colored(&self) -> String {
        let reset = "\x1b[0m";
        let mut result = String::new();
        if let Some(ref file) = self.file {
            result.push_str("\x1b[2m");
            result.push_str(&file.display().to_string());
            result.push_str(reset);
            result.push_str(": ");
        }
        result.push_str(self.severity.color());
        result.push_str(self.severity.display());
        result.push_str(reset);
        result.push_str(": ");
        result.push_str(&self.message);
        result
    }
}

/// Collector for diagnostics during a batch run
#[derive(Debug, Default)]
pub struct DiagnosticsCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticsCollector {
    /// Create a new collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Get all diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Error)
            .count()
    }

    /// Get warning count
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == DiagnosticSeverity::Warning)
            .count()
    }

    /// Print all diagnostics to stderr
    pub fn print(&self) {
        for diagnostic in &self.diagnostics {
            eprintln!("{}", diagnostic.format_colored());
        }
    }

    /// Print summary
    pub fn print_summary(&self) {
        let errors = self.error_count();
        let warnings = self.warning_count();

        if errors > 0 || warnings > 0 {
            eprintln!("\n{} error(s), {} warning(s)", errors, warnings);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_display() {
        let err = EtchError::unsupported("TsModuleDecl", 3, 4);
        assert_eq!(err.to_string(), "Unsupported TsModuleDecl at 3:4");
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_config_is_not_parse_error() {
        assert!(!EtchError::config("bad format").is_parse_error());
    }

    #[test]
    fn test_diagnostic_format() {
        let diag = Diagnostic::error("Unsupported TsModuleDecl at 3:4").in_file("1.2.0.json");
        assert_eq!(
            diag.format(),
            "1.2.0.json: error: Unsupported TsModuleDecl at 3:4"
        );
    }

    #[test]
    fn test_diagnostics_collector() {
        let mut collector = DiagnosticsCollector::new();
        collector.add(Diagnostic::error("error 1"));
        collector.add(Diagnostic::warning("warning 1"));

        assert!(collector.has_errors());
        assert_eq!(collector.error_count(), 1);
        assert_eq!(collector.warning_count(), 1);
        assert_eq!(collector.diagnostics().len(), 2);
    }
}

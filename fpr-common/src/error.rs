//! Error handling for the fixed-point rewriter
//!
//! `CompilerError` covers the frontend and I/O failures shared by every
//! crate. `Diagnostic` and `ErrorReporter` collect what a compilation run
//! reports back to the user.

use crate::source_loc::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while reading, lexing or parsing a source file
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Lexical error at {location}: {message}")]
    LexError {
        location: SourceLocation,
        message: String,
    },

    #[error("Parse error at {location}: {message}")]
    ParseError {
        location: SourceLocation,
        message: String,
    },

    #[error("IO error: {message}")]
    IoError { message: String },
}

impl CompilerError {
    pub fn lexer_error(message: String, location: SourceLocation) -> Self {
        CompilerError::LexError { location, message }
    }

    pub fn parse_error(message: String, location: SourceLocation) -> Self {
        CompilerError::ParseError { location, message }
    }

    /// Source location of the error, if it has one
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            CompilerError::LexError { location, .. } | CompilerError::ParseError { location, .. } => {
                Some(location)
            }
            CompilerError::IoError { .. } => None,
        }
    }

    /// The message without the location prefix
    pub fn message(&self) -> &str {
        match self {
            CompilerError::LexError { message, .. }
            | CompilerError::ParseError { message, .. }
            | CompilerError::IoError { message } => message,
        }
    }
}

impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A reported message, optionally attached to a file position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: Option<SourceLocation>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: String, location: Option<SourceLocation>) -> Self {
        Self {
            severity: Severity::Error,
            message,
            location,
            notes: Vec::new(),
        }
    }

    pub fn warning(message: String, location: Option<SourceLocation>) -> Self {
        Self {
            severity: Severity::Warning,
            message,
            location,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }

    /// Message followed by its notes, one per line
    pub fn flattened_message(&self) -> String {
        let mut text = self.message.clone();
        for note in &self.notes {
            text.push_str("\n  ");
            text.push_str(note);
        }
        text
    }
}

impl From<&CompilerError> for Diagnostic {
    fn from(err: &CompilerError) -> Self {
        Diagnostic::error(err.message().to_string(), err.location().cloned())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) if !loc.is_synthesized() => write!(
                f,
                "{} ({},{}): {}",
                loc.filename,
                loc.line,
                loc.column,
                self.flattened_message()
            ),
            _ => write!(f, "{}", self.flattened_message()),
        }
    }
}

/// Collects diagnostics across a compilation run
#[derive(Debug, Default)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic of any severity
    pub fn report(&mut self, diagnostic: Diagnostic) -> &mut Diagnostic {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Note => {}
        }
        let index = self.diagnostics.len();
        self.diagnostics.push(diagnostic);
        &mut self.diagnostics[index]
    }

    pub fn error(&mut self, message: String, location: Option<SourceLocation>) -> &mut Diagnostic {
        self.report(Diagnostic::error(message, location))
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn summary(&self) -> String {
        match (self.error_count, self.warning_count) {
            (0, 0) => "No errors or warnings".to_string(),
            (0, w) => format!("{} warning{}", w, if w == 1 { "" } else { "s" }),
            (e, 0) => format!("{} error{}", e, if e == 1 { "" } else { "s" }),
            (e, w) => format!(
                "{} error{} and {} warning{}",
                e,
                if e == 1 { "" } else { "s" },
                w,
                if w == 1 { "" } else { "s" }
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_with_position() {
        let diag = Diagnostic::error(
            "Unsupported node kind: Identifier".to_string(),
            Some(SourceLocation::new("price.ts", 3, 14)),
        );
        assert_eq!(diag.to_string(), "price.ts (3,14): Unsupported node kind: Identifier");
    }

    #[test]
    fn test_diagnostic_without_file() {
        let diag = Diagnostic::error("Cannot read file".to_string(), None)
            .with_note("No such file or directory".to_string());
        assert_eq!(diag.to_string(), "Cannot read file\n  No such file or directory");
    }

    #[test]
    fn test_synthesized_location_prints_bare_message() {
        let diag = Diagnostic::error("oops".to_string(), Some(SourceLocation::synthesized()));
        assert_eq!(diag.to_string(), "oops");
    }

    #[test]
    fn test_from_compiler_error() {
        let err = CompilerError::parse_error(
            "Expected ';'".to_string(),
            SourceLocation::new("a.ts", 2, 7),
        );
        let diag = Diagnostic::from(&err);
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.to_string(), "a.ts (2,7): Expected ';'");
    }

    #[test]
    fn test_error_reporter() {
        let mut reporter = ErrorReporter::new();
        assert!(!reporter.has_errors());

        reporter.error("first".to_string(), None);
        reporter
            .report(Diagnostic::warning("second".to_string(), None))
            .notes
            .push("detail".to_string());

        assert!(reporter.has_errors());
        assert_eq!(reporter.error_count(), 1);
        assert_eq!(reporter.warning_count(), 1);
        assert_eq!(reporter.diagnostics()[1].notes, vec!["detail".to_string()]);
    }

    #[test]
    fn test_summary() {
        let mut reporter = ErrorReporter::new();
        assert_eq!(reporter.summary(), "No errors or warnings");

        reporter.error("Error 1".to_string(), None);
        assert_eq!(reporter.summary(), "1 error");

        reporter.error("Error 2".to_string(), None);
        reporter.report(Diagnostic::warning("Warning 1".to_string(), None));
        assert_eq!(reporter.summary(), "2 errors and 1 warning");
    }
}

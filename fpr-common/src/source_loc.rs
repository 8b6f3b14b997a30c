//! Source location tracking for diagnostics
//!
//! Locations are carried on every token and syntax node so that transform
//! failures and compile diagnostics can point back into the original file.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in a source file (line and column are 1-based)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(filename: &str, line: u32, column: u32) -> Self {
        Self {
            filename: filename.to_string(),
            line,
            column,
        }
    }

    /// Location used for nodes synthesized by a rewrite
    pub fn synthesized() -> Self {
        Self::new("<synthesized>", 0, 0)
    }

    /// Whether this location points into a real file
    pub fn is_synthesized(&self) -> bool {
        self.line == 0
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// A span in a source file (from start to end location)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceSpan {
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// Create a span from a single location
    pub fn from_location(location: SourceLocation) -> Self {
        Self {
            end: location.clone(),
            start: location,
        }
    }

    pub fn synthesized() -> Self {
        Self::from_location(SourceLocation::synthesized())
    }

    /// Span covering both `self` and `other`
    pub fn to(&self, other: &SourceSpan) -> SourceSpan {
        SourceSpan::new(self.start.clone(), other.end.clone())
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            if self.start.column == self.end.column {
                write!(f, "{}", self.start)
            } else {
                write!(
                    f,
                    "{}:{}:{}-{}",
                    self.start.filename, self.start.line, self.start.column, self.end.column
                )
            }
        } else {
            write!(
                f,
                "{}:{}:{}-{}:{}",
                self.start.filename, self.start.line, self.start.column, self.end.line, self.end.column
            )
        }
    }
}

/// Line/column bookkeeping for the lexer
#[derive(Debug, Clone)]
pub struct SourceTracker {
    filename: String,
    line: u32,
    column: u32,
}

impl SourceTracker {
    pub fn new(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            line: 1,
            column: 1,
        }
    }

    /// Get current location
    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(&self.filename, self.line, self.column)
    }

    /// Advance by one character
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Create a span from a start location to current location
    pub fn span_from(&self, start: SourceLocation) -> SourceSpan {
        SourceSpan::new(start, self.location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location() {
        let loc = SourceLocation::new("price.ts", 42, 10);
        assert_eq!(loc.filename, "price.ts");
        assert_eq!(format!("{}", loc), "price.ts:42:10");
        assert!(!loc.is_synthesized());
        assert!(SourceLocation::synthesized().is_synthesized());
    }

    #[test]
    fn test_source_span_same_line() {
        let span = SourceSpan::new(
            SourceLocation::new("price.ts", 1, 5),
            SourceLocation::new("price.ts", 1, 10),
        );
        assert_eq!(format!("{}", span), "price.ts:1:5-10");
    }

    #[test]
    fn test_source_span_different_lines() {
        let span = SourceSpan::new(
            SourceLocation::new("price.ts", 1, 5),
            SourceLocation::new("price.ts", 3, 10),
        );
        assert_eq!(format!("{}", span), "price.ts:1:5-3:10");
    }

    #[test]
    fn test_span_to() {
        let left = SourceSpan::new(
            SourceLocation::new("a.ts", 1, 1),
            SourceLocation::new("a.ts", 1, 2),
        );
        let right = SourceSpan::new(
            SourceLocation::new("a.ts", 1, 5),
            SourceLocation::new("a.ts", 1, 6),
        );
        let joined = left.to(&right);
        assert_eq!(joined.start.column, 1);
        assert_eq!(joined.end.column, 6);
    }

    #[test]
    fn test_source_tracker() {
        let mut tracker = SourceTracker::new("a.ts");
        let start = tracker.location();
        for ch in "let\nx".chars() {
            tracker.advance(ch);
        }
        let span = tracker.span_from(start);
        assert_eq!(span.start.line, 1);
        assert_eq!(span.end.line, 2);
        assert_eq!(span.end.column, 2);
    }
}

//! Parse error types

use crate::lexer::Token;
use fpr_common::{CompilerError, SourceLocation};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("Expected {expected}, found '{}'", .found.token_type)]
    UnexpectedToken {
        expected: String,
        found: Token,
    },
    #[error("Unexpected end of file, expected {expected}")]
    UnexpectedEndOfFile {
        expected: String,
        location: SourceLocation,
    },
    #[error("{message}")]
    InvalidExpression {
        message: String,
        location: SourceLocation,
    },
    #[error("{message}")]
    InvalidType {
        message: String,
        location: SourceLocation,
    },
}

impl From<ParseError> for CompilerError {
    fn from(err: ParseError) -> Self {
        let message = err.to_string();
        let location = match err {
            ParseError::UnexpectedToken { found, .. } => found.span.start,
            ParseError::UnexpectedEndOfFile { location, .. }
            | ParseError::InvalidExpression { location, .. }
            | ParseError::InvalidType { location, .. } => location,
        };
        CompilerError::parse_error(message, location)
    }
}

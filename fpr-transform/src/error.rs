//! Transform error types

use fpr_common::{CompilerError, Diagnostic, SourceLocation};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum TransformError {
    /// An operand the fixed-point classifier has no rule for
    #[error("Unsupported node kind: {kind}")]
    UnsupportedNodeKind {
        kind: &'static str,
        location: SourceLocation,
    },

    #[error(transparent)]
    Frontend(#[from] CompilerError),

    #[error("Invalid rewrite configuration: {message}")]
    Config { message: String },
}

impl TransformError {
    pub fn config(message: impl Into<String>) -> Self {
        TransformError::Config {
            message: message.into(),
        }
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            TransformError::UnsupportedNodeKind { location, .. } => Some(location),
            TransformError::Frontend(err) => err.location(),
            TransformError::Config { .. } => None,
        }
    }

    pub fn is_unsupported_node(&self) -> bool {
        matches!(self, TransformError::UnsupportedNodeKind { .. })
    }
}

impl From<&TransformError> for Diagnostic {
    fn from(err: &TransformError) -> Self {
        match err {
            TransformError::Frontend(inner) => Diagnostic::from(inner),
            TransformError::UnsupportedNodeKind { .. } => {
                Diagnostic::error(err.to_string(), err.location().cloned())
                    .with_note("Only numeric literals, arithmetic and calls can be converted to fixed point".to_string())
            }
            TransformError::Config { .. } => Diagnostic::error(err.to_string(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_node_diagnostic() {
        let err = TransformError::UnsupportedNodeKind {
            kind: "Identifier",
            location: SourceLocation::new("cart.ts", 4, 17),
        };
        let diag = Diagnostic::from(&err);
        assert_eq!(
            diag.to_string(),
            "cart.ts (4,17): Unsupported node kind: Identifier\n  Only numeric literals, arithmetic and calls can be converted to fixed point"
        );
    }

    #[test]
    fn test_frontend_error_keeps_location() {
        let err: TransformError =
            CompilerError::parse_error("Expected expression".to_string(), SourceLocation::new("a.ts", 1, 9)).into();
        assert_eq!(err.to_string(), "Parse error at a.ts:1:9: Expected expression");
        assert_eq!(Diagnostic::from(&err).to_string(), "a.ts (1,9): Expected expression");
    }
}

//! Primary expression parsing

use crate::ast::*;
use crate::lexer::{Token, TokenType};
use crate::parser::errors::ParseError;
use crate::parser::Parser;
use fpr_common::CompilerError;

impl Parser {
    /// Parse primary expression
    pub fn parse_primary_expression(&mut self) -> Result<Expression, CompilerError> {
        let start = self.current_location();

        let token = match self.advance() {
            Some(token) => token,
            None => {
                return Err(ParseError::UnexpectedEndOfFile {
                    expected: "expression".to_string(),
                    location: start,
                }
                .into())
            }
        };

        let kind = match token.token_type {
            TokenType::NumberLiteral(raw) => ExpressionKind::NumericLiteral(raw),
            TokenType::StringLiteral { value, quote, raw } => ExpressionKind::StringLiteral {
                value,
                quote,
                raw: Some(raw),
            },
            TokenType::True => ExpressionKind::BooleanLiteral(true),
            TokenType::False => ExpressionKind::BooleanLiteral(false),
            TokenType::Null => ExpressionKind::NullLiteral,
            TokenType::Identifier(name) => ExpressionKind::Identifier(name),
            TokenType::LeftParen => {
                let inner = self.parse_expression()?;
                self.expect(TokenType::RightParen, "parenthesized expression")?;
                // Grouping is kept by tree shape only
                return Ok(inner);
            }
            TokenType::LeftBracket => {
                let elements = self.parse_argument_list(TokenType::RightBracket, "array literal")?;
                ExpressionKind::Array(elements)
            }
            TokenType::EndOfFile => {
                return Err(ParseError::UnexpectedEndOfFile {
                    expected: "expression".to_string(),
                    location: start,
                }
                .into())
            }
            token_type => {
                return Err(ParseError::UnexpectedToken {
                    expected: "expression".to_string(),
                    found: Token {
                        token_type,
                        span: token.span,
                        newline_before: token.newline_before,
                    },
                }
                .into())
            }
        };

        let span = self.span_from(start);
        Ok(self.make_expression(kind, span))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::parse_expr;
    use crate::ast::*;
    use crate::lexer::QuoteStyle;
    use fpr_common::CompilerError;

    #[test]
    fn test_literals() {
        assert_eq!(parse_expr("true").unwrap().kind, ExpressionKind::BooleanLiteral(true));
        assert_eq!(parse_expr("null").unwrap().kind, ExpressionKind::NullLiteral);
        assert_eq!(
            parse_expr("'usd'").unwrap().kind,
            ExpressionKind::StringLiteral {
                value: "usd".to_string(),
                quote: QuoteStyle::Single,
                raw: Some("usd".to_string()),
            }
        );
    }

    #[test]
    fn test_array_literal() {
        let expr = parse_expr("[0.1, 0.2, rate]").unwrap();
        match expr.kind {
            ExpressionKind::Array(elements) => {
                assert_eq!(elements.len(), 3);
                assert_eq!(elements[2].as_identifier(), Some("rate"));
            }
            other => panic!("Expected array literal, got {:?}", other),
        }
    }

    #[test]
    fn test_unexpected_token() {
        let err = parse_expr(")").unwrap_err();
        assert!(matches!(err, CompilerError::ParseError { .. }));
        assert!(err.message().contains("Expected expression"));
    }

    #[test]
    fn test_missing_close_paren() {
        let err = parse_expr("(1 + 2").unwrap_err();
        assert!(err.message().contains("end of file"));
    }
}

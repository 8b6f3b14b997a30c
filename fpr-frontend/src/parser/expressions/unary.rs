//! Prefix unary expression parsing

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::Parser;
use fpr_common::CompilerError;

impl Parser {
    pub fn parse_unary_expression(&mut self) -> Result<Expression, CompilerError> {
        let op = match self.peek_type() {
            Some(TokenType::Minus) => UnaryOp::Minus,
            Some(TokenType::Plus) => UnaryOp::Plus,
            Some(TokenType::Bang) => UnaryOp::LogicalNot,
            Some(TokenType::Tilde) => UnaryOp::BitNot,
            Some(TokenType::Typeof) => UnaryOp::Typeof,
            Some(TokenType::PlusPlus) => UnaryOp::PreIncrement,
            Some(TokenType::MinusMinus) => UnaryOp::PreDecrement,
            _ => return self.parse_postfix_expression(),
        };

        let start = self.current_location();
        self.advance();
        let operand = self.parse_unary_expression()?;
        let span = self.span_from(start);

        Ok(self.make_expression(
            ExpressionKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::parse_expr;
    use crate::ast::*;

    #[test]
    fn test_negative_literal_is_unary() {
        let expr = parse_expr("-0.5").unwrap();
        match expr.kind {
            ExpressionKind::Unary { op, operand } => {
                assert_eq!(op, UnaryOp::Minus);
                assert_eq!(operand.kind, ExpressionKind::NumericLiteral("0.5".to_string()));
            }
            other => panic!("Expected unary minus, got {:?}", other),
        }
    }

    #[test]
    fn test_nested_prefix_operators() {
        let expr = parse_expr("!typeof x").unwrap();
        match expr.kind {
            ExpressionKind::Unary { op: UnaryOp::LogicalNot, operand } => {
                assert!(matches!(operand.kind, ExpressionKind::Unary { op: UnaryOp::Typeof, .. }));
            }
            other => panic!("Expected logical not, got {:?}", other),
        }
    }

    #[test]
    fn test_prefix_increment() {
        let expr = parse_expr("++count").unwrap();
        assert!(matches!(expr.kind, ExpressionKind::Unary { op: UnaryOp::PreIncrement, .. }));
    }
}

//! Expression parsing
//!
//! Binary operators are parsed by precedence climbing over the levels in
//! `ast::precedence`; everything below that level is plain recursive descent.

mod binary;
mod postfix;
mod primary;
mod unary;

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::Parser;
use fpr_common::CompilerError;

impl Parser {
    /// Parse expression (top level)
    pub fn parse_expression(&mut self) -> Result<Expression, CompilerError> {
        self.parse_assignment_expression()
    }

    /// Parse a comma-separated list up to and including `close`
    pub(crate) fn parse_argument_list(
        &mut self,
        close: TokenType,
        context: &str,
    ) -> Result<Vec<Expression>, CompilerError> {
        let mut arguments = Vec::new();
        while !self.check(&close) {
            arguments.push(self.parse_assignment_expression()?);
            if !self.match_token(&TokenType::Comma) {
                break;
            }
        }
        self.expect(close, context)?;
        Ok(arguments)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parser::tests::parser_for;
    use fpr_common::CompilerError;

    pub(crate) fn parse_expr(input: &str) -> Result<Expression, CompilerError> {
        parser_for(input).parse_expression()
    }

    #[test]
    fn test_parse_numeric_literal_keeps_text() {
        let expr = parse_expr("0.10").unwrap();
        assert_eq!(expr.kind, ExpressionKind::NumericLiteral("0.10".to_string()));
    }

    #[test]
    fn test_parenthesized_grouping() {
        let expr = parse_expr("(1 + 2) * 3").unwrap();
        match expr.kind {
            ExpressionKind::Binary { op: BinaryOp::Mul, left, right } => {
                assert!(matches!(left.kind, ExpressionKind::Binary { op: BinaryOp::Add, .. }));
                assert_eq!(right.kind, ExpressionKind::NumericLiteral("3".to_string()));
            }
            other => panic!("Expected multiplication, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_comma_in_arguments() {
        let expr = parse_expr("f(1, 2,)").unwrap();
        match expr.kind {
            ExpressionKind::Call { arguments, .. } => assert_eq!(arguments.len(), 2),
            other => panic!("Expected call, got {:?}", other),
        }
    }
}

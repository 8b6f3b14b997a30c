//! Assignment, conditional and binary operator parsing

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::errors::ParseError;
use crate::parser::Parser;
use fpr_common::CompilerError;

/// Non-assignment binary operator a token stands for
fn binary_operator(token_type: &TokenType) -> Option<BinaryOp> {
    let op = match token_type {
        TokenType::Plus => BinaryOp::Add,
        TokenType::Minus => BinaryOp::Sub,
        TokenType::Star => BinaryOp::Mul,
        TokenType::Slash => BinaryOp::Div,
        TokenType::Percent => BinaryOp::Mod,
        TokenType::StarStar => BinaryOp::Exp,
        TokenType::Ampersand => BinaryOp::BitAnd,
        TokenType::Pipe => BinaryOp::BitOr,
        TokenType::Caret => BinaryOp::BitXor,
        TokenType::LeftShift => BinaryOp::LeftShift,
        TokenType::RightShift => BinaryOp::RightShift,
        TokenType::AmpersandAmpersand => BinaryOp::LogicalAnd,
        TokenType::PipePipe => BinaryOp::LogicalOr,
        TokenType::QuestionQuestion => BinaryOp::NullishCoalescing,
        TokenType::EqualEqual => BinaryOp::Equal,
        TokenType::BangEqual => BinaryOp::NotEqual,
        TokenType::EqualEqualEqual => BinaryOp::StrictEqual,
        TokenType::BangEqualEqual => BinaryOp::StrictNotEqual,
        TokenType::Less => BinaryOp::Less,
        TokenType::Greater => BinaryOp::Greater,
        TokenType::LessEqual => BinaryOp::LessEqual,
        TokenType::GreaterEqual => BinaryOp::GreaterEqual,
        _ => return None,
    };
    Some(op)
}

fn assignment_operator(token_type: &TokenType) -> Option<BinaryOp> {
    match token_type {
        TokenType::Equal => Some(BinaryOp::Assign),
        TokenType::PlusEqual => Some(BinaryOp::AddAssign),
        TokenType::MinusEqual => Some(BinaryOp::SubAssign),
        TokenType::StarEqual => Some(BinaryOp::MulAssign),
        TokenType::SlashEqual => Some(BinaryOp::DivAssign),
        TokenType::PercentEqual => Some(BinaryOp::ModAssign),
        _ => None,
    }
}

impl Parser {
    /// Parse assignment expression (right associative)
    pub fn parse_assignment_expression(&mut self) -> Result<Expression, CompilerError> {
        let target = self.parse_conditional_expression()?;

        let Some(op) = self.peek_type().and_then(assignment_operator) else {
            return Ok(target);
        };

        if !matches!(
            target.kind,
            ExpressionKind::Identifier(_) | ExpressionKind::Member { .. } | ExpressionKind::Index { .. }
        ) {
            return Err(ParseError::InvalidExpression {
                message: format!("Invalid assignment target: {}", target.kind_name()),
                location: target.span.start,
            }
            .into());
        }

        self.advance();
        let value = self.parse_assignment_expression()?;
        let span = target.span.to(&value.span);
        Ok(self.make_expression(
            ExpressionKind::Binary {
                op,
                left: Box::new(target),
                right: Box::new(value),
            },
            span,
        ))
    }

    /// Parse conditional expression (ternary operator)
    pub fn parse_conditional_expression(&mut self) -> Result<Expression, CompilerError> {
        let condition = self.parse_binary_expression(precedence::NULLISH)?;

        if !self.match_token(&TokenType::Question) {
            return Ok(condition);
        }

        let then_expr = self.parse_assignment_expression()?;
        self.expect(TokenType::Colon, "conditional expression")?;
        let else_expr = self.parse_assignment_expression()?;
        let span = condition.span.to(&else_expr.span);

        Ok(self.make_expression(
            ExpressionKind::Conditional {
                condition: Box::new(condition),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
            },
            span,
        ))
    }

    /// Parse binary operators binding at least as tightly as `min_precedence`
    pub fn parse_binary_expression(&mut self, min_precedence: u8) -> Result<Expression, CompilerError> {
        let mut left = self.parse_unary_expression()?;

        while let Some(op) = self.peek_type().and_then(binary_operator) {
            let op_precedence = op.precedence();
            if op_precedence < min_precedence {
                break;
            }
            self.advance();

            let next_min = if op.is_right_associative() {
                op_precedence
            } else {
                op_precedence + 1
            };
            let right = self.parse_binary_expression(next_min)?;
            let span = left.span.to(&right.span);

            left = self.make_expression(
                ExpressionKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::parse_expr;
    use crate::ast::*;

    fn binary_parts(expr: &Expression) -> (BinaryOp, &Expression, &Expression) {
        match &expr.kind {
            ExpressionKind::Binary { op, left, right } => (*op, left, right),
            other => panic!("Expected binary expression, got {:?}", other),
        }
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let expr = parse_expr("1 + 2 * 3").unwrap();
        let (op, left, right) = binary_parts(&expr);
        assert_eq!(op, BinaryOp::Add);
        assert_eq!(left.kind, ExpressionKind::NumericLiteral("1".to_string()));
        assert_eq!(binary_parts(right).0, BinaryOp::Mul);
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        let expr = parse_expr("10 - 4 - 3").unwrap();
        let (op, left, _) = binary_parts(&expr);
        assert_eq!(op, BinaryOp::Sub);
        assert_eq!(binary_parts(left).0, BinaryOp::Sub);
    }

    #[test]
    fn test_exponent_is_right_associative() {
        let expr = parse_expr("2 ** 3 ** 2").unwrap();
        let (op, left, right) = binary_parts(&expr);
        assert_eq!(op, BinaryOp::Exp);
        assert_eq!(left.kind, ExpressionKind::NumericLiteral("2".to_string()));
        assert_eq!(binary_parts(right).0, BinaryOp::Exp);
    }

    #[test]
    fn test_comparison_below_arithmetic() {
        let expr = parse_expr("a + 1 < b * 2").unwrap();
        let (op, left, right) = binary_parts(&expr);
        assert_eq!(op, BinaryOp::Less);
        assert_eq!(binary_parts(left).0, BinaryOp::Add);
        assert_eq!(binary_parts(right).0, BinaryOp::Mul);
    }

    #[test]
    fn test_assignment() {
        let expr = parse_expr("total += price * 0.2").unwrap();
        let (op, target, value) = binary_parts(&expr);
        assert_eq!(op, BinaryOp::AddAssign);
        assert_eq!(target.as_identifier(), Some("total"));
        assert_eq!(binary_parts(value).0, BinaryOp::Mul);

        assert!(parse_expr("1 = 2").is_err());
    }

    #[test]
    fn test_conditional() {
        let expr = parse_expr("a > 0 ? a : -a").unwrap();
        match expr.kind {
            ExpressionKind::Conditional { condition, else_expr, .. } => {
                assert_eq!(binary_parts(&condition).0, BinaryOp::Greater);
                assert!(matches!(else_expr.kind, ExpressionKind::Unary { op: UnaryOp::Minus, .. }));
            }
            other => panic!("Expected conditional, got {:?}", other),
        }
    }
}

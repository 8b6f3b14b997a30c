//! Member access, calls, `new` and postfix update parsing

use crate::ast::*;
use crate::lexer::TokenType;
use crate::parser::Parser;
use fpr_common::CompilerError;

impl Parser {
    /// Parse postfix expression (`x++`, `x--`)
    pub fn parse_postfix_expression(&mut self) -> Result<Expression, CompilerError> {
        let expr = self.parse_call_expression()?;

        // A line break before `++` starts a new statement
        let op = match self.peek() {
            Some(token) if !token.newline_before => match token.token_type {
                TokenType::PlusPlus => Some(UnaryOp::PostIncrement),
                TokenType::MinusMinus => Some(UnaryOp::PostDecrement),
                _ => None,
            },
            _ => None,
        };

        let Some(op) = op else {
            return Ok(expr);
        };
        self.advance();
        let span = self.span_from(expr.span.start.clone());
        Ok(self.make_expression(
            ExpressionKind::Unary {
                op,
                operand: Box::new(expr),
            },
            span,
        ))
    }

    /// Parse a primary or `new` expression followed by `.x`, `[i]` and `(args)`
    pub fn parse_call_expression(&mut self) -> Result<Expression, CompilerError> {
        let expr = if self.check(&TokenType::New) {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };
        self.parse_member_suffixes(expr, true)
    }

    fn parse_new_expression(&mut self) -> Result<Expression, CompilerError> {
        let start = self.current_location();
        self.expect(TokenType::New, "new expression")?;

        // The constructor is a member chain; its first `(...)` belongs to `new`
        let callee = if self.check(&TokenType::New) {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };
        let callee = self.parse_member_suffixes(callee, false)?;

        let arguments = if self.match_token(&TokenType::LeftParen) {
            self.parse_argument_list(TokenType::RightParen, "new expression")?
        } else {
            Vec::new()
        };

        let span = self.span_from(start);
        Ok(self.make_expression(
            ExpressionKind::New {
                callee: Box::new(callee),
                arguments,
            },
            span,
        ))
    }

    fn parse_member_suffixes(
        &mut self,
        mut expr: Expression,
        allow_calls: bool,
    ) -> Result<Expression, CompilerError> {
        loop {
            let start = expr.span.start.clone();
            let kind = match self.peek_type() {
                Some(TokenType::Dot) => {
                    self.advance();
                    let property = self.expect_identifier("property access")?;
                    ExpressionKind::Member {
                        object: Box::new(expr),
                        property,
                    }
                }
                Some(TokenType::LeftBracket) => {
                    self.advance();
                    let index = self.parse_expression()?;
                    self.expect(TokenType::RightBracket, "element access")?;
                    ExpressionKind::Index {
                        object: Box::new(expr),
                        index: Box::new(index),
                    }
                }
                Some(TokenType::LeftParen) if allow_calls => {
                    self.advance();
                    let arguments = self.parse_argument_list(TokenType::RightParen, "function call")?;
                    ExpressionKind::Call {
                        callee: Box::new(expr),
                        arguments,
                    }
                }
                _ => return Ok(expr),
            };

            let span = self.span_from(start);
            expr = self.make_expression(kind, span);
        }
    }
}

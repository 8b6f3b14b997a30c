//! Expression nodes

use super::ops::{BinaryOp, UnaryOp};
use crate::ast::NodeId;
use crate::lexer::QuoteStyle;
use fpr_common::SourceSpan;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub node_id: NodeId,
    pub kind: ExpressionKind,
    pub span: SourceSpan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionKind {
    /// Numeric literal, exactly as written
    NumericLiteral(String),

    /// String literal; `raw` is the source text between the quotes, absent
    /// for strings built by a rewrite
    StringLiteral {
        value: String,
        quote: QuoteStyle,
        raw: Option<String>,
    },

    BooleanLiteral(bool),

    NullLiteral,

    Identifier(String),

    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },

    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },

    New {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },

    /// `object.property`
    Member {
        object: Box<Expression>,
        property: String,
    },

    /// `object[index]`
    Index {
        object: Box<Expression>,
        index: Box<Expression>,
    },

    Conditional {
        condition: Box<Expression>,
        then_expr: Box<Expression>,
        else_expr: Box<Expression>,
    },

    Array(Vec<Expression>),
}

impl Expression {
    pub fn new(node_id: NodeId, kind: ExpressionKind, span: SourceSpan) -> Self {
        Self { node_id, kind, span }
    }

    /// Syntactic kind name used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            ExpressionKind::NumericLiteral(_) => "NumericLiteral",
            ExpressionKind::StringLiteral { .. } => "StringLiteral",
            ExpressionKind::BooleanLiteral(_) => "BooleanLiteral",
            ExpressionKind::NullLiteral => "NullLiteral",
            ExpressionKind::Identifier(_) => "Identifier",
            ExpressionKind::Binary { .. } => "BinaryExpression",
            ExpressionKind::Unary { op, .. } if op.is_postfix() => "PostfixUnaryExpression",
            ExpressionKind::Unary { .. } => "PrefixUnaryExpression",
            ExpressionKind::Call { .. } => "CallExpression",
            ExpressionKind::New { .. } => "NewExpression",
            ExpressionKind::Member { .. } => "PropertyAccessExpression",
            ExpressionKind::Index { .. } => "ElementAccessExpression",
            ExpressionKind::Conditional { .. } => "ConditionalExpression",
            ExpressionKind::Array(_) => "ArrayLiteralExpression",
        }
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            ExpressionKind::Identifier(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        let span = SourceSpan::synthesized();
        let literal = Expression::new(0, ExpressionKind::NumericLiteral("1.5".to_string()), span.clone());
        assert_eq!(literal.kind_name(), "NumericLiteral");

        let negated = Expression::new(
            1,
            ExpressionKind::Unary {
                op: UnaryOp::Minus,
                operand: Box::new(literal.clone()),
            },
            span.clone(),
        );
        assert_eq!(negated.kind_name(), "PrefixUnaryExpression");

        let bumped = Expression::new(
            2,
            ExpressionKind::Unary {
                op: UnaryOp::PostIncrement,
                operand: Box::new(literal),
            },
            span,
        );
        assert_eq!(bumped.kind_name(), "PostfixUnaryExpression");
    }

    #[test]
    fn test_as_identifier() {
        let ident = Expression::new(0, ExpressionKind::Identifier("Math".to_string()), SourceSpan::synthesized());
        assert_eq!(ident.as_identifier(), Some("Math"));
    }
}

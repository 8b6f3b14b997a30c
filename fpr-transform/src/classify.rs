//! Fixed-point classification
//!
//! `ensure_fixed_point` is the strict entry point: it either hands back an
//! expression that is safe to feed into a precision constructor or method,
//! or fails with `UnsupportedNodeKind`.

use crate::binary::rewrite_binary_expression;
use crate::call::rewrite_call_expression;
use crate::error::TransformError;
use crate::rules::{ArithmeticOp, RewriteRules};
use fpr_frontend::ast::{BinaryOp, Expression, ExpressionKind, NodeIdGenerator};
use std::borrow::Cow;

/// The view of an expression the rewriters dispatch on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeShape<'a> {
    /// Numeric literal, with its source text
    Literal(&'a str),
    BinaryOp {
        op: BinaryOp,
        left: &'a Expression,
        right: &'a Expression,
    },
    Call {
        /// `(namespace, method)` when the callee is `identifier.name`
        namespace_method: Option<(&'a str, &'a str)>,
        arguments: &'a [Expression],
    },
    /// Anything else, by syntactic kind name
    Other(&'static str),
}

impl<'a> NodeShape<'a> {
    pub fn of(expr: &'a Expression) -> Self {
        match &expr.kind {
            ExpressionKind::NumericLiteral(text) => NodeShape::Literal(text.as_str()),
            ExpressionKind::Binary { op, left, right } => NodeShape::BinaryOp {
                op: *op,
                left,
                right,
            },
            ExpressionKind::Call { callee, arguments } => {
                let namespace_method = match &callee.kind {
                    ExpressionKind::Member { object, property } => {
                        object.as_identifier().map(|ns| (ns, property.as_str()))
                    }
                    _ => None,
                };
                NodeShape::Call {
                    namespace_method,
                    arguments,
                }
            }
            _ => NodeShape::Other(expr.kind_name()),
        }
    }
}

/// Return `expr` in a form safe for precision arithmetic
///
/// Literals come back borrowed. Arithmetic and allowlisted calls are
/// rewritten; other calls are kept as they are. Every other node kind,
/// including binary operators with no precision method, is rejected.
pub fn ensure_fixed_point<'a>(
    expr: &'a Expression,
    rules: &RewriteRules,
    ids: &mut NodeIdGenerator,
) -> Result<Cow<'a, Expression>, TransformError> {
    match NodeShape::of(expr) {
        NodeShape::Literal(_) => Ok(Cow::Borrowed(expr)),
        NodeShape::BinaryOp { op, .. } if is_rewritable(op, rules) => {
            rewrite_binary_expression(expr, rules, ids)
        }
        NodeShape::Call { .. } => Ok(rewrite_call_expression(expr, rules, ids)),
        NodeShape::BinaryOp { .. } | NodeShape::Other(_) => Err(TransformError::UnsupportedNodeKind {
            kind: expr.kind_name(),
            location: expr.span.start.clone(),
        }),
    }
}

/// Operator is arithmetic and the rules map it to a method
pub fn is_rewritable(op: BinaryOp, rules: &RewriteRules) -> bool {
    ArithmeticOp::from_binary_op(op)
        .and_then(|op| rules.method_for(op))
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{parse_expr, print};
    use fpr_common::SourceLocation;
    use pretty_assertions::assert_eq;

    fn classify(source: &str) -> Result<String, TransformError> {
        let expr = parse_expr(source);
        let mut ids = NodeIdGenerator::starting_at(1000);
        ensure_fixed_point(&expr, &RewriteRules::default(), &mut ids).map(|e| print(&e))
    }

    fn unsupported_kind(source: &str) -> &'static str {
        match classify(source) {
            Err(TransformError::UnsupportedNodeKind { kind, .. }) => kind,
            other => panic!("Expected UnsupportedNodeKind for {source:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_literal_is_returned_unchanged() {
        let expr = parse_expr("0.1");
        let mut ids = NodeIdGenerator::starting_at(1000);
        let result = ensure_fixed_point(&expr, &RewriteRules::default(), &mut ids).unwrap();

        assert!(matches!(result, Cow::Borrowed(_)));
        assert!(std::ptr::eq(&*result, &expr));
        assert_eq!(ids.peek(), 1000);
    }

    #[test]
    fn test_nested_arithmetic() {
        assert_eq!(
            classify("(1 + 2) * 3").unwrap(),
            "new Decimal(new Decimal(1).plus(2)).times(3)"
        );
        assert_eq!(classify("1e-7 / 3").unwrap(), "new Decimal(1e-7).div(3)");
    }

    #[test]
    fn test_calls_are_safe() {
        assert_eq!(classify("Math.cos(0.5)").unwrap(), "Decimal.cos(0.5)");
        assert_eq!(classify("round(2)").unwrap(), "round(2)");
    }

    #[test]
    fn test_comparison_and_unary_are_rejected() {
        assert_eq!(unsupported_kind("a < b"), "BinaryExpression");
        assert_eq!(unsupported_kind("1 + (a === b)"), "BinaryExpression");
        assert_eq!(unsupported_kind("-a"), "PrefixUnaryExpression");
        assert_eq!(unsupported_kind("2 * -1"), "PrefixUnaryExpression");
        assert_eq!(unsupported_kind("2 ** 8"), "BinaryExpression");
    }

    #[test]
    fn test_other_kinds_are_rejected() {
        assert_eq!(unsupported_kind("price"), "Identifier");
        assert_eq!(unsupported_kind("'1.5'"), "StringLiteral");
        assert_eq!(unsupported_kind("cart.total"), "PropertyAccessExpression");
        assert_eq!(unsupported_kind("rates[0]"), "ElementAccessExpression");
        assert_eq!(unsupported_kind("new Decimal(1)"), "NewExpression");
        assert_eq!(unsupported_kind("c ? 1 : 2"), "ConditionalExpression");
        assert_eq!(unsupported_kind("x = 1"), "BinaryExpression");
        assert_eq!(unsupported_kind("[1, 2]"), "ArrayLiteralExpression");
    }

    #[test]
    fn test_unsupported_reports_operand_location() {
        let expr = parse_expr("1 +  total");
        let err = ensure_fixed_point(&expr, &RewriteRules::default(), &mut NodeIdGenerator::new())
            .unwrap_err();
        assert_eq!(err.location(), Some(&SourceLocation::new("test.ts", 1, 6)));
    }

    #[test]
    fn test_shape_of_calls() {
        let expr = parse_expr("Math.sin(x)");
        match NodeShape::of(&expr) {
            NodeShape::Call {
                namespace_method,
                arguments,
            } => {
                assert_eq!(namespace_method, Some(("Math", "sin")));
                assert_eq!(arguments.len(), 1);
            }
            other => panic!("Expected call shape, got {other:?}"),
        }

        let nested = parse_expr("a.b.sin(x)");
        assert!(matches!(
            NodeShape::of(&nested),
            NodeShape::Call { namespace_method: None, .. }
        ));
        assert_eq!(NodeShape::of(&parse_expr("x")), NodeShape::Other("Identifier"));
    }
}

//! Arithmetic rewriting

use crate::builder::NodeBuilder;
use crate::classify::ensure_fixed_point;
use crate::error::TransformError;
use crate::rules::{ArithmeticOp, RewriteRules};
use fpr_frontend::ast::{Expression, ExpressionKind, NodeIdGenerator};
use std::borrow::Cow;

/// Rewrite `l <op> r` into `new <type>(l').<method>(r')`
///
/// Operators without a precision method come back borrowed with their
/// operands unvisited. Both operands are classified before the replacement
/// is built, so nested arithmetic becomes nested constructor calls.
pub fn rewrite_binary_expression<'a>(
    expr: &'a Expression,
    rules: &RewriteRules,
    ids: &mut NodeIdGenerator,
) -> Result<Cow<'a, Expression>, TransformError> {
    let ExpressionKind::Binary { op, left, right } = &expr.kind else {
        return Ok(Cow::Borrowed(expr));
    };
    let Some(method) = ArithmeticOp::from_binary_op(*op).and_then(|op| rules.method_for(op)) else {
        return Ok(Cow::Borrowed(expr));
    };

    let left = ensure_fixed_point(left, rules, ids)?.into_owned();
    let right = ensure_fixed_point(right, rules, ids)?.into_owned();

    let mut builder = NodeBuilder::new(ids, expr.span.clone());
    Ok(Cow::Owned(builder.instance_method_call(
        &rules.type_name,
        left,
        method,
        right,
    )))
}

//! Namespace call remapping

use crate::builder::NodeBuilder;
use crate::classify::NodeShape;
use crate::rules::RewriteRules;
use fpr_frontend::ast::{Expression, NodeIdGenerator};
use std::borrow::Cow;

/// Rewrite an allowlisted `Namespace.method(args)` to `<type>.<target>(args)`
///
/// The argument nodes are carried over as they are, ids included. Calls
/// outside the allowlist come back borrowed.
pub fn rewrite_call_expression<'a>(
    expr: &'a Expression,
    rules: &RewriteRules,
    ids: &mut NodeIdGenerator,
) -> Cow<'a, Expression> {
    let NodeShape::Call {
        namespace_method: Some((namespace, method)),
        arguments,
    } = NodeShape::of(expr)
    else {
        return Cow::Borrowed(expr);
    };
    let Some(target) = rules.call_target(namespace, method) else {
        return Cow::Borrowed(expr);
    };

    let mut builder = NodeBuilder::new(ids, expr.span.clone());
    Cow::Owned(builder.static_method_call(&rules.type_name, target, arguments.to_vec()))
}

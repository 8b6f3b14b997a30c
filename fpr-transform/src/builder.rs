//! Construction of replacement nodes
//!
//! Every node built here gets a fresh id and the span of the expression it
//! replaces, so diagnostics on rewritten code still point at the source.

use fpr_common::SourceSpan;
use fpr_frontend::ast::{Expression, ExpressionKind, NodeIdGenerator};

pub struct NodeBuilder<'a> {
    ids: &'a mut NodeIdGenerator,
    span: SourceSpan,
}

impl<'a> NodeBuilder<'a> {
    pub fn new(ids: &'a mut NodeIdGenerator, span: SourceSpan) -> Self {
        Self { ids, span }
    }

    fn node(&mut self, kind: ExpressionKind) -> Expression {
        Expression::new(self.ids.next(), kind, self.span.clone())
    }

    pub fn identifier(&mut self, name: &str) -> Expression {
        self.node(ExpressionKind::Identifier(name.to_string()))
    }

    pub fn member(&mut self, object: Expression, property: &str) -> Expression {
        self.node(ExpressionKind::Member {
            object: Box::new(object),
            property: property.to_string(),
        })
    }

    pub fn call(&mut self, callee: Expression, arguments: Vec<Expression>) -> Expression {
        self.node(ExpressionKind::Call {
            callee: Box::new(callee),
            arguments,
        })
    }

    pub fn construct(&mut self, type_name: &str, arguments: Vec<Expression>) -> Expression {
        let callee = self.identifier(type_name);
        self.node(ExpressionKind::New {
            callee: Box::new(callee),
            arguments,
        })
    }

    /// `new <type>(<left>).<method>(<right>)`
    pub fn instance_method_call(
        &mut self,
        type_name: &str,
        left: Expression,
        method: &str,
        right: Expression,
    ) -> Expression {
        let receiver = self.construct(type_name, vec![left]);
        let callee = self.member(receiver, method);
        self.call(callee, vec![right])
    }

    /// `<type>.<method>(<arguments>)`
    pub fn static_method_call(
        &mut self,
        type_name: &str,
        method: &str,
        arguments: Vec<Expression>,
    ) -> Expression {
        let namespace = self.identifier(type_name);
        let callee = self.member(namespace, method);
        self.call(callee, arguments)
    }
}

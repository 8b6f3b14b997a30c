//! Whole-program traversal
//!
//! The walker rebuilds the tree: each visit consumes a node and returns the
//! node that stands in its place. At every expression it first tries a
//! rewrite, keeps the result only if the expression sits in a slot where
//! replacement is allowed, and then descends into whichever node was kept.

use crate::binary::rewrite_binary_expression;
use crate::call::rewrite_call_expression;
use crate::error::TransformError;
use crate::rules::{ClassifyPolicy, RewriteRules};
use fpr_frontend::ast::*;
use log::{debug, trace};
use std::borrow::Cow;

/// Positions whose expression may be replaced by a rewrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentSlot {
    /// Initializer of a variable declarator
    Initializer,
    /// Argument `n` of a call expression
    CallArgument(usize),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Rewrites attached to the tree
    pub rewritten: usize,
    /// Rewrites produced outside an attachable slot and dropped
    pub discarded: usize,
    /// Arithmetic left as written because an operand could not be converted
    pub passthrough: usize,
}

pub struct TreeWalker<'r> {
    rules: &'r RewriteRules,
    policy: ClassifyPolicy,
    ids: NodeIdGenerator,
    stats: WalkStats,
}

impl<'r> TreeWalker<'r> {
    pub fn new(rules: &'r RewriteRules, policy: ClassifyPolicy, ids: NodeIdGenerator) -> Self {
        Self {
            rules,
            policy,
            ids,
            stats: WalkStats::default(),
        }
    }

    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    /// Hand back the id generator, positioned after every node created
    pub fn into_ids(self) -> NodeIdGenerator {
        self.ids
    }

    pub fn walk_program(&mut self, mut program: Program) -> Result<Program, TransformError> {
        program.statements = self.walk_statements(program.statements)?;
        Ok(program)
    }

    fn walk_statements(&mut self, statements: Vec<Statement>) -> Result<Vec<Statement>, TransformError> {
        statements
            .into_iter()
            .map(|stmt| self.walk_statement(stmt))
            .collect()
    }

    fn walk_boxed_statement(&mut self, stmt: Box<Statement>) -> Result<Box<Statement>, TransformError> {
        Ok(Box::new(self.walk_statement(*stmt)?))
    }

    pub fn walk_statement(&mut self, stmt: Statement) -> Result<Statement, TransformError> {
        let Statement { node_id, kind, span } = stmt;

        let kind = match kind {
            StatementKind::Import(_) | StatementKind::Empty => kind,
            StatementKind::Variable(decl) => StatementKind::Variable(self.walk_variable_declaration(decl)?),
            StatementKind::Function(mut func) => {
                func.body = self.walk_statements(func.body)?;
                StatementKind::Function(func)
            }
            StatementKind::Export(inner) => StatementKind::Export(self.walk_boxed_statement(inner)?),
            StatementKind::Expression(expr) => StatementKind::Expression(self.walk_expression(expr, None)?),
            StatementKind::Return(value) => {
                StatementKind::Return(value.map(|v| self.walk_expression(v, None)).transpose()?)
            }
            StatementKind::If {
                condition,
                then_stmt,
                else_stmt,
            } => StatementKind::If {
                condition: self.walk_expression(condition, None)?,
                then_stmt: self.walk_boxed_statement(then_stmt)?,
                else_stmt: else_stmt.map(|s| self.walk_boxed_statement(s)).transpose()?,
            },
            StatementKind::While { condition, body } => StatementKind::While {
                condition: self.walk_expression(condition, None)?,
                body: self.walk_boxed_statement(body)?,
            },
            StatementKind::For {
                init,
                condition,
                update,
                body,
            } => StatementKind::For {
                init: init.map(|s| self.walk_boxed_statement(s)).transpose()?,
                condition: condition.map(|e| self.walk_expression(e, None)).transpose()?,
                update: update.map(|e| self.walk_expression(e, None)).transpose()?,
                body: self.walk_boxed_statement(body)?,
            },
            StatementKind::Block(statements) => StatementKind::Block(self.walk_statements(statements)?),
        };

        Ok(Statement { node_id, kind, span })
    }

    fn walk_variable_declaration(
        &mut self,
        mut decl: VariableDeclaration,
    ) -> Result<VariableDeclaration, TransformError> {
        for declarator in &mut decl.declarators {
            if let Some(init) = declarator.initializer.take() {
                declarator.initializer = Some(self.walk_expression(init, Some(ParentSlot::Initializer))?);
            }
        }
        Ok(decl)
    }

    /// Visit `expr` sitting in `slot`; `None` means replacement is not allowed
    pub fn walk_expression(
        &mut self,
        expr: Expression,
        slot: Option<ParentSlot>,
    ) -> Result<Expression, TransformError> {
        let retained = match (self.try_rewrite(&expr)?, slot) {
            (Some(rewritten), Some(slot)) => {
                debug!(
                    "{}: rewrote {} in {:?}",
                    expr.span.start,
                    expr.kind_name(),
                    slot
                );
                self.stats.rewritten += 1;
                rewritten
            }
            (Some(_), None) => {
                trace!(
                    "{}: dropping rewrite of {} outside an attachable position",
                    expr.span.start,
                    expr.kind_name()
                );
                self.stats.discarded += 1;
                expr
            }
            (None, _) => expr,
        };

        self.walk_children(retained)
    }

    fn try_rewrite(&mut self, expr: &Expression) -> Result<Option<Expression>, TransformError> {
        let result = match &expr.kind {
            ExpressionKind::Binary { .. } => rewrite_binary_expression(expr, self.rules, &mut self.ids),
            ExpressionKind::Call { .. } => Ok(rewrite_call_expression(expr, self.rules, &mut self.ids)),
            _ => return Ok(None),
        };

        match result {
            Ok(Cow::Owned(rewritten)) => Ok(Some(rewritten)),
            Ok(Cow::Borrowed(_)) => Ok(None),
            Err(err) if err.is_unsupported_node() && self.policy == ClassifyPolicy::Passthrough => {
                debug!("{}: leaving arithmetic as written: {}", expr.span.start, err);
                self.stats.passthrough += 1;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn walk_boxed(&mut self, expr: Box<Expression>) -> Result<Box<Expression>, TransformError> {
        Ok(Box::new(self.walk_expression(*expr, None)?))
    }

    fn walk_children(&mut self, expr: Expression) -> Result<Expression, TransformError> {
        let Expression { node_id, kind, span } = expr;

        let kind = match kind {
            ExpressionKind::NumericLiteral(_)
            | ExpressionKind::StringLiteral { .. }
            | ExpressionKind::BooleanLiteral(_)
            | ExpressionKind::NullLiteral
            | ExpressionKind::Identifier(_) => kind,
            ExpressionKind::Binary { op, left, right } => ExpressionKind::Binary {
                op,
                left: self.walk_boxed(left)?,
                right: self.walk_boxed(right)?,
            },
            ExpressionKind::Unary { op, operand } => ExpressionKind::Unary {
                op,
                operand: self.walk_boxed(operand)?,
            },
            ExpressionKind::Call { callee, arguments } => ExpressionKind::Call {
                callee: self.walk_boxed(callee)?,
                arguments: arguments
                    .into_iter()
                    .enumerate()
                    .map(|(i, arg)| self.walk_expression(arg, Some(ParentSlot::CallArgument(i))))
                    .collect::<Result<Vec<_>, _>>()?,
            },
            ExpressionKind::New { callee, arguments } => ExpressionKind::New {
                callee: self.walk_boxed(callee)?,
                arguments: self.walk_unattached(arguments)?,
            },
            ExpressionKind::Member { object, property } => ExpressionKind::Member {
                object: self.walk_boxed(object)?,
                property,
            },
            ExpressionKind::Index { object, index } => ExpressionKind::Index {
                object: self.walk_boxed(object)?,
                index: self.walk_boxed(index)?,
            },
            ExpressionKind::Conditional {
                condition,
                then_expr,
                else_expr,
            } => ExpressionKind::Conditional {
                condition: self.walk_boxed(condition)?,
                then_expr: self.walk_boxed(then_expr)?,
                else_expr: self.walk_boxed(else_expr)?,
            },
            ExpressionKind::Array(elements) => ExpressionKind::Array(self.walk_unattached(elements)?),
        };

        Ok(Expression { node_id, kind, span })
    }

    fn walk_unattached(&mut self, expressions: Vec<Expression>) -> Result<Vec<Expression>, TransformError> {
        expressions
            .into_iter()
            .map(|e| self.walk_expression(e, None))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{parse_program, print_program};
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn walk_with(source: &str, policy: ClassifyPolicy) -> Result<(String, WalkStats), TransformError> {
        let program = parse_program(source);
        let rules = RewriteRules::default();
        let mut walker = TreeWalker::new(&rules, policy, NodeIdGenerator::starting_at(program.next_node_id));
        let program = walker.walk_program(program)?;
        Ok((print_program(&program), walker.stats()))
    }

    fn walk(source: &str) -> String {
        walk_with(source, ClassifyPolicy::Passthrough).unwrap().0
    }

    #[test]
    fn test_initializer_is_rewritten() {
        assert_eq!(walk("let x = 1 + 2;"), "let x = new Decimal(1).plus(2);\n");
        assert_eq!(
            walk("const a = 0.1, b = 0.2 * 3;"),
            "const a = 0.1, b = new Decimal(0.2).times(3);\n"
        );
    }

    #[test]
    fn test_call_argument_is_rewritten_in_place() {
        assert_eq!(walk("f(1 + 2);"), "f(new Decimal(1).plus(2));\n");
        assert_eq!(
            walk("report(label, 0.1 * 3, Math.sin(1));"),
            "report(label, new Decimal(0.1).times(3), Decimal.sin(1));\n"
        );
    }

    #[test]
    fn test_other_positions_are_not_rewritten() {
        let source = indoc! {"
            total = 1 + 2;
            return_(1 + 2 > 0);
            if (0.1 + 0.2 > 0.3) {
                y = [1 * 2];
            }
        "};
        let (output, stats) = walk_with(source, ClassifyPolicy::Passthrough).unwrap();
        assert_eq!(output, source);
        assert_eq!(stats.rewritten, 0);
        assert!(stats.discarded >= 3);
    }

    #[test]
    fn test_nested_declarations_are_visited() {
        let source = indoc! {"
            export function price(qty) {
                for (let i = 0.5 * 2; i < qty; i++) {
                    const step = 1 / 3;
                }
                return Math.cos(0.5);
            }
        "};
        let expected = indoc! {"
            export function price(qty) {
                for (let i = new Decimal(0.5).times(2); i < qty; i++) {
                    const step = new Decimal(1).div(3);
                }
                return Math.cos(0.5);
            }
        "};
        assert_eq!(walk(source), expected);
    }

    #[test]
    fn test_callee_is_never_replaced() {
        // The call itself is in a non-attachable position; its argument is not
        assert_eq!(walk("g(Math.tan(x));"), "g(Decimal.tan(x));\n");
        assert_eq!(walk("Math.tan(x);"), "Math.tan(x);\n");
    }

    #[test]
    fn test_rewritten_node_children_are_walked() {
        assert_eq!(
            walk("let r = Math.sin(1 + 2);"),
            "let r = Decimal.sin(new Decimal(1).plus(2));\n"
        );
    }

    #[test]
    fn test_unsupported_operand_passthrough() {
        let (output, stats) = walk_with("let t = price * 1.2;\nlet s = -1 + 2;\n", ClassifyPolicy::Passthrough).unwrap();
        assert_eq!(output, "let t = price * 1.2;\nlet s = -1 + 2;\n");
        assert_eq!(stats.passthrough, 2);
        assert_eq!(stats.rewritten, 0);
    }

    #[test]
    fn test_unsupported_operand_strict() {
        let err = walk_with("let ok = 1 + 2;\nlet t = price * 1.2;\n", ClassifyPolicy::Strict).unwrap_err();
        match err {
            TransformError::UnsupportedNodeKind { kind, location } => {
                assert_eq!(kind, "Identifier");
                assert_eq!((location.line, location.column), (2, 9));
            }
            other => panic!("Expected UnsupportedNodeKind, got {other:?}"),
        }
    }

    #[test]
    fn test_comparison_reached_by_walker_is_left_alone() {
        let (output, _) = walk_with("let c = a < b;\nlet n = -x;\n", ClassifyPolicy::Strict).unwrap();
        assert_eq!(output, "let c = a < b;\nlet n = -x;\n");
    }

    #[test]
    fn test_walk_is_idempotent() {
        let once = walk("let x = (1 + 2) * 3;\nf(Math.sin(0.5), 4 / 2);\n");
        assert_eq!(walk(&once), once);
    }
}

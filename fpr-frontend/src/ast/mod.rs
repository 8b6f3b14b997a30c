//! Syntax tree for the TypeScript subset
//!
//! The tree is built by the parser, rewritten by the transform crate and
//! serialized back to text by the printer.

pub mod expressions;
pub mod ops;
pub mod statements;

pub use expressions::{Expression, ExpressionKind};
pub use ops::{precedence, BinaryOp, UnaryOp};
pub use statements::{
    DeclarationKeyword, FunctionDeclaration, ImportDeclaration, ImportSpecifier, Parameter,
    Program, Statement, StatementKind, VariableDeclaration, VariableDeclarator,
};

/// Identity of a syntax node. A rewrite that keeps a node keeps its id.
pub type NodeId = u32;

#[derive(Debug, Clone, Default)]
pub struct NodeIdGenerator {
    next_id: NodeId,
}

impl NodeIdGenerator {
    pub fn new() -> Self {
        Self { next_id: 0 }
    }

    /// Continue numbering after an already-built tree
    pub fn starting_at(next_id: NodeId) -> Self {
        Self { next_id }
    }

    pub fn next(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The id the next call to `next` will hand out
    pub fn peek(&self) -> NodeId {
        self.next_id
    }
}

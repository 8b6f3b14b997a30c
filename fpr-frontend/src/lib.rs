//! Fixed-Point Rewriter - Frontend
//!
//! This crate provides the source-level components of the rewriter:
//! - Lexer: tokenizes TypeScript module source
//! - Parser: builds a syntax tree from tokens
//! - AST: syntax tree definitions with stable node identity
//! - Printer: turns a tree back into TypeScript or JavaScript text

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod printer;

pub use ast::{
    BinaryOp, Expression, ExpressionKind, NodeId, NodeIdGenerator, Program, Statement,
    StatementKind, UnaryOp,
};
pub use lexer::{Lexer, QuoteStyle, Token, TokenType};
pub use parser::{ParseError, Parser};
pub use printer::{PrintOptions, Printer};

use fpr_common::CompilerError;
use log::debug;

/// Turns source text into a syntax tree
pub trait SourceParser {
    fn parse(&self, source: &str, file_name: &str) -> Result<Program, CompilerError>;
}

/// Turns a syntax tree back into source text
pub trait SourcePrinter {
    fn print(&self, program: &Program) -> String;
}

/// High-level frontend interface
#[derive(Debug, Clone, Default)]
pub struct Frontend {
    pub print_options: PrintOptions,
}

impl Frontend {
    pub fn new(print_options: PrintOptions) -> Self {
        Self { print_options }
    }

    /// Parse TypeScript source into a syntax tree
    pub fn parse_source(source: &str, file_name: &str) -> Result<Program, CompilerError> {
        let mut lexer = Lexer::new(source, file_name);
        let tokens = lexer.tokenize()?;
        debug!("{}: {} tokens", file_name, tokens.len());

        let mut parser = Parser::new(tokens, file_name);
        let program = parser.parse_program()?;
        debug!("{}: {} top-level statements", file_name, program.statements.len());

        Ok(program)
    }

    pub fn print_program(program: &Program, options: &PrintOptions) -> String {
        Printer::new(options.clone()).print_program(program)
    }
}

impl SourceParser for Frontend {
    fn parse(&self, source: &str, file_name: &str) -> Result<Program, CompilerError> {
        Self::parse_source(source, file_name)
    }
}

impl SourcePrinter for Frontend {
    fn print(&self, program: &Program) -> String {
        Self::print_program(program, &self.print_options)
    }
}

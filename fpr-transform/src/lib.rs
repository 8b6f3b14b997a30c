//! Fixed-Point Rewriter - Transform
//!
//! Rewrites floating-point arithmetic in a module's syntax tree into calls
//! on an arbitrary-precision decimal type:
//! - `a + b` becomes `new Decimal(a).plus(b)` (likewise `-`, `*`, `/`)
//! - `Math.sin(x)` becomes `Decimal.sin(x)` (likewise `cos`, `tan`)
//! - a default import of the precision type is added when missing
//!
//! Rewrites are attached only to variable initializers and call arguments.
//! The transform runs either as a text hook (`SourceTransform`) or inside a
//! compilation through `TransformingHost`.

pub mod binary;
pub mod builder;
pub mod call;
pub mod classify;
pub mod error;
pub mod host;
pub mod imports;
pub mod rules;
pub mod transformer;
pub mod walker;

pub use binary::rewrite_binary_expression;
pub use call::rewrite_call_expression;
pub use classify::{ensure_fixed_point, NodeShape};
pub use error::TransformError;
pub use host::{
    CompileOptions, Compilation, CompilerHost, EmitResult, FileSystemHost, InMemoryHost,
    TransformingHost,
};
pub use imports::{ensure_precision_import, has_precision_import, ImportOutcome};
pub use rules::{ArithmeticOp, CallRule, ClassifyPolicy, OperatorRule, RewriteRules, TransformConfig};
pub use transformer::{transform_source, SourceTransform, TransformReport, Transformer};
pub use walker::{ParentSlot, TreeWalker, WalkStats};

#[cfg(test)]
pub(crate) mod test_support {
    use fpr_frontend::ast::{Expression, Program};
    use fpr_frontend::{Frontend, Lexer, Parser, PrintOptions, Printer};

    pub fn parse_expr(source: &str) -> Expression {
        let tokens = Lexer::new(source, "test.ts").tokenize().unwrap();
        Parser::new(tokens, "test.ts").parse_expression().unwrap()
    }

    pub fn parse_program(source: &str) -> Program {
        Frontend::parse_source(source, "test.ts").unwrap()
    }

    pub fn print(expr: &Expression) -> String {
        Printer::new(PrintOptions::default()).print_expression(expr)
    }

    pub fn print_program(program: &Program) -> String {
        Frontend::print_program(program, &PrintOptions::default())
    }
}

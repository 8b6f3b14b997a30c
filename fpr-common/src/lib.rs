//! Fixed-Point Rewriter - Common Types and Utilities
//!
//! Shared error definitions, diagnostics and source location tracking used
//! by the frontend, the rewrite engine and the driver.

pub mod error;
pub mod source_loc;

pub use error::{CompilerError, Diagnostic, ErrorReporter, Severity};
pub use source_loc::{SourceLocation, SourceSpan, SourceTracker};

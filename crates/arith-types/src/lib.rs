//! Shared types for the arith expression pipeline.
//!
//! This crate defines the AST node types, source spans, error types,
//! and the recursion limits shared by the parser and the evaluator.

mod error;
mod span;
pub mod ast;

pub use error::{ArithError, ErrorCategory, ErrorCode, EvalError, LexError, ParseError};
pub use span::Span;

/// Maximum number of nested parentheses, sign chains and exponent chains
/// accepted by the parser.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Maximum recursion depth of the evaluator over an AST.
pub const MAX_EVAL_DEPTH: usize = 1024;

/// Result type used throughout the arith pipeline.
pub type Result<T> = std::result::Result<T, ArithError>;

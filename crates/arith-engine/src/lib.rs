//! Arith engine: orchestrates the full evaluation pipeline.
//!
//! ```text
//! Source → Lexer → Parser → Evaluator → f64
//! ```
//!
//! Each stage fails fast with its own error type; the engine only lifts
//! them into [`ArithError`] and never rewrites them.

pub mod outcome;
pub mod selftest;

use arith_eval::Evaluator;
use arith_parser::Parser;
use tracing::debug;

pub use arith_types::{
    ArithError, ErrorCategory, ErrorCode, EvalError, LexError, ParseError, MAX_EVAL_DEPTH,
    MAX_NESTING_DEPTH,
};
pub use outcome::{evaluate_to_outcome, ErrorReport, EvalOutcome};

/// Recursion limits for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Parenthesis, sign-chain and exponent-chain nesting allowed by the parser.
    pub max_nesting_depth: usize,
    /// Tree depth allowed by the evaluator.
    pub max_eval_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_nesting_depth: MAX_NESTING_DEPTH,
            max_eval_depth: MAX_EVAL_DEPTH,
        }
    }
}

/// Tokenize, parse and evaluate `text` with the default limits.
pub fn evaluate_expression(text: &str) -> Result<f64, ArithError> {
    evaluate_with(text, &Limits::default())
}

/// Tokenize, parse and evaluate `text` with explicit limits.
pub fn evaluate_with(text: &str, limits: &Limits) -> Result<f64, ArithError> {
    let result = run_pipeline(text, limits);
    if let Err(e) = &result {
        debug!(stage = %e.stage(), code = %e.code(), position = e.position(), "evaluation failed: {e}");
    }
    result
}

fn run_pipeline(text: &str, limits: &Limits) -> Result<f64, ArithError> {
    let tokens = arith_lexer::tokenize(text)?;
    debug!(tokens = tokens.len(), "lexed");

    let expr = Parser::with_max_depth(tokens, limits.max_nesting_depth).parse()?;
    let value = Evaluator::with_max_depth(limits.max_eval_depth).eval(&expr)?;

    // Rendering recurses over the tree, so only do it once evaluation has
    // proven the depth is within limits.
    debug!(ast = %expr, value, "evaluated");
    Ok(value)
}

/// Render a result the way the REPL prints it.
///
/// Integral values keep a trailing `.0` (`7.0`, `512.0`); other values use
/// the shortest representation that round-trips (`3.5`, `0.1`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

//! Arith tree-walking evaluator.
//!
//! Reduces a parsed [`Expr`](arith_types::ast::Expr) to an `f64`. Every
//! successful result is finite; division and modulo by zero, domain
//! errors and overflow are reported as [`EvalError`](arith_types::EvalError).

mod evaluator;

pub use evaluator::{evaluate, Evaluator};

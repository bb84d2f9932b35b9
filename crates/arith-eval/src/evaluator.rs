//! Core expression evaluator.

use arith_types::ast::*;
use arith_types::{EvalError, MAX_EVAL_DEPTH};
use tracing::trace;

/// Result alias for evaluator operations.
type EvalResult<T> = Result<T, EvalError>;

/// Evaluate an expression with the default depth limit.
pub fn evaluate(expr: &Expr) -> EvalResult<f64> {
    Evaluator::new().eval(expr)
}

/// The core evaluator: walks AST nodes and produces numbers.
///
/// Holds no state between calls apart from the depth counter, which is
/// back at zero whenever `eval` returns.
pub struct Evaluator {
    /// Current recursion depth.
    depth: usize,
    /// Depth at which evaluation fails with `DepthExceeded`.
    max_depth: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Create an evaluator with the default depth limit.
    pub fn new() -> Self {
        Self::with_max_depth(MAX_EVAL_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            depth: 0,
            max_depth,
        }
    }

    /// Evaluate an expression to a finite number.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<f64> {
        self.depth = 0;
        self.eval_expr(expr)
    }

    // ══════════════════════════════════════════════════════════════════════
    // Expression evaluation
    // ══════════════════════════════════════════════════════════════════════

    fn eval_expr(&mut self, expr: &Expr) -> EvalResult<f64> {
        if self.depth >= self.max_depth {
            return Err(EvalError::DepthExceeded {
                limit: self.max_depth,
                position: expr.span.start,
            });
        }
        self.depth += 1;
        let result = match &expr.kind {
            ExprKind::Number(n) => finite(*n, "literal", expr),
            ExprKind::Unary { op, operand } => self.eval_unary(*op, operand),
            ExprKind::Binary { left, op, right } => self.eval_binary(left, *op, right, expr),
        };
        self.depth -= 1;
        result
    }

    fn eval_unary(&mut self, op: UnaryOp, operand: &Expr) -> EvalResult<f64> {
        let value = self.eval_expr(operand)?;
        Ok(match op {
            UnaryOp::Plus => value,
            UnaryOp::Minus => -value,
        })
    }

    fn eval_binary(
        &mut self,
        left: &Expr,
        op: BinOp,
        right: &Expr,
        node: &Expr,
    ) -> EvalResult<f64> {
        let lv = self.eval_expr(left)?;
        let rv = self.eval_expr(right)?;
        trace!(op = op.as_str(), left = lv, right = rv, "binary");

        match op {
            BinOp::Add => finite(lv + rv, "'+'", node),
            BinOp::Sub => finite(lv - rv, "'-'", node),
            BinOp::Mul => finite(lv * rv, "'*'", node),
            BinOp::Div => {
                // `-0.0 == 0.0`, so negative zero is caught too.
                if rv == 0.0 {
                    return Err(EvalError::DivisionByZero {
                        position: right.span.start,
                    });
                }
                finite(lv / rv, "'/'", node)
            }
            BinOp::Mod => eval_modulo(lv, rv, right, node),
            BinOp::Pow => eval_power(lv, rv, node),
        }
    }
}

// ── Operators ─────────────────────────────────────────────────────────────

/// Integer modulo on rounded operands.
///
/// Rounds half away from zero, then takes the floored remainder, so the
/// result has the sign of the divisor: `-7 % 3 == 2`, `7 % -3 == -2`.
fn eval_modulo(lv: f64, rv: f64, right: &Expr, node: &Expr) -> EvalResult<f64> {
    let a = lv.round();
    let b = rv.round();
    if b == 0.0 {
        return Err(EvalError::ModuloByZero {
            position: right.span.start,
        });
    }
    let mut r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r += b;
    }
    if r == 0.0 {
        // No negative zero out of `%`.
        r = 0.0;
    }
    finite(r, "'%'", node)
}

fn eval_power(base: f64, exponent: f64, node: &Expr) -> EvalResult<f64> {
    if base == 0.0 && exponent < 0.0 {
        return Err(EvalError::ZeroToNegativePower {
            position: node.span.start,
        });
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(EvalError::Domain {
            base,
            exponent,
            position: node.span.start,
        });
    }
    finite(base.powf(exponent), "'^'", node)
}

/// Reject NaN and infinities.
fn finite(value: f64, context: &str, node: &Expr) -> EvalResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::Overflow {
            context: context.to_string(),
            position: node.span.start,
        })
    }
}

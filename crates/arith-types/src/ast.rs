//! AST node types for arithmetic expressions.
//!
//! Every node carries a [`Span`] for error reporting.
//! The node set is closed: every consumer matches on [`ExprKind`]
//! exhaustively, so adding an operator forces each one to handle it.

use std::fmt;

use crate::Span;

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// A number leaf.
    pub fn number(value: f64, span: Span) -> Self {
        Self::new(ExprKind::Number(value), span)
    }

    /// A unary node spanning from `op_span` to the end of `operand`.
    pub fn unary(op: UnaryOp, op_span: Span, operand: Expr) -> Self {
        let span = op_span.merge(operand.span);
        Self::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        )
    }

    /// A binary node spanning both operands.
    pub fn binary(left: Expr, op: BinOp, right: Expr) -> Self {
        let span = left.span.merge(right.span);
        Self::new(
            ExprKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            span,
        )
    }
}

/// Dropping recursively would overflow the stack on long operator chains
/// (`1+1+...+1` builds a left spine as deep as the chain is long), so
/// children are unlinked onto an explicit stack first.
impl Drop for Expr {
    fn drop(&mut self) {
        if matches!(self.kind, ExprKind::Number(_)) {
            return;
        }
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut node) = pending.pop() {
            detach_children(&mut node, &mut pending);
        }
    }
}

fn detach_children(expr: &mut Expr, pending: &mut Vec<Expr>) {
    match std::mem::replace(&mut expr.kind, ExprKind::Number(0.0)) {
        ExprKind::Number(_) => {}
        ExprKind::Unary { operand, .. } => pending.push(*operand),
        ExprKind::Binary { left, right, .. } => {
            pending.push(*left);
            pending.push(*right);
        }
    }
}

/// Expression variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Numeric literal: `42`, `3.14`
    Number(f64),
    /// `+x`, `-x`
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// `a + b`, `a ^ b`, etc.
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
}

// ── Operators ─────────────────────────────────────────────────────────────────

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinOp {
    /// Returns the operator symbol for error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "^",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `+x`
    Plus,
    /// `-x`
    Minus,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
        }
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Fully parenthesized form: `1+2*3` renders as `(1 + (2 * 3))`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Number(n) => write!(f, "{n}"),
            ExprKind::Unary { op, operand } => write!(f, "({}{operand})", op.as_str()),
            ExprKind::Binary { left, op, right } => {
                write!(f, "({left} {} {right})", op.as_str())
            }
        }
    }
}

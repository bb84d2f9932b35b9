//! Token types for the arith lexer.
//!
//! Defines [`TokenKind`] covering every lexeme of the expression language
//! and [`Token`], which pairs a kind with its source text and [`Span`].

use arith_types::Span;
use std::fmt;

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// The exact source text; empty for [`TokenKind::Eof`].
    pub lexeme: String,
    /// Literal value, present only for [`TokenKind::Number`].
    pub value: Option<NumberLit>,
    /// Source location.
    pub span: Span,
}

impl Token {
    /// Create a token without a literal value.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            value: None,
            span,
        }
    }

    /// Create a number token.
    pub fn number(lexeme: impl Into<String>, value: NumberLit, span: Span) -> Self {
        Self {
            kind: TokenKind::Number,
            lexeme: lexeme.into(),
            value: Some(value),
            span,
        }
    }

    /// Create the end-of-input marker at `position`.
    pub fn eof(position: usize) -> Self {
        Self::new(TokenKind::Eof, "", Span::point(position))
    }

    /// Zero-based character offset where the token begins.
    pub fn position(&self) -> usize {
        self.span.start
    }
}

// ─────────────────────────────────────────────────────────────────────
// NumberLit
// ─────────────────────────────────────────────────────────────────────

/// Value of a numeric literal.
///
/// Lexemes without a decimal point are integers; the parser coerces both
/// forms to `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberLit {
    /// `42`
    Integer(u64),
    /// `3.14`, `3.`, or an integer lexeme too large for `u64`
    Decimal(f64),
}

impl NumberLit {
    pub fn as_f64(self) -> f64 {
        match self {
            NumberLit::Integer(n) => n as f64,
            NumberLit::Decimal(n) => n,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Every token kind in the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Numeric literal (integer or decimal): `42`, `3.14`
    Number,

    // ── Operators ────────────────────────────────────────────

    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `^`
    Caret,

    // ── Punctuation ──────────────────────────────────────────

    /// `(`
    LParen,
    /// `)`
    RParen,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Map a single-character operator or parenthesis to its kind.
    pub fn from_symbol(ch: char) -> Option<TokenKind> {
        Some(match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number => f.write_str("number"),
            TokenKind::Plus => f.write_str("+"),
            TokenKind::Minus => f.write_str("-"),
            TokenKind::Star => f.write_str("*"),
            TokenKind::Slash => f.write_str("/"),
            TokenKind::Percent => f.write_str("%"),
            TokenKind::Caret => f.write_str("^"),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────

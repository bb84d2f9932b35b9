use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Pipeline stage an error belongs to, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Lexical,
    Syntax,
    Evaluation,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexical => write!(f, "lexical"),
            Self::Syntax => write!(f, "syntax"),
            Self::Evaluation => write!(f, "evaluation"),
        }
    }
}

/// Numeric error code (E100–E399).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Lexical errors (E100–E199) ──
    pub const INVALID_CHARACTER: Self = Self(100);

    // ── Syntax errors (E200–E299) ──
    pub const UNEXPECTED_TOKEN: Self = Self(200);
    pub const UNCLOSED_PAREN: Self = Self(201);
    pub const TRAILING_INPUT: Self = Self(202);
    pub const NESTING_TOO_DEEP: Self = Self(203);

    // ── Evaluation errors (E300–E399) ──
    pub const DIVISION_BY_ZERO: Self = Self(300);
    pub const MODULO_BY_ZERO: Self = Self(301);
    pub const DOMAIN_ERROR: Self = Self(302);
    pub const NON_FINITE_RESULT: Self = Self(303);
    pub const DEPTH_EXCEEDED: Self = Self(304);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Lexical,
            200..=299 => ErrorCategory::Syntax,
            _ => ErrorCategory::Evaluation,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────
// Stage errors
// ─────────────────────────────────────────────────────────────────────

/// The tokenizer met a character outside the language.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("unexpected character '{character}' at position {position}")]
pub struct LexError {
    /// The offending character.
    pub character: char,
    /// Zero-based character offset.
    pub position: usize,
}

impl LexError {
    pub fn new(character: char, position: usize) -> Self {
        Self {
            character,
            position,
        }
    }

    pub fn code(&self) -> ErrorCode {
        ErrorCode::INVALID_CHARACTER
    }
}

/// The token stream does not match the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message} at position {position}, found {}", describe_lexeme(.found))]
pub struct ParseError {
    /// Error code (E2xx).
    pub code: ErrorCode,
    /// What the parser expected, e.g. "expected ')' after expression".
    pub message: String,
    /// Lexeme of the unexpected token; empty for end of input.
    pub found: String,
    /// Zero-based character offset of the unexpected token.
    pub position: usize,
}

impl ParseError {
    pub fn new(
        code: ErrorCode,
        message: impl Into<String>,
        found: impl Into<String>,
        position: usize,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            found: found.into(),
            position,
        }
    }
}

fn describe_lexeme(lexeme: &str) -> String {
    if lexeme.is_empty() {
        "end of input".to_string()
    } else {
        format!("'{lexeme}'")
    }
}

/// A structurally valid AST that could not be evaluated.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvalError {
    /// `x / 0`
    #[error("division by zero")]
    DivisionByZero { position: usize },
    /// `x % y` where `y` rounds to zero.
    #[error("modulo by zero")]
    ModuloByZero { position: usize },
    /// Negative base with a non-integer exponent.
    #[error("negative base {base} raised to non-integer power {exponent} has no real result")]
    Domain {
        base: f64,
        exponent: f64,
        position: usize,
    },
    /// `0 ^ -n`
    #[error("zero raised to a negative power")]
    ZeroToNegativePower { position: usize },
    /// Overflow to infinity, or a literal too large to represent.
    #[error("{context} produced a non-finite result")]
    Overflow { context: String, position: usize },
    /// The AST is deeper than the evaluator's recursion limit.
    #[error("maximum evaluation depth of {limit} exceeded")]
    DepthExceeded { limit: usize, position: usize },
}

impl EvalError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::DivisionByZero { .. } => ErrorCode::DIVISION_BY_ZERO,
            Self::ModuloByZero { .. } => ErrorCode::MODULO_BY_ZERO,
            Self::Domain { .. } | Self::ZeroToNegativePower { .. } => ErrorCode::DOMAIN_ERROR,
            Self::Overflow { .. } => ErrorCode::NON_FINITE_RESULT,
            Self::DepthExceeded { .. } => ErrorCode::DEPTH_EXCEEDED,
        }
    }

    /// Character offset of the node that failed.
    pub fn position(&self) -> usize {
        match self {
            Self::DivisionByZero { position }
            | Self::ModuloByZero { position }
            | Self::Domain { position, .. }
            | Self::ZeroToNegativePower { position }
            | Self::Overflow { position, .. }
            | Self::DepthExceeded { position, .. } => *position,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Union
// ─────────────────────────────────────────────────────────────────────

/// Any failure of the pipeline. Stage errors pass through unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArithError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl ArithError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Lex(e) => e.code(),
            Self::Parse(e) => e.code,
            Self::Eval(e) => e.code(),
        }
    }

    /// The stage that failed.
    pub fn stage(&self) -> ErrorCategory {
        self.code().category()
    }

    pub fn position(&self) -> usize {
        match self {
            Self::Lex(e) => e.position,
            Self::Parse(e) => e.position,
            Self::Eval(e) => e.position(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_category() {
        assert_eq!(
            ErrorCode::INVALID_CHARACTER.category(),
            ErrorCategory::Lexical
        );
        assert_eq!(ErrorCode::UNEXPECTED_TOKEN.category(), ErrorCategory::Syntax);
        assert_eq!(ErrorCode::NESTING_TOO_DEEP.category(), ErrorCategory::Syntax);
        assert_eq!(
            ErrorCode::DIVISION_BY_ZERO.category(),
            ErrorCategory::Evaluation
        );
        assert_eq!(
            ErrorCode::DEPTH_EXCEEDED.category(),
            ErrorCategory::Evaluation
        );
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::UNCLOSED_PAREN), "E201");
        assert_eq!(format!("{}", ErrorCode::MODULO_BY_ZERO), "E301");
    }

    #[test]
    fn test_lex_error_message() {
        let err = LexError::new('a', 0);
        assert_eq!(err.to_string(), "unexpected character 'a' at position 0");
        assert_eq!(err.code(), ErrorCode::INVALID_CHARACTER);
    }

    #[test]
    fn test_parse_error_message_with_lexeme() {
        let err = ParseError::new(
            ErrorCode::UNEXPECTED_TOKEN,
            "expected number or '('",
            "*",
            0,
        );
        assert_eq!(
            err.to_string(),
            "expected number or '(' at position 0, found '*'"
        );
    }

    #[test]
    fn test_parse_error_message_at_end_of_input() {
        let err = ParseError::new(
            ErrorCode::UNCLOSED_PAREN,
            "expected ')' after expression",
            "",
            8,
        );
        assert_eq!(
            err.to_string(),
            "expected ')' after expression at position 8, found end of input"
        );
    }

    #[test]
    fn test_eval_error_messages() {
        assert_eq!(
            EvalError::DivisionByZero { position: 2 }.to_string(),
            "division by zero"
        );
        assert_eq!(
            EvalError::ModuloByZero { position: 4 }.to_string(),
            "modulo by zero"
        );
        assert_eq!(
            EvalError::Overflow {
                context: "'^'".into(),
                position: 0
            }
            .to_string(),
            "'^' produced a non-finite result"
        );
    }

    #[test]
    fn test_arith_error_is_transparent() {
        let lex: ArithError = LexError::new('$', 3).into();
        assert_eq!(lex.to_string(), "unexpected character '$' at position 3");
        assert_eq!(lex.stage(), ErrorCategory::Lexical);
        assert_eq!(lex.position(), 3);

        let eval: ArithError = EvalError::DivisionByZero { position: 2 }.into();
        assert_eq!(eval.to_string(), "division by zero");
        assert_eq!(eval.stage(), ErrorCategory::Evaluation);
        assert_eq!(eval.code(), ErrorCode::DIVISION_BY_ZERO);
    }

    #[test]
    fn test_eval_error_json_serialization() {
        let err = EvalError::ModuloByZero { position: 4 };
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"kind":"modulo_by_zero","position":4}"#);

        let back: EvalError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn test_parse_error_json_serialization() {
        let err = ParseError::new(ErrorCode::TRAILING_INPUT, "expected end", "2", 2);
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"code\":202"));
        assert!(json.contains("\"found\":\"2\""));
        assert!(json.contains("\"position\":2"));
    }

    #[test]
    fn test_error_determinism_100_iterations() {
        let first = ParseError::new(ErrorCode::UNEXPECTED_TOKEN, "expected number", "+", 3);
        let first_json = serde_json::to_string(&first).unwrap();

        for i in 0..100 {
            let err = ParseError::new(ErrorCode::UNEXPECTED_TOKEN, "expected number", "+", 3);
            let json = serde_json::to_string(&err).unwrap();
            assert_eq!(first_json, json, "Determinism failure at iteration {i}");
        }
    }
}

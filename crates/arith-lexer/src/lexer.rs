//! Core lexer: converts expression text to a token stream.
//!
//! - Whitespace is skipped and never produces a token
//! - Numbers are ASCII digits with at most one decimal point
//! - `+ - * / % ^ ( )` are single-character tokens
//! - The first unrecognized character aborts lexing with a [`LexError`]
//!
//! Positions are character offsets, so multi-byte input reports the
//! index a user would count, not the byte index.

use arith_types::{LexError, Span};
use tracing::{debug, trace};

use crate::token::{NumberLit, Token, TokenKind};

/// Tokenize `source` in one call.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// The arith lexer.
///
/// Converts source text into a vector of [`Token`]s that always ends
/// with exactly one [`TokenKind::Eof`].
pub struct Lexer {
    /// The full source text, one entry per character.
    chars: Vec<char>,
    /// Current character offset into `chars`.
    pos: usize,
}

impl Lexer {
    /// Create a new lexer over the given text.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    /// Lex the entire input into a token stream.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        debug!(tokens = tokens.len(), "tokenized input");
        Ok(tokens)
    }

    /// Scan the next token. Returns `Eof` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let start = self.pos;
        let Some(ch) = self.advance() else {
            return Ok(Token::eof(start));
        };

        let token = if ch.is_ascii_digit() {
            self.scan_number(start)
        } else if let Some(kind) = TokenKind::from_symbol(ch) {
            Token::new(kind, ch.to_string(), self.span_from(start))
        } else {
            return Err(LexError::new(ch, start));
        };

        trace!(kind = %token.kind, lexeme = %token.lexeme, position = start, "token");
        Ok(token)
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.pos)
    }

    /// Skip spaces, tabs, newlines and any other Unicode whitespace.
    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Number literals
    // ─────────────────────────────────────────────────────────────

    fn scan_number(&mut self, start: usize) -> Token {
        // The first digit is already consumed.
        let mut dot_seen = false;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                self.pos += 1;
            } else if ch == '.' && !dot_seen {
                dot_seen = true;
                self.pos += 1;
            } else {
                break;
            }
        }

        let lexeme: String = self.chars[start..self.pos].iter().collect();
        let value = if dot_seen {
            NumberLit::Decimal(parse_decimal(&lexeme))
        } else {
            lexeme
                .parse::<u64>()
                .map(NumberLit::Integer)
                .unwrap_or_else(|_| NumberLit::Decimal(parse_decimal(&lexeme)))
        };

        Token::number(lexeme, value, self.span_from(start))
    }
}

/// Digits with an optional `.` always parse; oversized values become infinity.
fn parse_decimal(text: &str) -> f64 {
    text.parse().unwrap_or(f64::INFINITY)
}

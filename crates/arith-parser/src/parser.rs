//! Core parser infrastructure: token cursor, nesting guard, error helpers.

use arith_lexer::token::{Token, TokenKind};
use arith_types::ast::Expr;
use arith_types::{ErrorCode, ParseError, MAX_NESTING_DEPTH};
use tracing::debug;

/// Parse a token stream with the default nesting limit.
pub fn parse(tokens: Vec<Token>) -> Result<Expr, ParseError> {
    Parser::new(tokens).parse()
}

/// The arith parser.
///
/// Consumes a token stream produced by the lexer and builds an AST.
/// The first syntax error aborts parsing; there is no recovery.
pub struct Parser {
    /// The token stream; always ends with `Eof`.
    tokens: Vec<Token>,
    /// Current index into `tokens`.
    pos: usize,
    /// Current nesting depth (parentheses, sign chains, exponent chains).
    depth: usize,
    /// Depth at which parsing fails with `NESTING_TOO_DEEP`.
    max_depth: usize,
}

impl Parser {
    /// Create a new parser from a token stream.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_max_depth(tokens, MAX_NESTING_DEPTH)
    }

    /// Create a parser with a custom nesting limit.
    pub fn with_max_depth(mut tokens: Vec<Token>, max_depth: usize) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::eof(end));
        }
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Returns the current token without advancing.
    pub(crate) fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    /// Returns the kind of the current token.
    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Advance the cursor by one and return the consumed token.
    /// The cursor never moves past `Eof`.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Check if the current token has the given kind.
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// If the current token matches, advance and return `true`.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect a specific token kind, or fail with `code` and `message`.
    pub(crate) fn expect(
        &mut self,
        kind: TokenKind,
        code: ErrorCode,
        message: &str,
    ) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(code, message))
        }
    }

    // ── Nesting Guard ─────────────────────────────────────────────────────────

    /// Enter one nesting level; fails once the limit is exceeded.
    pub(crate) fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            self.depth -= 1;
            return Err(self.error_at_current(
                ErrorCode::NESTING_TOO_DEEP,
                &format!("maximum nesting depth of {} exceeded", self.max_depth),
            ));
        }
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // ── Error Reporting ───────────────────────────────────────────────────────

    /// Build an error pointing at the current token.
    pub(crate) fn error_at_current(&self, code: ErrorCode, message: &str) -> ParseError {
        let token = self.peek();
        ParseError::new(code, message, token.lexeme.clone(), token.position())
    }

    // ── Public API ────────────────────────────────────────────────────────────

    /// Parse the whole token stream into one expression.
    ///
    /// The expression must consume every token before `Eof`: `1 2` is an
    /// error, not `1`.
    pub fn parse(mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        if !self.check(TokenKind::Eof) {
            let err = self.error_at_current(
                ErrorCode::TRAILING_INPUT,
                "unexpected token, expected end of expression",
            );
            debug!(position = err.position, "trailing input after expression");
            return Err(err);
        }
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arith_types::Span;

    fn op(kind: TokenKind, lexeme: &str, at: usize) -> Token {
        Token::new(kind, lexeme, Span::new(at, at + 1))
    }

    #[test]
    fn test_missing_eof_is_appended() {
        let parser = Parser::new(vec![op(TokenKind::Plus, "+", 0)]);
        assert_eq!(parser.tokens.len(), 2);
        assert_eq!(parser.tokens[1].kind, TokenKind::Eof);
        assert_eq!(parser.tokens[1].position(), 1);
    }

    #[test]
    fn test_empty_stream_gets_eof_at_zero() {
        let parser = Parser::new(Vec::new());
        assert_eq!(parser.peek_kind(), TokenKind::Eof);
        assert_eq!(parser.peek().position(), 0);
    }

    #[test]
    fn test_advance_stops_at_eof() {
        let mut parser = Parser::new(vec![op(TokenKind::Minus, "-", 0)]);
        assert_eq!(parser.advance().kind, TokenKind::Minus);
        assert_eq!(parser.advance().kind, TokenKind::Eof);
        assert_eq!(parser.advance().kind, TokenKind::Eof);
    }

    #[test]
    fn test_enter_respects_limit() {
        let mut parser = Parser::with_max_depth(Vec::new(), 2);
        assert!(parser.enter().is_ok());
        assert!(parser.enter().is_ok());
        let err = parser.enter().unwrap_err();
        assert_eq!(err.code, ErrorCode::NESTING_TOO_DEEP);
        parser.leave();
        assert!(parser.enter().is_ok());
    }
}

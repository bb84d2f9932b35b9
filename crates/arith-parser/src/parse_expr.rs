//! Expression parsing with operator precedence.
//!
//! Precedence (lowest → highest):
//! 4. `+`, `-`            (left-associative)
//! 3. `*`, `/`, `%`       (left-associative)
//! 2. `^`                 (right-associative)
//! 1. unary `+`, `-`      (prefix, repeatable)
//!
//! Unary binds tighter than `^`, so `-2^2` is `(-2)^2`.

use arith_lexer::token::TokenKind;
use arith_types::ast::*;
use arith_types::{ErrorCode, ParseError};

use crate::parser::Parser;

impl Parser {
    // ══════════════════════════════════════════════════════════════════════════
    // Entry Point
    // ══════════════════════════════════════════════════════════════════════════

    /// `Expr = Term { ("+" | "-") Term }`
    ///
    /// Every entry (top level and each parenthesized group) is one nesting
    /// level.
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.enter()?;
        let result = self.parse_additive();
        self.leave();
        result
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Precedence Chain
    // ══════════════════════════════════════════════════════════════════════════

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = Expr::binary(left, op, right);
        }
        Ok(left)
    }

    /// `Term = Power { ("*" | "/" | "%") Power }`
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_power()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_power()?;
            left = Expr::binary(left, op, right);
        }
        Ok(left)
    }

    /// `Power = Unary [ "^" Power ]`
    ///
    /// Recursing into `Power` for the exponent makes `2^3^2` group as
    /// `2^(3^2)`.
    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_unary()?;
        if !self.eat(TokenKind::Caret) {
            return Ok(base);
        }
        self.enter()?;
        let exponent = self.parse_power();
        self.leave();
        Ok(Expr::binary(base, BinOp::Pow, exponent?))
    }

    /// `Unary = ("+" | "-") Unary | Primary`
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek_kind() {
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Minus => UnaryOp::Minus,
            _ => return self.parse_primary(),
        };
        let op_span = self.advance().span;
        self.enter()?;
        let operand = self.parse_unary();
        self.leave();
        Ok(Expr::unary(op, op_span, operand?))
    }

    /// `Primary = NUMBER | "(" Expr ")"`
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek_kind() {
            TokenKind::Number => {
                let token = self.advance();
                match token.value {
                    Some(value) => Ok(Expr::number(value.as_f64(), token.span)),
                    None => Err(ParseError::new(
                        ErrorCode::UNEXPECTED_TOKEN,
                        "number token without a value",
                        token.lexeme,
                        token.span.start,
                    )),
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(
                    TokenKind::RParen,
                    ErrorCode::UNCLOSED_PAREN,
                    "expected ')' after expression",
                )?;
                Ok(inner)
            }
            _ => Err(self.error_at_current(
                ErrorCode::UNEXPECTED_TOKEN,
                "expected number or '('",
            )),
        }
    }
}

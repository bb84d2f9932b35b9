//! Parser tests.
//!
//! Covers: precedence tiers, associativity (left for `+ - * / %`, right
//! for `^`), unary chains, parentheses, spans, syntax errors with their
//! positions and codes, the nesting limit, and determinism.

use arith_lexer::tokenize;
use arith_parser::{parse, Parser};
use arith_types::ast::*;
use arith_types::{ErrorCode, ParseError, Span};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

/// Lex and parse source.
fn parse_source(source: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(source).unwrap_or_else(|e| panic!("lex error for {source:?}: {e}"));
    parse(tokens)
}

/// Parse and render the AST in fully parenthesized form.
fn render(source: &str) -> String {
    match parse_source(source) {
        Ok(expr) => expr.to_string(),
        Err(e) => panic!("unexpected parse error for {source:?}: {e}"),
    }
}

/// Parse and return the error, panicking if parsing succeeds.
fn parse_err(source: &str) -> ParseError {
    match parse_source(source) {
        Ok(expr) => panic!("expected parse error for {source:?}, got {expr}"),
        Err(e) => e,
    }
}

// ─────────────────────────────────────────────────────────────────────
// Literals
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_single_number() {
    let expr = parse_source("42").unwrap();
    assert_eq!(expr.kind, ExprKind::Number(42.0));
    assert_eq!(expr.span, Span::new(0, 2));
}

#[test]
fn test_integer_coerced_to_float() {
    let expr = parse_source("7").unwrap();
    match &expr.kind {
        ExprKind::Number(v) => assert_eq!(*v, 7.0),
        other => panic!("expected number, got {other:?}"),
    }
}

#[test]
fn test_decimal_number() {
    assert_eq!(parse_source("3.25").unwrap().kind, ExprKind::Number(3.25));
}

// ─────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_mul_binds_tighter_than_add() {
    assert_eq!(render("1+2*3"), "(1 + (2 * 3))");
    assert_eq!(render("1*2+3"), "((1 * 2) + 3)");
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(render("(1+2)*3"), "((1 + 2) * 3)");
}

#[test]
fn test_modulo_is_multiplicative() {
    assert_eq!(render("7 % 4 + 2"), "((7 % 4) + 2)");
    assert_eq!(render("2 * 7 % 4"), "((2 * 7) % 4)");
}

#[test]
fn test_power_binds_tighter_than_mul() {
    assert_eq!(render("2*3^2"), "(2 * (3 ^ 2))");
    assert_eq!(render("3 + 4 * 2 / (1 - 5)^2"), "(3 + ((4 * 2) / ((1 - 5) ^ 2)))");
}

#[test]
fn test_unary_binds_tighter_than_power() {
    assert_eq!(render("-2^2"), "((-2) ^ 2)");
    assert_eq!(render("2^-1"), "(2 ^ (-1))");
}

#[test]
fn test_unary_inside_term() {
    assert_eq!(render("2*-3"), "(2 * (-3))");
    assert_eq!(render("-3 + 5"), "((-3) + 5)");
}

// ─────────────────────────────────────────────────────────────────────
// Associativity
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_subtraction_left_associative() {
    assert_eq!(render("10-4-3"), "((10 - 4) - 3)");
}

#[test]
fn test_division_left_associative() {
    assert_eq!(render("8/4/2"), "((8 / 4) / 2)");
}

#[test]
fn test_modulo_left_associative() {
    assert_eq!(render("20 % 7 % 4"), "((20 % 7) % 4)");
}

#[test]
fn test_power_right_associative() {
    assert_eq!(render("2^3^2"), "(2 ^ (3 ^ 2))");
    assert_eq!(render("2^3^2^1"), "(2 ^ (3 ^ (2 ^ 1)))");
}

#[test]
fn test_power_structure() {
    let expr = parse_source("2^3^2").unwrap();
    match &expr.kind {
        ExprKind::Binary {
            left,
            op: BinOp::Pow,
            right,
        } => {
            assert_eq!(left.kind, ExprKind::Number(2.0));
            assert!(matches!(right.kind, ExprKind::Binary { op: BinOp::Pow, .. }));
        }
        other => panic!("expected power node, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Unary chains
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_double_negation() {
    assert_eq!(render("--3"), "(-(-3))");
    assert_eq!(render("-(-2)"), "(-(-2))");
}

#[test]
fn test_mixed_sign_chain() {
    assert_eq!(render("+-+1"), "(+(-(+1)))");
}

#[test]
fn test_unary_span() {
    let expr = parse_source("- 3").unwrap();
    assert_eq!(expr.span, Span::new(0, 3));
    assert!(matches!(
        expr.kind,
        ExprKind::Unary {
            op: UnaryOp::Minus,
            ..
        }
    ));
}

// ─────────────────────────────────────────────────────────────────────
// Spans
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_binary_span_covers_both_operands() {
    let expr = parse_source("1 + 2 * 3").unwrap();
    assert_eq!(expr.span, Span::new(0, 9));
    match &expr.kind {
        ExprKind::Binary { right, .. } => assert_eq!(right.span, Span::new(4, 9)),
        other => panic!("expected binary node, got {other:?}"),
    }
}

#[test]
fn test_parenthesized_span_is_inner_expression() {
    let expr = parse_source("(1)").unwrap();
    assert_eq!(expr.span, Span::new(1, 2));
}

// ─────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_incomplete_expression() {
    let err = parse_err("1 +");
    assert_eq!(err.code, ErrorCode::UNEXPECTED_TOKEN);
    assert_eq!(err.position, 3);
    assert_eq!(err.found, "");
    assert_eq!(
        err.to_string(),
        "expected number or '(' at position 3, found end of input"
    );
}

#[test]
fn test_leading_binary_operator() {
    let err = parse_err("* 3");
    assert_eq!(err.code, ErrorCode::UNEXPECTED_TOKEN);
    assert_eq!(err.position, 0);
    assert_eq!(err.found, "*");
}

#[test]
fn test_unterminated_parenthesis_after_operator() {
    let err = parse_err("3 + (4 *");
    assert_eq!(err.code, ErrorCode::UNEXPECTED_TOKEN);
    assert_eq!(err.position, 8);
}

#[test]
fn test_missing_closing_parenthesis() {
    let err = parse_err("3 + (4");
    assert_eq!(err.code, ErrorCode::UNCLOSED_PAREN);
    assert_eq!(err.position, 6);
    assert_eq!(
        err.to_string(),
        "expected ')' after expression at position 6, found end of input"
    );
}

#[test]
fn test_missing_closing_parenthesis_before_number() {
    let err = parse_err("(1 2");
    assert_eq!(err.code, ErrorCode::UNCLOSED_PAREN);
    assert_eq!(err.position, 3);
    assert_eq!(err.found, "2");
}

#[test]
fn test_double_slash_is_parse_error() {
    let err = parse_err("3 // 2");
    assert_eq!(err.code, ErrorCode::UNEXPECTED_TOKEN);
    assert_eq!(err.position, 3);
    assert_eq!(err.found, "/");
}

#[test]
fn test_trailing_number_rejected() {
    let err = parse_err("1 2");
    assert_eq!(err.code, ErrorCode::TRAILING_INPUT);
    assert_eq!(err.position, 2);
    assert_eq!(err.found, "2");
}

#[test]
fn test_unbalanced_closing_parenthesis() {
    let err = parse_err("1)");
    assert_eq!(err.code, ErrorCode::TRAILING_INPUT);
    assert_eq!(err.position, 1);

    let err = parse_err(")");
    assert_eq!(err.code, ErrorCode::UNEXPECTED_TOKEN);
    assert_eq!(err.position, 0);
}

#[test]
fn test_empty_parentheses() {
    let err = parse_err("()");
    assert_eq!(err.code, ErrorCode::UNEXPECTED_TOKEN);
    assert_eq!(err.position, 1);
    assert_eq!(err.found, ")");
}

#[test]
fn test_empty_input() {
    let err = parse_err("");
    assert_eq!(err.code, ErrorCode::UNEXPECTED_TOKEN);
    assert_eq!(err.position, 0);
}

#[test]
fn test_dangling_caret() {
    let err = parse_err("2^");
    assert_eq!(err.position, 2);
}

#[test]
fn test_sign_without_operand() {
    let err = parse_err("--");
    assert_eq!(err.code, ErrorCode::UNEXPECTED_TOKEN);
    assert_eq!(err.position, 2);
}

// ─────────────────────────────────────────────────────────────────────
// Nesting limit
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_deep_parentheses_rejected() {
    let source = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    let err = parse_err(&source);
    assert_eq!(err.code, ErrorCode::NESTING_TOO_DEEP);
    assert_eq!(err.position, 256);
}

#[test]
fn test_long_sign_chain_rejected() {
    let source = format!("{}1", "-".repeat(10_000));
    assert_eq!(parse_err(&source).code, ErrorCode::NESTING_TOO_DEEP);
}

#[test]
fn test_long_exponent_chain_rejected() {
    let source = vec!["2"; 10_000].join("^");
    assert_eq!(parse_err(&source).code, ErrorCode::NESTING_TOO_DEEP);
}

#[test]
fn test_nesting_within_limit_accepted() {
    let source = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    assert_eq!(render(&source), "1");
}

#[test]
fn test_long_left_chain_needs_no_nesting() {
    let source = vec!["1"; 5_000].join("+");
    assert!(parse_source(&source).is_ok());
}

#[test]
fn test_custom_nesting_limit() {
    let tokens = tokenize("((1))").unwrap();
    let err = Parser::with_max_depth(tokens, 2).parse().unwrap_err();
    assert_eq!(err.code, ErrorCode::NESTING_TOO_DEEP);

    let tokens = tokenize("((1))").unwrap();
    assert!(Parser::with_max_depth(tokens, 3).parse().is_ok());
}

// ─────────────────────────────────────────────────────────────────────
// Determinism
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_parser_determinism_100_iterations() {
    let source = "3 + 4 * 2 / (1 - 5)^2^-1 % 7";
    let first = parse_source(source).unwrap();
    for i in 0..100 {
        let result = parse_source(source).unwrap();
        assert_eq!(first, result, "Determinism failure at iteration {i}");
    }
}

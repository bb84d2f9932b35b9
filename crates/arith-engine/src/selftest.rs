//! Built-in self-test: a fixed table of expressions with known results.

use crate::evaluate_expression;

/// Absolute tolerance for comparing results.
pub const TOLERANCE: f64 = 1e-9;

/// Expressions that must evaluate to the given value.
pub const VALID_CASES: &[(&str, f64)] = &[
    ("1+2*3", 7.0),
    ("(1+2)*3", 9.0),
    ("2^3^2", 512.0),
    ("-3 + 5", 2.0),
    ("3 + 4 * 2 / (1 - 5)^2", 3.5),
    ("7 % 3", 1.0),
    ("7 % 4 + 2", 5.0),
    ("3.5 + 2", 5.5),
    ("-(-2)", 2.0),
];

/// Expressions that must fail.
pub const INVALID_CASES: &[&str] = &["1 +", "* 3", "3 + (4 *", "3 // 2", "abc"];

/// Result of a single self-test case.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseResult {
    /// Valid case produced the expected value.
    Pass,
    /// Valid case produced a different value.
    Fail { actual: f64 },
    /// Valid case failed to evaluate.
    Error(String),
    /// Invalid case failed, as it should.
    RejectedAsExpected(String),
    /// Invalid case evaluated successfully.
    UnexpectedSuccess(f64),
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        matches!(self, Self::Pass | Self::RejectedAsExpected(_))
    }
}

/// One executed case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseReport {
    pub expression: &'static str,
    /// `None` for cases that are expected to fail.
    pub expected: Option<f64>,
    pub result: CaseResult,
}

/// All executed cases, valid ones first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelfTestReport {
    pub cases: Vec<CaseReport>,
}

impl SelfTestReport {
    pub fn all_passed(&self) -> bool {
        self.cases.iter().all(|c| c.result.passed())
    }

    pub fn failures(&self) -> usize {
        self.cases.iter().filter(|c| !c.result.passed()).count()
    }
}

/// Run every case in [`VALID_CASES`] and [`INVALID_CASES`].
pub fn run_self_test() -> SelfTestReport {
    let mut cases = Vec::with_capacity(VALID_CASES.len() + INVALID_CASES.len());

    for &(expression, expected) in VALID_CASES {
        let result = match evaluate_expression(expression) {
            Ok(actual) if (actual - expected).abs() < TOLERANCE => CaseResult::Pass,
            Ok(actual) => CaseResult::Fail { actual },
            Err(e) => CaseResult::Error(e.to_string()),
        };
        cases.push(CaseReport {
            expression,
            expected: Some(expected),
            result,
        });
    }

    for &expression in INVALID_CASES {
        let result = match evaluate_expression(expression) {
            Ok(value) => CaseResult::UnexpectedSuccess(value),
            Err(e) => CaseResult::RejectedAsExpected(e.to_string()),
        };
        cases.push(CaseReport {
            expression,
            expected: None,
            result,
        });
    }

    SelfTestReport { cases }
}

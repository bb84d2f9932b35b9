//! Non-interactive modes: one-shot expressions and the self-test.

use std::io::Write;

use arith_engine::{evaluate_with, format_number};
use arith_engine::selftest::{run_self_test as run_cases, CaseResult};

use crate::repl::render_result;
use crate::Options;

/// Evaluate each expression once. Returns `false` if any failed.
pub fn run_expressions<W: Write>(
    expressions: &[String],
    options: &Options,
    out: &mut W,
) -> anyhow::Result<bool> {
    let mut ok = true;
    for text in expressions {
        let result = evaluate_with(text, &options.limits);
        ok &= result.is_ok();
        writeln!(out, "{}", render_result(&result, options))?;
    }
    Ok(ok)
}

/// Print one line per self-test case and a summary. Returns `false` on any
/// failure.
pub fn run_self_test<W: Write>(out: &mut W) -> anyhow::Result<bool> {
    let report = run_cases();
    writeln!(out, "Running tests...")?;
    let mut in_invalid = false;
    for case in &report.cases {
        let expr = case.expression;
        if case.expected.is_none() && !in_invalid {
            in_invalid = true;
            writeln!(out, "\nInvalid tests (expect errors):")?;
        }
        let expected = case.expected.map(format_number).unwrap_or_default();
        match &case.result {
            CaseResult::Pass => writeln!(out, "PASS: {expr} = {expected}")?,
            CaseResult::Fail { actual } => writeln!(
                out,
                "FAIL: {expr} = {}, expected {expected}",
                format_number(*actual)
            )?,
            CaseResult::Error(msg) => writeln!(out, "ERROR: {expr} -> {msg}")?,
            CaseResult::RejectedAsExpected(msg) => {
                writeln!(out, "OK (error as expected): {expr} -> {msg}")?
            }
            CaseResult::UnexpectedSuccess(value) => writeln!(
                out,
                "FAIL (no error): {expr} = {}",
                format_number(*value)
            )?,
        }
    }

    let total = report.cases.len();
    let failed = report.failures();
    writeln!(out, "\n{} of {total} cases passed", total - failed)?;
    Ok(report.all_passed())
}

//! Serializable evaluation outcome for JSON consumers (the browser binding
//! and `arith --json`).

use serde::{Deserialize, Serialize};

use crate::{evaluate_expression, format_number, ArithError, ErrorCategory, ErrorCode};

/// A structured pipeline error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Stage that failed: `lexical`, `syntax` or `evaluation`.
    pub stage: ErrorCategory,
    /// Error code, e.g. `E300`.
    pub code: ErrorCode,
    /// Human-readable message, identical to the error's `Display`.
    pub message: String,
    /// Character offset the error points at.
    pub position: usize,
}

impl From<&ArithError> for ErrorReport {
    fn from(err: &ArithError) -> Self {
        Self {
            stage: err.stage(),
            code: err.code(),
            message: err.to_string(),
            position: err.position(),
        }
    }
}

/// The result of one evaluation.
///
/// Exactly one of `value` or `error` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// `value` as printed by the REPL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

impl EvalOutcome {
    pub fn from_result(result: &Result<f64, ArithError>) -> Self {
        match result {
            Ok(value) => Self {
                success: true,
                value: Some(*value),
                display: Some(format_number(*value)),
                error: None,
            },
            Err(err) => Self {
                success: false,
                value: None,
                display: None,
                error: Some(ErrorReport::from(err)),
            },
        }
    }

    /// Serialize to a single-line JSON string.
    pub fn to_json(&self) -> String {
        // `value` is always finite, so this never fails in practice.
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"success":false,"error":{{"message":"serialization error: {e}"}}}}"#)
        })
    }
}

/// Evaluate `text` and package the result as an [`EvalOutcome`].
pub fn evaluate_to_outcome(text: &str) -> EvalOutcome {
    EvalOutcome::from_result(&evaluate_expression(text))
}

//! Arith engine as a WASM module for browser environments.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { evaluate } from 'arith-wasm';
//!
//! await init();
//!
//! console.log(JSON.parse(evaluate("2^3^2")));
//! // { success: true, value: 512, display: "512.0" }
//! ```

use wasm_bindgen::prelude::*;

/// Evaluate an expression.
///
/// Returns a JSON string containing an `EvalOutcome`:
/// ```json
/// { "success": true, "value": 7.0, "display": "7.0" }
/// ```
///
/// On failure, `success` is `false` and `error` carries the stage, code,
/// message and character position.
#[wasm_bindgen]
pub fn evaluate(source: &str) -> String {
    arith_engine::evaluate_to_outcome(source).to_json()
}

/// Return the engine version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

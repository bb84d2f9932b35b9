//! Interactive read-evaluate-print loop.

use std::io::{BufRead, Write};

use arith_engine::{evaluate_with, format_number, ArithError, EvalOutcome};
use tracing::debug;

use crate::Options;

pub const BANNER: &str = "Mini Arithmetic Language REPL";
pub const HINT: &str = "Type an expression, or 'quit' to exit.";
pub const PROMPT: &str = ">>> ";

/// Run the loop until end of input or `quit`/`exit`.
pub fn run<R, W>(input: &mut R, out: &mut W, options: &Options) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "{BANNER}")?;
    writeln!(out, "{HINT}")?;

    let mut line = String::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            // Keep the shell prompt off the REPL prompt line.
            writeln!(out)?;
            break;
        }

        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if is_quit(text) {
            break;
        }

        writeln!(out, "{}", render(text, options))?;
    }

    debug!("repl finished");
    Ok(())
}

/// Evaluate one expression and render it as a result line.
pub fn render(text: &str, options: &Options) -> String {
    render_result(&evaluate_with(text, &options.limits), options)
}

pub fn render_result(result: &Result<f64, ArithError>, options: &Options) -> String {
    if options.json {
        return EvalOutcome::from_result(result).to_json();
    }
    match result {
        Ok(value) => format!("= {}", format_number(*value)),
        Err(e) => format!("Error: {e}"),
    }
}

fn is_quit(text: &str) -> bool {
    text.eq_ignore_ascii_case("quit") || text.eq_ignore_ascii_case("exit")
}

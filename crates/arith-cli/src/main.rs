//! `arith`: evaluate arithmetic expressions from the command line or an
//! interactive prompt.

use std::io::{self, Write};
use std::process;

use arith_engine::{Limits, MAX_EVAL_DEPTH, MAX_NESTING_DEPTH};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{filter::LevelFilter, prelude::*};

mod batch;
mod repl;

#[derive(Parser, Debug)]
#[clap(version, about = "Evaluate arithmetic expressions")]
pub struct Args {
    #[clap(
        action,
        long_help = "Expressions to evaluate

Each expression is evaluated once and its result printed. Without any
expression, an interactive prompt is started."
    )]
    pub expressions: Vec<String>,

    #[clap(long, action, help = "Run the built-in test cases and exit")]
    pub self_test: bool,

    #[clap(long, action, help = "Print one JSON outcome object per expression")]
    pub json: bool,

    #[clap(
        long,
        default_value_t = MAX_NESTING_DEPTH,
        help = "Maximum nesting of parentheses, signs and exponents"
    )]
    pub max_depth: usize,

    #[clap(
        long,
        default_value_t = MAX_EVAL_DEPTH,
        help = "Maximum expression tree depth during evaluation"
    )]
    pub max_eval_depth: usize,

    #[clap(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Show more in logs, may be provided multiple times",
    )]
    pub verbose: u8,
}

/// Options shared by the interactive and one-shot modes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub limits: Limits,
    pub json: bool,
}

impl From<&Args> for Options {
    fn from(args: &Args) -> Self {
        Self {
            limits: Limits {
                max_nesting_depth: args.max_depth,
                max_eval_depth: args.max_eval_depth,
            },
            json: args.json,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    debug!(?args, "starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let ok = if args.self_test {
        batch::run_self_test(&mut out)?
    } else if !args.expressions.is_empty() {
        batch::run_expressions(&args.expressions, &Options::from(&args), &mut out)?
    } else {
        let stdin = io::stdin();
        repl::run(&mut stdin.lock(), &mut out, &Options::from(&args))?;
        true
    };

    out.flush()?;
    if !ok {
        process::exit(1);
    }
    Ok(())
}

/// Log to stderr; `-v` enables debug, `-vv` trace.
fn init_logging(verbose: u8) {
    let log_level_filter = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::registry::Registry::default()
        .with(log_level_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

//! CLI tool to run a record demo on the element-at-a-time push executor.

use clap::Parser;
use push_streams::{run_push, run_push_traced};
use std::io::{self, Write};
use std::process;
use tracing::{Level, error};
use user_streams::{Demo, SalaryRule, users};

/// Run one record demo on the push executor.
///
/// Prints the same lines as stream-demo for that demo.
#[derive(Parser)]
#[command(name = "stream-trace")]
struct Cli {
    /// Demo name (from, create, map, flat-map, group-by, filter, take,
    /// take-last, skip, skip-last, element-at)
    demo: String,

    /// Branch order used by the flat-map salary upgrade
    #[arg(long, value_enum, default_value_t = SalaryRule::Literal)]
    salary_rule: SalaryRule,

    /// Show each element's path through the stages on stderr
    #[arg(short, long)]
    trace: bool,

    /// Log executor detail on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .init();

    let demo: Demo = match cli.demo.parse() {
        Ok(demo) => demo,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let result = if cli.trace {
        run_push_traced(demo, users(), cli.salary_rule).map(|(output, trace)| {
            eprint!("{}", trace.render());
            output
        })
    } else {
        run_push(demo, users(), cli.salary_rule)
    };

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for user in &output {
        if let Err(e) = writeln!(out, "{user}") {
            error!("Error writing output: {e}");
            process::exit(1);
        }
    }
}

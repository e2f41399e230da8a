//! CLI tool to run the operator demos.
//!
//! Usage:
//!   stream-demo                       run every demo
//!   stream-demo filters take-last     run a category and a single demo
//!   stream-demo --state shared        let demos see each other's edits
//!   stream-demo --list                show the catalogue
//!
//! Output goes to stdout unless `-o` names a file.

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::{Level, error, info};
use user_streams::{Demo, RunConfig, Runner, SalaryRule, StateMode};

/// Run reactive-style operator demos over the employee dataset.
#[derive(Parser)]
#[command(name = "stream-demo")]
struct Cli {
    /// Demo names (e.g. take-last) or categories (creators, transformers, filters, all)
    demos: Vec<String>,

    /// Whether demos get their own copy of the records or share one
    #[arg(long, value_enum, default_value_t = StateMode::Isolated)]
    state: StateMode,

    /// Branch order used by the flat-map salary upgrade
    #[arg(long, value_enum, default_value_t = SalaryRule::Literal)]
    salary_rule: SalaryRule,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List the available demos and exit
    #[arg(long)]
    list: bool,

    /// Log each demo and operator detail on stderr
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

    if cli.list {
        for demo in Demo::ALL {
            println!(
                "{:<12} {:<13} {}",
                demo.name(),
                demo.category().name(),
                demo.description()
            );
        }
        return;
    }

    let demos = match Demo::select(cli.demos.as_slice()) {
        Ok(demos) => demos,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let mut runner = Runner::new(RunConfig {
        state: cli.state,
        salary_rule: cli.salary_rule,
    });

    let result = match &cli.output {
        Some(path) => runner.run_to_path(&demos, path),
        None => runner.run(&demos, &mut io::stdout().lock()),
    };

    match result {
        Ok(reports) => {
            let lines: usize = reports.iter().map(|r| r.lines).sum();
            info!(
                demos = reports.len(),
                lines,
                output = %cli
                    .output
                    .as_deref()
                    .map_or("(stdout)".into(), |p| p.display().to_string()),
                "run complete"
            );
        }
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    }
}

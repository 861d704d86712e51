//! CLI argument parsing and dispatch
//!
//! Accepts exactly one run-selecting form (or none, meaning run everything),
//! optionally combined with `--xml <FILE>`. Anything clap rejects is an
//! unknown-arguments error with exit code 1.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgGroup, Parser};
use tracing::info;

use crate::config::{env_help, EnvConfig};
use crate::executor;
use crate::models::{RunSummary, Suite, SuiteOutcome};
use crate::output::{junit, render_console};

/// Exit code for a successful run or a help request
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failed/errored tests or unrecognised arguments
pub const EXIT_FAILURE: i32 = 1;

/// Run test suites and report the results
#[derive(Parser, Debug)]
#[command(name = "verdict")]
#[command(about = "Run test suites and report the results")]
#[command(long_about = None)]
#[command(disable_version_flag = true)]
#[command(group(
    ArgGroup::new("selection")
        .args(["suite", "test", "pattern", "parallel"])
        .multiple(false)
))]
pub struct Args {
    /// Run only the suite with this exact name
    #[arg(long, value_name = "NAME")]
    pub suite: Option<String>,

    /// Run one test of one suite
    #[arg(long, num_args = 2, value_names = ["SUITE", "TEST"])]
    pub test: Option<Vec<String>>,

    /// Run every suite, keeping tests whose name contains PATTERN
    #[arg(long = "match", value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Run suites in parallel, one worker per suite
    #[arg(long)]
    pub parallel: bool,

    /// Write a JUnit XML report to FILE instead of printing to the console
    #[arg(long, value_name = "FILE")]
    pub xml: Option<PathBuf>,
}

/// Which suites and tests to run
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    All,
    Suite(String),
    Test { suite: String, test: String },
    Match(String),
    Parallel,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub selection: Selection,
    pub xml: Option<PathBuf>,
}

impl From<Args> for Invocation {
    fn from(args: Args) -> Self {
        let selection = if let Some(name) = args.suite {
            Selection::Suite(name)
        } else if let Some(mut pair) = args.test {
            // clap guarantees exactly two values
            let test = pair.pop().unwrap_or_default();
            let suite = pair.pop().unwrap_or_default();
            Selection::Test { suite, test }
        } else if let Some(pattern) = args.pattern {
            Selection::Match(pattern)
        } else if args.parallel {
            Selection::Parallel
        } else {
            Selection::All
        };

        Self {
            selection,
            xml: args.xml,
        }
    }
}

/// Result of parsing an argument list
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run(Invocation),
    Help(String),
    Unknown(Vec<String>),
}

/// Parse arguments, excluding the program name
pub fn parse<I, S>(args: I) -> Command
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let argv = std::iter::once("verdict".to_string()).chain(args.iter().cloned());

    match Args::try_parse_from(argv) {
        Ok(parsed) => Command::Run(parsed.into()),
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            Command::Help(err.render().to_string())
        }
        Err(_) => Command::Unknown(args),
    }
}

/// Run the suites chosen by `selection`
pub async fn execute(selection: &Selection, suites: &[Suite]) -> Result<Vec<SuiteOutcome>> {
    let outcomes = match selection {
        Selection::All => executor::run_all(suites),
        Selection::Suite(name) => executor::run_suite_by_name(name, suites),
        Selection::Test { suite, test } => executor::run_single_test(suite, test, suites),
        Selection::Match(pattern) => executor::run_tests_matching(pattern, suites),
        Selection::Parallel => executor::run_all_parallel(suites).await?,
    };
    Ok(outcomes)
}

/// Parse `args`, run the chosen suites, report, and return the exit code
pub async fn run<I, S>(args: I, suites: &[Suite]) -> Result<i32>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let invocation = match parse(args) {
        Command::Run(invocation) => invocation,
        Command::Help(text) => {
            print!("{text}");
            println!("\n{}", env_help());
            return Ok(EXIT_SUCCESS);
        }
        Command::Unknown(args) => {
            eprintln!("Unknown arguments: {}", args.join(" "));
            eprintln!("Run with --help for usage.");
            return Ok(EXIT_FAILURE);
        }
    };

    let config = EnvConfig::load();
    info!("Invocation: {:?}", invocation.selection);

    let outcomes = execute(&invocation.selection, suites).await?;

    let success = match &invocation.xml {
        Some(path) => {
            junit::write_report(path, &outcomes)
                .with_context(|| format!("Failed to write JUnit report to {}", path.display()))?;
            RunSummary::new(&outcomes).is_success()
        }
        None => render_console(&outcomes, config.color_choice())
            .context("Failed to write console report")?,
    };

    Ok(if success { EXIT_SUCCESS } else { EXIT_FAILURE })
}

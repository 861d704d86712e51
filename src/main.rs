//! verdict - runs a set of sample suites through the command surface
//!
//! Real projects link the library and pass their own suites to
//! [`verdict::cli::run`]; this binary exercises every part of the engine on
//! a small built-in set.
//!
//! ## Usage
//!
//! ```bash
//! # Run everything
//! verdict
//!
//! # Run one suite, one test, or tests matching a pattern
//! verdict --suite Math
//! verdict --test Math add
//! verdict --match str
//!
//! # Suite-parallel run with a JUnit report
//! verdict --parallel --xml report.xml
//! ```

use anyhow::Result;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use verdict::cli;
use verdict::config::EnvConfig;
use verdict::utils::init_logger;
use verdict::{Outcome, Suite, Test};

#[tokio::main]
async fn main() -> Result<()> {
    let config = EnvConfig::load();
    init_logger(config.log_level_or_default());

    let code = cli::run(std::env::args().skip(1), &sample_suites()).await?;
    std::process::exit(code);
}

fn sample_suites() -> Vec<Suite> {
    vec![math_suite(), strings_suite(), pipeline_suite(), ledger_suite()]
}

fn math_suite() -> Suite {
    Suite::new(
        "Math",
        vec![
            Test::new("add", || Outcome::check_eq(4, 2 + 2, "2 + 2")),
            Test::new("sub", || Outcome::check_eq(2, 5 - 3, "5 - 3")),
            Test::new("checked_div", || {
                Outcome::check_eq(None, 1i32.checked_div(0), "division by zero")
            }),
        ],
    )
}

fn strings_suite() -> Suite {
    Suite::new(
        "Strings",
        vec![
            Test::new("str_case", || {
                let word = "Verdict";
                Outcome::all([
                    Outcome::check_eq("VERDICT".to_string(), word.to_uppercase(), "upper"),
                    Outcome::check_eq("verdict".to_string(), word.to_lowercase(), "lower"),
                    Outcome::check(word.starts_with('V'), "leading capital"),
                ])
            }),
            Test::new("str_unicode", || {
                if cfg!(target_os = "windows") {
                    return Outcome::skip("console code page may not render glyphs");
                }
                Outcome::check_eq(4, "✓✗○!".chars().count(), "glyph count")
            }),
        ],
    )
}

fn pipeline_suite() -> Suite {
    Suite::new(
        "Pipeline",
        vec![Test::new("parse_then_validate", || {
            Outcome::passed("8080")
                .map(|raw| raw.parse::<u16>())
                .bind(|parsed| match parsed {
                    Ok(port) => Outcome::passed(port),
                    Err(err) => Outcome::fail(format!("not a port: {err}")),
                })
                .bind(|port| Outcome::check(port >= 1024, "unprivileged port"))
        })],
    )
}

/// Shared environment: later tests read what earlier ones wrote
struct Ledger {
    entries: Mutex<Vec<i64>>,
    closed: AtomicUsize,
}

fn ledger_suite() -> Suite {
    Suite::with_setup("Ledger", || Ledger {
        entries: Mutex::new(Vec::new()),
        closed: AtomicUsize::new(0),
    })
    .test("deposit", |ledger| match ledger.entries.lock() {
        Ok(mut entries) => {
            entries.extend([100, -40]);
            Outcome::pass()
        }
        Err(_) => Outcome::fail("ledger lock poisoned"),
    })
    .test("balance", |ledger| match ledger.entries.lock() {
        Ok(entries) => Outcome::check_eq(60, entries.iter().sum::<i64>(), "balance"),
        Err(_) => Outcome::fail("ledger lock poisoned"),
    })
    .teardown(|ledger| {
        ledger.closed.fetch_add(1, Ordering::SeqCst);
    })
    .build()
}

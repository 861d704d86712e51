//! verdict - a test execution engine built on a three-state outcome algebra
//!
//! Tests return [`Outcome`] values instead of panicking: passed, failed with
//! structured [`FailureRecord`]s, or skipped with a reason. The engine runs
//! named tests grouped into [`Suite`]s, times them, turns stray panics into
//! errored results, and reports to the console or a JUnit XML file.
//!
//! # Architecture
//!
//! - [`models`]: outcome algebra, test/suite descriptions, result records
//! - [`executor`]: sequential and suite-parallel execution
//! - [`filter`]: narrowing suites to a name, a single test, or a pattern
//! - [`output`]: console, JUnit XML and JSON reporting
//! - [`cli`]: argument parsing and dispatch
//! - [`config`]: environment-driven settings
//! - [`error`]: error types and Result alias
//!
//! # Example
//!
//! ```
//! use verdict::{executor, Outcome, Suite, Test};
//!
//! let suite = Suite::new(
//!     "Math",
//!     vec![
//!         Test::new("add", || Outcome::check_eq(4, 2 + 2, "2 + 2")),
//!         Test::new("sub", || Outcome::check_eq(2, 5 - 3, "5 - 3")),
//!     ],
//! );
//!
//! let outcome = executor::run_suite(&suite);
//! assert!(outcome.is_success());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod filter;
pub mod models;
pub mod output;
pub mod utils;

pub use error::{Error, Result};
pub use models::{
    FailureRecord, Fault, Outcome, RunSummary, Suite, SuiteBuilder, SuiteOutcome, Test,
    TestOutcome, TestStatus,
};

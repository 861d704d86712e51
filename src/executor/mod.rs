//! Test execution engine
//!
//! Provides sequential and parallel suite execution.

mod parallel;
mod runner;

pub use parallel::run_all_parallel;
pub use runner::{
    run_all, run_single_test, run_suite, run_suite_by_name, run_test, run_tests_matching,
};

//! Sequential test execution
//!
//! Turns tests into timed outcomes and suites into aggregated suite outcomes.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::filter;
use crate::models::{Fault, Outcome, Suite, SuiteOutcome, Test, TestOutcome};
use crate::utils::Timer;

/// Run a single test, converting panics and errors into an errored outcome
///
/// Nothing raised by the test escapes this call.
pub fn run_test(test: &Test) -> TestOutcome {
    let name = test.name().to_string();
    debug!("Running {}", name);

    let timer = Timer::start(&name);
    let result = panic::catch_unwind(AssertUnwindSafe(|| test.invoke()));
    let duration_ms = timer.stop();

    let outcome = match result {
        Ok(Ok(Outcome::Passed(()))) => TestOutcome::Passed { name, duration_ms },
        Ok(Ok(Outcome::Failed(errors))) => TestOutcome::Failed {
            name,
            errors,
            duration_ms,
        },
        Ok(Ok(Outcome::Skipped(reason))) => TestOutcome::Skipped { name, reason },
        Ok(Err(err)) => TestOutcome::Errored {
            name,
            fault: Fault::error(&err),
            duration_ms,
        },
        Err(payload) => TestOutcome::Errored {
            name,
            fault: Fault::panic(panic_message(payload.as_ref())),
            duration_ms,
        },
    };

    if !outcome.status().is_success() {
        warn!("  {}", outcome);
    } else {
        debug!("  {}", outcome);
    }
    outcome
}

/// Run every test of a suite in order, then its teardown
///
/// Teardown runs exactly once whatever the tests did. A panic raised by
/// teardown is not caught and unwinds out of this call.
pub fn run_suite(suite: &Suite) -> SuiteOutcome {
    info!(
        "Starting suite {} ({} tests)",
        suite.name(),
        suite.tests().len()
    );

    let started_at = Utc::now();
    let timer = Timer::start(suite.name());

    let results: Vec<TestOutcome> = suite.tests().iter().map(run_test).collect();
    suite.run_teardown();

    let total_duration_ms = timer.stop();
    let outcome = SuiteOutcome::new(suite.name(), results, total_duration_ms).started_at(started_at);

    info!(
        "Suite {} completed in {:.2}ms - {}/{} successful",
        outcome.suite_name,
        outcome.total_duration_ms,
        outcome
            .results
            .iter()
            .filter(|r| r.status().is_success())
            .count(),
        outcome.results.len()
    );

    outcome
}

/// Run suites one after another, teardown included, preserving order
pub fn run_all(suites: &[Suite]) -> Vec<SuiteOutcome> {
    info!("Running {} suites sequentially", suites.len());
    suites.iter().map(run_suite).collect()
}

/// Run only the suites named `name`
pub fn run_suite_by_name(name: &str, suites: &[Suite]) -> Vec<SuiteOutcome> {
    run_all(&filter::filter_suite_by_name(name, suites))
}

/// Run one test of one suite
pub fn run_single_test(suite_name: &str, test_name: &str, suites: &[Suite]) -> Vec<SuiteOutcome> {
    let selected: Vec<Suite> = filter::filter_suite_by_name(suite_name, suites)
        .iter()
        .map(|suite| filter::filter_test_by_name(test_name, suite))
        .collect();
    run_all(&selected)
}

/// Run every suite restricted to tests whose name contains `pattern`
pub fn run_tests_matching(pattern: &str, suites: &[Suite]) -> Vec<SuiteOutcome> {
    let selected: Vec<Suite> = suites
        .iter()
        .map(|suite| filter::filter_tests_matching(pattern, suite))
        .collect();
    run_all(&selected)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "test panicked with a non-string payload".to_string()
    }
}

//! Parallel suite execution
//!
//! One blocking worker per suite; tests inside a suite stay sequential.

use futures::future::join_all;
use std::panic;
use tracing::{debug, info};

use super::runner::run_suite;
use crate::error::{Error, Result};
use crate::models::{Suite, SuiteOutcome};
use crate::utils::Timer;

/// Run every suite on its own worker and wait for all of them
///
/// Results come back in input order regardless of which suite finishes
/// first. Suites must not share mutable state. A teardown panic inside a
/// worker is resumed on the caller.
pub async fn run_all_parallel(suites: &[Suite]) -> Result<Vec<SuiteOutcome>> {
    info!("Running {} suites in parallel", suites.len());
    let timer = Timer::start("parallel run");

    let handles: Vec<_> = suites
        .iter()
        .cloned()
        .enumerate()
        .map(|(index, suite)| {
            tokio::task::spawn_blocking(move || {
                debug!("Worker {} picked up suite {}", index, suite.name());
                run_suite(&suite)
            })
        })
        .collect();

    // join_all yields in handle order, which is input order
    let mut outcomes = Vec::with_capacity(handles.len());
    for joined in join_all(handles).await {
        match joined {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) if err.is_panic() => panic::resume_unwind(err.into_panic()),
            Err(err) => return Err(Error::Worker(err.to_string())),
        }
    }

    info!(
        "Parallel execution completed in {:.2}ms",
        timer.stop()
    );

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::run_all;
    use crate::models::{Outcome, Test};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn sleepy_suite(name: &str, millis: u64) -> Suite {
        Suite::new(
            name,
            vec![Test::new("nap", move || {
                std::thread::sleep(Duration::from_millis(millis));
                Outcome::pass()
            })],
        )
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_results_keep_input_order() {
        let suites = vec![
            sleepy_suite("A", 60),
            sleepy_suite("B", 1),
            sleepy_suite("C", 30),
        ];

        let outcomes = run_all_parallel(&suites).await.unwrap();
        let names: Vec<_> = outcomes.iter().map(|o| o.suite_name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_matches_sequential_results() {
        let suites = vec![
            Suite::new(
                "Mixed",
                vec![
                    Test::new("ok", Outcome::pass),
                    Test::new("bad", || Outcome::fail("no")),
                    Test::new("later", || Outcome::skip("todo")),
                ],
            ),
            sleepy_suite("Sleepy", 1),
        ];

        let parallel = run_all_parallel(&suites).await.unwrap();
        let sequential = run_all(&suites);
        assert_eq!(parallel.len(), sequential.len());
        for (p, s) in parallel.iter().zip(&sequential) {
            let p_status: Vec<_> = p.results.iter().map(|r| r.status()).collect();
            let s_status: Vec<_> = s.results.iter().map(|r| r.status()).collect();
            assert_eq!(p.suite_name, s.suite_name);
            assert_eq!(p_status, s_status);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_each_teardown_runs_once() {
        let teardowns = Arc::new(AtomicUsize::new(0));
        let suites: Vec<Suite> = (0..4)
            .map(|i| {
                let counter = Arc::clone(&teardowns);
                sleepy_suite(&format!("S{i}"), 2).with_teardown(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect();

        run_all_parallel(&suites).await.unwrap();
        assert_eq!(teardowns.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    #[should_panic(expected = "leak")]
    async fn test_teardown_panic_reaches_caller() {
        let suites = vec![
            sleepy_suite("A", 1),
            sleepy_suite("B", 1).with_teardown(|| panic!("leak")),
        ];

        let _ = run_all_parallel(&suites).await;
    }

    #[tokio::test]
    async fn test_empty_input() {
        assert!(run_all_parallel(&[]).await.unwrap().is_empty());
    }
}

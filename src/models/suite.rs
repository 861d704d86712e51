//! Test and suite descriptions
//!
//! A [`Test`] is a named closure that produces an [`Outcome`]; it never runs
//! until the executor invokes it. A [`Suite`] is an ordered group of tests with
//! an optional teardown. [`Suite::with_setup`] builds suites whose tests share
//! one environment value produced by a setup closure.

use std::fmt;
use std::sync::Arc;

use super::outcome::Outcome;

type RunFn = dyn Fn() -> anyhow::Result<Outcome> + Send + Sync;
type TeardownFn = dyn Fn() + Send + Sync;

/// A named unit of work
#[derive(Clone)]
pub struct Test {
    name: String,
    run: Arc<RunFn>,
}

impl Test {
    pub fn new<F>(name: impl Into<String>, run: F) -> Self
    where
        F: Fn() -> Outcome + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            run: Arc::new(move || Ok(run())),
        }
    }

    /// A test whose closure may return an error instead of an outcome
    ///
    /// An `Err` is reported as an errored test, the same as a panic.
    pub fn fallible<F>(name: impl Into<String>, run: F) -> Self
    where
        F: Fn() -> anyhow::Result<Outcome> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            run: Arc::new(run),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn invoke(&self) -> anyhow::Result<Outcome> {
        (self.run)()
    }
}

impl fmt::Debug for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Test").field("name", &self.name).finish()
    }
}

/// An ordered, named group of tests
#[derive(Clone)]
pub struct Suite {
    name: String,
    tests: Vec<Test>,
    teardown: Option<Arc<TeardownFn>>,
}

impl Suite {
    pub fn new(name: impl Into<String>, tests: Vec<Test>) -> Self {
        Self {
            name: name.into(),
            tests,
            teardown: None,
        }
    }

    /// Run `setup` now and return a builder whose tests share its result
    pub fn with_setup<E, S>(name: impl Into<String>, setup: S) -> SuiteBuilder<E>
    where
        E: Send + Sync + 'static,
        S: FnOnce() -> E,
    {
        SuiteBuilder {
            name: name.into(),
            env: Arc::new(setup()),
            tests: Vec::new(),
            teardown: None,
        }
    }

    pub fn with_teardown<F>(mut self, teardown: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.teardown = Some(Arc::new(teardown));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    pub fn has_teardown(&self) -> bool {
        self.teardown.is_some()
    }

    /// Same name and teardown, different tests
    pub(crate) fn with_tests(&self, tests: Vec<Test>) -> Self {
        Self {
            name: self.name.clone(),
            tests,
            teardown: self.teardown.clone(),
        }
    }

    pub(crate) fn run_teardown(&self) {
        if let Some(teardown) = &self.teardown {
            teardown();
        }
    }
}

impl fmt::Debug for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite")
            .field("name", &self.name)
            .field("tests", &self.tests)
            .field("teardown", &self.teardown.is_some())
            .finish()
    }
}

/// Builds a suite around an environment produced once by setup
///
/// Every test and the teardown hold the same `Arc<E>`; the environment is
/// never copied and is not reachable from outside the suite.
pub struct SuiteBuilder<E> {
    name: String,
    env: Arc<E>,
    tests: Vec<Test>,
    teardown: Option<Arc<TeardownFn>>,
}

impl<E> SuiteBuilder<E>
where
    E: Send + Sync + 'static,
{
    pub fn test<F>(mut self, name: impl Into<String>, run: F) -> Self
    where
        F: Fn(&E) -> Outcome + Send + Sync + 'static,
    {
        let env = Arc::clone(&self.env);
        self.tests.push(Test::new(name, move || run(&env)));
        self
    }

    pub fn fallible_test<F>(mut self, name: impl Into<String>, run: F) -> Self
    where
        F: Fn(&E) -> anyhow::Result<Outcome> + Send + Sync + 'static,
    {
        let env = Arc::clone(&self.env);
        self.tests.push(Test::fallible(name, move || run(&env)));
        self
    }

    pub fn teardown<F>(mut self, teardown: F) -> Self
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let env = Arc::clone(&self.env);
        self.teardown = Some(Arc::new(move || teardown(&env)));
        self
    }

    pub fn build(self) -> Suite {
        Suite {
            name: self.name,
            tests: self.tests,
            teardown: self.teardown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[test]
    fn test_construction_does_not_run_tests() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let test = Test::new("lazy", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Outcome::pass()
        });

        assert_eq!(test.name(), "lazy");
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(test.invoke().unwrap().is_passed());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_setup_runs_once_before_tests() {
        let setups = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&setups);

        let suite = Suite::with_setup("Db", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Mutex::new(Vec::<String>::new())
        })
        .test("insert", |rows| {
            rows.lock().unwrap().push("ada".into());
            Outcome::pass()
        })
        .test("count", |rows| Outcome::check_eq(1, rows.lock().unwrap().len(), "rows"))
        .build();

        assert_eq!(setups.load(Ordering::SeqCst), 1);
        assert_eq!(suite.tests().len(), 2);

        for test in suite.tests() {
            assert!(test.invoke().unwrap().is_passed());
        }
        assert_eq!(setups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_teardown_sees_shared_environment() {
        let seen = Arc::new(AtomicUsize::new(0));
        let observer = Arc::clone(&seen);

        let suite = Suite::with_setup("Counter", || AtomicUsize::new(0))
            .test("bump", |n| {
                n.fetch_add(5, Ordering::SeqCst);
                Outcome::pass()
            })
            .teardown(move |n| observer.store(n.load(Ordering::SeqCst), Ordering::SeqCst))
            .build();

        suite.tests()[0].invoke().unwrap();
        suite.run_teardown();
        assert_eq!(seen.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_independent_setups_do_not_share_state() {
        let build = || {
            Suite::with_setup("Fresh", || AtomicUsize::new(0))
                .test("bump", |n| {
                    let before = n.fetch_add(1, Ordering::SeqCst);
                    Outcome::check_eq(0, before, "fresh environment")
                })
                .build()
        };

        let first = build();
        let second = build();
        assert!(first.tests()[0].invoke().unwrap().is_passed());
        assert!(second.tests()[0].invoke().unwrap().is_passed());
        assert!(first.tests()[0].invoke().unwrap().is_failed());
    }

    #[test]
    fn test_with_tests_keeps_teardown() {
        let suite = Suite::new("S", vec![Test::new("a", Outcome::pass)]).with_teardown(|| {});
        let narrowed = suite.with_tests(Vec::new());
        assert_eq!(narrowed.name(), "S");
        assert!(narrowed.has_teardown());
        assert!(narrowed.tests().is_empty());
    }
}

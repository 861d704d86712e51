//! Suite and test selection
//!
//! Pure functions: inputs are borrowed, new suites are returned, order is
//! preserved, and an empty selection is a valid result.

use crate::models::{Suite, Test};

/// Suites whose name equals `name` exactly
pub fn filter_suite_by_name(name: &str, suites: &[Suite]) -> Vec<Suite> {
    suites.iter().filter(|s| s.name() == name).cloned().collect()
}

/// The same suite restricted to tests named `name` exactly
pub fn filter_test_by_name(name: &str, suite: &Suite) -> Suite {
    filter_tests(|test| test.name() == name, suite)
}

/// The same suite restricted to tests accepted by `predicate`
pub fn filter_tests<P>(predicate: P, suite: &Suite) -> Suite
where
    P: Fn(&Test) -> bool,
{
    let tests = suite.tests().iter().filter(|t| predicate(*t)).cloned().collect();
    suite.with_tests(tests)
}

/// The same suite restricted to tests whose name contains `pattern`
pub fn filter_tests_matching(pattern: &str, suite: &Suite) -> Suite {
    filter_tests(|test| test.name().contains(pattern), suite)
}

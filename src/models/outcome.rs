//! Outcome algebra
//!
//! A check or test produces an [`Outcome`]: passed, failed with one or more
//! [`FailureRecord`]s, or skipped with a reason. Failures and skips are plain
//! data; nothing here panics.
//!
//! Two ways to compose outcomes:
//!
//! - [`Outcome::bind`] short-circuits. Use it when a later step depends on an
//!   earlier one: the first failed or skipped step ends the pipeline and later
//!   steps are never evaluated.
//! - [`Outcome::combine`] accumulates. Use it for independent checks: every
//!   operand is already evaluated and all failures are merged in order.
//!
//! ```
//! use verdict::Outcome;
//!
//! let independent = Outcome::check_eq(4, 2 + 2, "add")
//!     .combine(Outcome::check_eq(2, 5 - 3, "sub"));
//! assert!(independent.is_passed());
//!
//! let dependent = Outcome::passed("42")
//!     .map(|s| s.parse::<i32>().ok())
//!     .bind(|n| match n {
//!         Some(n) => Outcome::check(n > 0, "positive"),
//!         None => Outcome::fail("not a number"),
//!     });
//! assert!(dependent.is_passed());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// One structured explanation of why a check did not hold
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

impl FailureRecord {
    /// Free-form failure carrying only a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    /// Comparison failure; both sides are captured with their `Debug` form
    pub fn mismatch<E: fmt::Debug, A: fmt::Debug>(
        message: impl Into<String>,
        expected: E,
        actual: A,
    ) -> Self {
        Self {
            message: message.into(),
            expected: Some(format!("{expected:?}")),
            actual: Some(format!("{actual:?}")),
        }
    }

    /// Message plus expected/actual lines, as used in report bodies
    pub fn detail(&self) -> String {
        let mut text = self.message.clone();
        if let Some(expected) = &self.expected {
            text.push_str(&format!("\n  expected: {expected}"));
        }
        if let Some(actual) = &self.actual {
            text.push_str(&format!("\n  actual:   {actual}"));
        }
        text
    }
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let (Some(expected), Some(actual)) = (&self.expected, &self.actual) {
            write!(f, " (expected {expected}, got {actual})")?;
        }
        Ok(())
    }
}

/// Tri-state result of a check or test
///
/// The payload type is only interesting while composing checks; tests
/// themselves produce `Outcome<()>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum Outcome<T = ()> {
    Passed(T),
    /// Never empty when built through the constructors below
    Failed(Vec<FailureRecord>),
    Skipped(String),
}

impl Outcome<()> {
    /// A passed outcome with no payload
    pub fn pass() -> Self {
        Outcome::Passed(())
    }

    /// Passes when `condition` holds, otherwise fails with `message`
    pub fn check(condition: bool, message: impl Into<String>) -> Self {
        if condition {
            Outcome::pass()
        } else {
            Outcome::fail(message)
        }
    }

    /// Passes when `expected == actual`, otherwise records both sides
    pub fn check_eq<V>(expected: V, actual: V, message: impl Into<String>) -> Self
    where
        V: PartialEq + fmt::Debug,
    {
        if expected == actual {
            Outcome::pass()
        } else {
            Outcome::fail_with(FailureRecord::mismatch(message, expected, actual))
        }
    }

    /// Combine every outcome left to right, starting from a pass
    pub fn all<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = Outcome<()>>,
    {
        outcomes
            .into_iter()
            .fold(Outcome::pass(), |acc, next| acc.combine(next))
    }
}

impl<T> Outcome<T> {
    pub fn passed(value: T) -> Self {
        Outcome::Passed(value)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Outcome::Failed(vec![FailureRecord::new(message)])
    }

    pub fn fail_with(record: FailureRecord) -> Self {
        Outcome::Failed(vec![record])
    }

    pub fn skip(reason: impl Into<String>) -> Self {
        Outcome::Skipped(reason.into())
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }

    /// Failure records, empty unless failed
    pub fn failures(&self) -> &[FailureRecord] {
        match self {
            Outcome::Failed(errors) => errors,
            _ => &[],
        }
    }

    /// Transform a passed payload; failures and skips pass through
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Passed(value) => Outcome::Passed(f(value)),
            Outcome::Failed(errors) => Outcome::Failed(errors),
            Outcome::Skipped(reason) => Outcome::Skipped(reason),
        }
    }

    /// Short-circuit composition: `f` only runs on a passed outcome
    pub fn bind<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Outcome::Passed(value) => f(value),
            Outcome::Failed(errors) => Outcome::Failed(errors),
            Outcome::Skipped(reason) => Outcome::Skipped(reason),
        }
    }

    /// Accumulating composition of two already-evaluated outcomes
    ///
    /// Skip wins over everything (the left one if both skipped), failures
    /// win over passes, and two failures concatenate left then right.
    pub fn combine<U>(self, other: Outcome<U>) -> Outcome<U> {
        match (self, other) {
            (Outcome::Skipped(reason), _) => Outcome::Skipped(reason),
            (_, Outcome::Skipped(reason)) => Outcome::Skipped(reason),
            (Outcome::Failed(mut left), Outcome::Failed(right)) => {
                left.extend(right);
                Outcome::Failed(left)
            }
            (Outcome::Failed(errors), Outcome::Passed(_)) => Outcome::Failed(errors),
            (Outcome::Passed(_), other) => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn failed(messages: &[&str]) -> Outcome {
        Outcome::Failed(messages.iter().map(|m| FailureRecord::new(*m)).collect())
    }

    fn samples() -> Vec<Outcome> {
        vec![
            Outcome::pass(),
            failed(&["a"]),
            failed(&["b", "c"]),
            Outcome::skip("x"),
            Outcome::skip("y"),
        ]
    }

    #[test]
    fn test_map_only_touches_passed() {
        assert_eq!(Outcome::passed(2).map(|n| n * 10), Outcome::Passed(20));
        let skipped: Outcome<i32> = Outcome::skip("later");
        assert_eq!(skipped.map(|n| n * 10), Outcome::Skipped("later".into()));
        let failed: Outcome<i32> = Outcome::fail("nope");
        assert_eq!(failed.map(|n| n + 1).failures().len(), 1);
    }

    #[test]
    fn test_bind_never_invokes_on_failed_or_skipped() {
        let calls = Cell::new(0);
        let step = |_: ()| {
            calls.set(calls.get() + 1);
            Outcome::pass()
        };

        let failed = failed(&["first"]).bind(step);
        let skipped = Outcome::<()>::skip("env missing").bind(step);

        assert_eq!(calls.get(), 0);
        assert_eq!(failed.failures()[0].message, "first");
        assert_eq!(skipped, Outcome::Skipped("env missing".into()));

        assert!(Outcome::pass().bind(step).is_passed());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_bind_short_circuits_before_a_panicking_step() {
        let outcome = Outcome::<()>::fail("setup broken")
            .bind(|_| -> Outcome { panic!("must not run") });
        assert_eq!(outcome, failed(&["setup broken"]));
    }

    #[test]
    fn test_combine_concatenates_in_argument_order() {
        let combined = failed(&["e1"]).combine(failed(&["e2"]));
        let messages: Vec<_> = combined.failures().iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, ["e1", "e2"]);

        let reversed = failed(&["e2"]).combine(failed(&["e1"]));
        assert_eq!(reversed.failures()[0].message, "e2");
    }

    #[test]
    fn test_combine_dominance() {
        assert_eq!(Outcome::pass().combine(Outcome::pass()), Outcome::pass());
        assert_eq!(failed(&["a"]).combine(Outcome::pass()), failed(&["a"]));
        assert_eq!(Outcome::pass().combine(failed(&["a"])), failed(&["a"]));
        assert_eq!(
            failed(&["a"]).combine(Outcome::<()>::skip("s")),
            Outcome::Skipped("s".into())
        );
        assert_eq!(
            Outcome::<()>::skip("first").combine(Outcome::<()>::skip("second")),
            Outcome::Skipped("first".into())
        );
    }

    #[test]
    fn test_combine_is_associative() {
        for a in samples() {
            for b in samples() {
                for c in samples() {
                    let left = a.clone().combine(b.clone()).combine(c.clone());
                    let right = a.clone().combine(b.clone().combine(c.clone()));
                    assert_eq!(left, right, "a={a:?} b={b:?} c={c:?}");
                }
            }
        }
    }

    #[test]
    fn test_all_keeps_every_failure() {
        let outcome = Outcome::all([
            Outcome::check(true, "one"),
            Outcome::check(false, "two"),
            Outcome::check_eq(3, 4, "three"),
        ]);
        let errors = outcome.failures();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "two");
        assert_eq!(errors[1].message, "three");
        assert_eq!(errors[1].expected.as_deref(), Some("3"));
        assert_eq!(errors[1].actual.as_deref(), Some("4"));
    }

    #[test]
    fn test_failure_record_detail() {
        let record = FailureRecord::mismatch("names differ", "ada", "bob");
        assert_eq!(
            record.detail(),
            "names differ\n  expected: \"ada\"\n  actual:   \"bob\""
        );
        assert_eq!(FailureRecord::new("plain").detail(), "plain");
    }
}

//! Data models for the test engine
//!
//! Outcome algebra, test/suite descriptions and result records.

mod outcome;
mod suite;
mod test_result;

pub use outcome::{FailureRecord, Outcome};
pub use suite::{Suite, SuiteBuilder, Test};
pub use test_result::{Fault, RunSummary, SuiteOutcome, TestOutcome, TestStatus};

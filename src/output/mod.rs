//! Output formatting module
//!
//! Console, JUnit XML and JSON renderings of suite outcomes.

mod formatter;
pub mod json;
pub mod junit;

pub use formatter::{format_duration, render_console, ResultFormatter};

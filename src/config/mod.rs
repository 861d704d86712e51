//! Configuration module
//!
//! Runner settings sourced from the environment.

mod env;

pub use env::{env_help, ColorChoice, EnvConfig};

//! Error types for verdict
//!
//! Test failures are never errors; they are outcomes. These variants cover
//! the few things that can go wrong around a run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for verdict operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A report could not be written to disk.
    #[error("Failed to write report to {}: {source}", .path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A parallel suite worker was cancelled before it produced a result.
    #[error("Suite worker failed: {0}")]
    Worker(String),

    /// A report could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Report {
            path: PathBuf::from("/tmp/out.xml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Failed to write report to /tmp/out.xml: denied");

        let err = Error::Worker("cancelled".into());
        assert_eq!(err.to_string(), "Suite worker failed: cancelled");
    }
}

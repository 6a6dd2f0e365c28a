//! Error types for the grader.
//!
//! Handler failures are graded, not raised: they turn into errored cases.
//! These errors cover the fixtures and the levels directory themselves.

use std::path::PathBuf;

/// Errors that can occur while loading levels.
#[derive(Debug, thiserror::Error)]
pub enum GraderError {
    /// A fixture file or the levels directory could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A fixture file is not a valid level fixture.
    #[error("invalid fixture {path}: {source}")]
    Fixture {
        /// The fixture file.
        path: PathBuf,
        /// The parse failure.
        source: serde_json::Error,
    },
}

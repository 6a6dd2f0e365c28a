//! Error types for the state store.
//!
//! Loading never fails (a missing or corrupt file starts an empty store),
//! so every variant here describes a failed write.

use std::path::PathBuf;

/// Errors that can occur while persisting the state file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Serializing the store contents failed.
    #[error("failed to serialize state store: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing or replacing the state file failed.
    #[error("failed to write state file {path}: {source}")]
    Io {
        /// The file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

//! Error types for slot state persistence

use std::path::PathBuf;
use thiserror::Error;

/// Errors while saving or restoring the persisted slot state
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read state file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse state file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize slot state")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write state file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create state directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported state version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("state holds {found} slots (expected {expected})")]
    SlotCount { found: usize, expected: usize },
}

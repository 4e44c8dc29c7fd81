//! Repository error taxonomy
//!
//! Structural failures abort a command before anything is written. Corrupt
//! state is recoverable for commands that only read it: they report it as a
//! warning and carry on with an empty fallback. `commit` rewrites the commit
//! log, so it treats corrupt state as fatal.
//!
//! Undecodable content is never an error; it is rendered with
//! [`crate::artifacts::objects::blob::BINARY_CONTENT_MARKER`] instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Gitter repository not initialized. Run 'gitter init'.")]
    NotInitialized { path: PathBuf },

    #[error("{kind} file {} is corrupt ({source})", .path.display())]
    CorruptState {
        kind: StateFile,
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(
        "The following files could not be added as they were not found: {}",
        .paths.join(", ")
    )]
    MissingInput { paths: Vec<String> },

    #[error("No valid files found to add. Named as {}", .paths.join(", "))]
    NoValidFiles { paths: Vec<String> },

    #[error("No files specified for adding.")]
    NoPathsGiven,

    #[error("Commit message cannot be empty.")]
    MissingMessage,
}

/// Persisted state files that can be reported as corrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFile {
    Index,
    CommitLog,
}

impl std::fmt::Display for StateFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateFile::Index => write!(f, "Index"),
            StateFile::CommitLog => write!(f, "Commit log"),
        }
    }
}

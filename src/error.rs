//! Fatal error conditions. Per-application failures are not errors; they become
//! [`crate::classify::Outcome::Failed`] and the run carries on.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a run before or while talking to Homebrew.
#[derive(Debug, Error)]
pub enum CaskupError {
    /// No `brew` executable on PATH or in the standard Homebrew prefixes.
    #[error("Homebrew (brew) not found; install it from https://brew.sh")]
    BrewNotFound,

    /// `brew_path` was configured but does not point at an executable file.
    #[error("configured brew path is not executable: {}", .0.display())]
    BrewNotExecutable(PathBuf),

    /// The process could not be started at all.
    #[error("failed to execute {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// `brew list --cask` exited non-zero.
    #[error("brew list --cask failed ({status}): {stderr}")]
    QueryFailed {
        /// Exit status as rendered by the OS.
        status: String,
        /// Trimmed stderr of the failed query.
        stderr: String,
    },
}

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, CaskupError>;

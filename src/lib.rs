//! Library entry for caskup exposing the upgrade pipeline for the binary and integration tests.
//!
//! The pipeline is strictly sequential: scan application bundles, derive a cask id for each,
//! check it against `brew list --cask`, run `brew upgrade --cask`, classify, and tally.

pub mod apps;
pub mod audit;
pub mod brew;
pub mod classify;
pub mod config;
pub mod error;
pub mod identifier;
pub mod paths;
pub mod report;
pub mod runner;

pub use error::{CaskupError, Result};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a process-wide mutex to serialize tests that mutate `HOME` or other env state.
///
/// Inputs:
/// - None
///
/// Output:
/// - Shared reference to a lazily-initialized `Mutex<()>`.
///
/// Details:
/// - Callers should lock the mutex to guard environment-variable or disk state changes.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}

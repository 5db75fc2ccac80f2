//! Shared utilities for argument processing.

use std::io::IsTerminal;
use std::path::PathBuf;

use caskup::brew::{self, Brew, CaskManager};
use caskup::config::Settings;

/// What: Determine the log level based on command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `log_level` argument.
/// - `RUST_LOG`, when set, is honoured later by the subscriber and wins over both.
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Decide whether styled output should be used.
///
/// Output:
/// - `true` when `--no-color` is absent and stdout is a terminal.
pub fn use_color(args: &crate::args::Args) -> bool {
    !args.no_color && std::io::stdout().is_terminal()
}

/// What: Locate brew, warn about a concurrent Homebrew run, and fetch installed casks.
///
/// Inputs:
/// - `settings`: Supplies an optional `brew_path`.
///
/// Output:
/// - `Some((brew, installed))` on success; `None` after printing the fatal error.
///
/// Details:
/// - Shared by the upgrade and list handlers; both exit 1 on `None`.
pub fn connect_brew(
    settings: &Settings,
) -> Option<(Brew, std::collections::BTreeSet<String>)> {
    let program: PathBuf = match brew::locate_brew(settings.brew_path.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            tracing::error!(error = %e, "brew not available");
            return None;
        }
    };
    tracing::info!(brew = %program.display(), "using brew");

    if brew::another_instance_running() {
        eprintln!(
            "Warning: another Homebrew process appears to be running; upgrades may wait on its lock or fail."
        );
        tracing::warn!("another Homebrew process appears to be running");
    }

    let brew = Brew::new(program);
    match brew.installed_casks() {
        Ok(installed) => Some((brew, installed)),
        Err(e) => {
            eprintln!("Error: {e}");
            tracing::error!(error = %e, "installed cask query failed");
            None
        }
    }
}

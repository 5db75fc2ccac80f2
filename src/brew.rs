//! Homebrew process plumbing: locating `brew`, querying installed casks, and running upgrades.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use crate::error::{CaskupError, Result};

/// Install locations tried after `PATH` (Apple Silicon, then Intel).
const FALLBACK_BREW_PATHS: &[&str] = &["/opt/homebrew/bin/brew", "/usr/local/bin/brew"];

/// Pattern passed to `pgrep -f` to spot a running Homebrew command.
const BREW_PROCESS_PATTERN: &str = "Homebrew/Library/Homebrew/brew.rb";

/// Captured result of one upgrade invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpgradeOutput {
    /// Whether the process exited with status zero.
    pub success: bool,
    /// stdout followed by stderr, ANSI escapes stripped.
    pub text: String,
}

/// The package-manager operations the upgrade loop needs.
pub trait CaskManager {
    /// What: Return the ids of all installed casks.
    ///
    /// # Errors
    /// - Returns `Err` when the query cannot be executed or exits non-zero.
    fn installed_casks(&self) -> Result<BTreeSet<String>>;

    /// What: Upgrade a single cask and capture what happened.
    ///
    /// # Errors
    /// - Returns `Err` only when the process cannot be spawned; a non-zero exit is reported
    ///   through `UpgradeOutput::success`.
    fn upgrade_cask(&self, cask: &str, greedy: bool) -> Result<UpgradeOutput>;
}

/// `CaskManager` backed by the real `brew` executable.
#[derive(Clone, Debug)]
pub struct Brew {
    /// Absolute path to the `brew` executable.
    program: PathBuf,
}

impl Brew {
    /// Wrap an already located `brew` executable.
    #[must_use]
    pub const fn new(program: PathBuf) -> Self {
        Self { program }
    }

    /// Path of the executable this instance runs.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run brew with `args`, stdin detached, capturing output.
    fn run(&self, args: &[&str]) -> Result<std::process::Output> {
        debug!(program = %self.program.display(), ?args, "running brew");
        Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CaskupError::Spawn {
                program: self.program.display().to_string(),
                source,
            })
    }
}

impl CaskManager for Brew {
    fn installed_casks(&self) -> Result<BTreeSet<String>> {
        let out = self.run(&["list", "--cask"])?;
        if !out.status.success() {
            return Err(CaskupError::QueryFailed {
                status: out.status.to_string(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        let casks = parse_cask_list(&String::from_utf8_lossy(&out.stdout));
        info!(count = casks.len(), "queried installed casks");
        Ok(casks)
    }

    fn upgrade_cask(&self, cask: &str, greedy: bool) -> Result<UpgradeOutput> {
        let mut args = vec!["upgrade", "--cask"];
        if greedy {
            args.push("--greedy");
        }
        args.push(cask);
        let out = self.run(&args)?;
        let mut text = strip_ansi_escapes::strip_str(String::from_utf8_lossy(&out.stdout));
        let stderr = strip_ansi_escapes::strip_str(String::from_utf8_lossy(&out.stderr));
        if !stderr.trim().is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&stderr);
        }
        debug!(cask, code = ?out.status.code(), "brew upgrade finished");
        Ok(UpgradeOutput {
            success: out.status.success(),
            text,
        })
    }
}

/// What: Parse `brew list --cask` output into cask ids.
///
/// Inputs:
/// - `stdout`: Raw command output.
///
/// Output:
/// - Set of ids; tokens are split on any whitespace so both one-per-line and column output work.
#[must_use]
pub fn parse_cask_list(stdout: &str) -> BTreeSet<String> {
    stdout.split_whitespace().map(str::to_string).collect()
}

/// Return `true` when `path` is a regular file with an executable bit set.
fn is_executable(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path).is_ok_and(|meta| meta.permissions().mode() & 0o111 != 0)
    }
    #[cfg(not(unix))]
    {
        true
    }
}

/// What: Find the `brew` executable to use.
///
/// Inputs:
/// - `configured`: `brew_path` from settings, if set.
///
/// Output:
/// - Path to an executable `brew`.
///
/// # Errors
/// - `BrewNotExecutable` when a configured path is not an executable file (no fallback is tried).
/// - `BrewNotFound` when neither `PATH` nor the standard prefixes contain brew.
pub fn locate_brew(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        if is_executable(path) {
            return Ok(path.to_path_buf());
        }
        return Err(CaskupError::BrewNotExecutable(path.to_path_buf()));
    }
    if let Ok(path) = which::which("brew") {
        return Ok(path);
    }
    FALLBACK_BREW_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| is_executable(p))
        .ok_or(CaskupError::BrewNotFound)
}

/// What: Best-effort check whether another Homebrew command is running right now.
///
/// Output:
/// - `true` when `pgrep` reports a matching process.
///
/// Details:
/// - Point-in-time and racy; only used to print a warning.
/// - Returns `false` when `pgrep` is unavailable.
#[must_use]
pub fn another_instance_running() -> bool {
    match Command::new("pgrep")
        .args(["-f", BREW_PROCESS_PATTERN])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) => status.success(),
        Err(e) => {
            warn!(error = %e, "pgrep unavailable; skipping running-instance check");
            false
        }
    }
}

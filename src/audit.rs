//! Append-only record of casks upgraded by caskup.

use std::io::Write;
use std::path::Path;

/// What: Append upgraded cask ids to an audit log under the logs directory.
///
/// Input: `casks` slice of cask ids to log; each line is timestamped.
///
/// Output: `Ok(())` on success; otherwise an I/O error.
///
/// # Errors
/// - Returns `Err` when the log file cannot be opened or written to
///
/// Details: Writes to `logs_dir/upgrade.log`, prefixing each id with a local timestamp.
/// The logs directory is created only here, when there is something to write.
pub fn log_upgraded(casks: &[String]) -> std::io::Result<()> {
    if casks.is_empty() {
        return Ok(());
    }
    append_upgraded(&crate::paths::ensure_logs_dir()?.join("upgrade.log"), casks)
}

/// Append `<timestamp> <cask>` lines to `path`.
fn append_upgraded(path: &Path, casks: &[String]) -> std::io::Result<()> {
    let mut f = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let when = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    for c in casks {
        writeln!(f, "{when} {c}")?;
    }
    Ok(())
}

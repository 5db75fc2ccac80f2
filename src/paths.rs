//! Filesystem locations used by caskup: config, logs, and the scanned applications folder.

use std::env;
use std::path::{Path, PathBuf};

/// Name of the per-user directory under `~/.config`.
const APP_DIR_NAME: &str = "caskup";

/// What: Determine the settings file path, searching in priority order.
///
/// Inputs:
/// - None (reads `HOME` and `XDG_CONFIG_HOME`).
///
/// Output:
/// - `Some(PathBuf)` for the first existing `settings.conf`; `None` when no candidate exists.
///
/// Details:
/// - Prefers `$HOME/.config/caskup/settings.conf`, then `$XDG_CONFIG_HOME/caskup/settings.conf`.
#[must_use]
pub fn resolve_settings_config_path() -> Option<PathBuf> {
    let home = env::var("HOME").ok();
    let xdg_config = env::var("XDG_CONFIG_HOME").ok();
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(h) = home.as_deref() {
        candidates.push(
            Path::new(h)
                .join(".config")
                .join(APP_DIR_NAME)
                .join("settings.conf"),
        );
    }
    if let Some(xdg) = xdg_config.as_deref()
        && !xdg.trim().is_empty()
    {
        candidates.push(Path::new(xdg).join(APP_DIR_NAME).join("settings.conf"));
    }
    candidates.into_iter().find(|p| p.is_file())
}

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let mut base = home_dir();
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// `$HOME`, or the current directory when `HOME` is unset.
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| ".".to_string()))
}

/// `$HOME/.config/caskup` when HOME is set.
fn home_config_dir() -> Option<PathBuf> {
    env::var("HOME")
        .ok()
        .map(|home| Path::new(&home).join(".config").join(APP_DIR_NAME))
}

/// Config directory for caskup. Resolution only; nothing is created.
#[must_use]
pub fn config_dir() -> PathBuf {
    home_config_dir()
        .unwrap_or_else(|| xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join(APP_DIR_NAME))
}

/// Logs directory under config: "$HOME/.config/caskup/logs". Resolution only.
#[must_use]
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}

/// What: Create the logs directory right before a file is written into it.
///
/// Output:
/// - The logs directory, or the I/O error from creating it.
///
/// # Errors
/// - Propagates `create_dir_all` failures.
pub fn ensure_logs_dir() -> std::io::Result<PathBuf> {
    let dir = logs_dir();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// What: Default folder scanned for application bundles.
///
/// Output:
/// - `$HOME/Applications`.
#[must_use]
pub fn default_applications_dir() -> PathBuf {
    home_dir().join("Applications")
}

/// What: Expand a leading `~` to `$HOME`.
///
/// Inputs:
/// - `raw`: Path text as written by the user.
///
/// Output:
/// - The expanded path; input without a leading `~` is returned unchanged.
#[must_use]
pub fn expand_tilde(raw: &str) -> PathBuf {
    if raw == "~" {
        return home_dir();
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        return home_dir().join(rest);
    }
    PathBuf::from(raw)
}

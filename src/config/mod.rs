//! User settings: applications folder, brew location, and the cask lookup tables.
//!
//! Settings come from built-in defaults, overlaid by `settings.conf` when present.
//! Command-line flags are applied on top by the binary.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

mod parse;

pub use parse::parse_settings;

/// Application names whose cask id does not follow the lowercase/hyphen rule.
const BUILTIN_OVERRIDES: &[(&str, &str)] = &[
    ("iTerm", "iterm2"),
    ("zoom.us", "zoom"),
    ("Docker", "docker-desktop"),
    ("Alfred 5", "alfred"),
    ("GitHub Desktop", "github"),
    ("Parallels Desktop", "parallels"),
    ("Visual Studio Code - Insiders", "visual-studio-code@insiders"),
    ("Microsoft Remote Desktop", "windows-app"),
];

/// Casks whose upgrade is known to prompt for an administrator password.
const BUILTIN_SUDO_CASKS: &[&str] = &[
    "docker-desktop",
    "karabiner-elements",
    "microsoft-teams",
    "parallels",
    "wireshark",
    "zoom",
];

/// Effective configuration for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Folder scanned for `*.app` bundles.
    pub applications_dir: PathBuf,
    /// Explicit brew executable; `None` means discover it.
    pub brew_path: Option<PathBuf>,
    /// Pass `--greedy` to `brew upgrade --cask`.
    pub greedy: bool,
    /// Application name -> cask id exceptions.
    pub overrides: BTreeMap<String, String>,
    /// Casks believed to need elevated privileges when upgrading.
    pub sudo_casks: BTreeSet<String>,
    /// Application names never handed to brew.
    pub skip_apps: BTreeSet<String>,
    /// Append upgraded casks to `logs/upgrade.log`. Off unless enabled in `settings.conf`.
    pub audit_log: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            applications_dir: crate::paths::default_applications_dir(),
            brew_path: None,
            greedy: false,
            overrides: BUILTIN_OVERRIDES
                .iter()
                .map(|(app, cask)| ((*app).to_string(), (*cask).to_string()))
                .collect(),
            sudo_casks: BUILTIN_SUDO_CASKS.iter().map(|s| (*s).to_string()).collect(),
            skip_apps: BTreeSet::new(),
            audit_log: false,
        }
    }
}

/// What: Load settings from an explicit file or the resolved `settings.conf`.
///
/// Inputs:
/// - `explicit`: Path given via `--config`, if any.
///
/// Output:
/// - `Settings` with file values layered over the built-in defaults.
///
/// Details:
/// - A missing or unreadable file is not an error; defaults are used and the condition is logged.
#[must_use]
pub fn load(explicit: Option<&Path>) -> Settings {
    let mut settings = Settings::default();
    let path = explicit
        .map(Path::to_path_buf)
        .or_else(crate::paths::resolve_settings_config_path);
    let Some(path) = path else {
        debug!("no settings.conf found, using defaults");
        return settings;
    };
    match fs::read_to_string(&path) {
        Ok(content) => {
            parse_settings(&content, &mut settings);
            debug!(path = %path.display(), "loaded settings");
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read settings; using defaults");
        }
    }
    settings
}

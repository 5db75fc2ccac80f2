//! Discovery of application bundles in a single folder.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Extension that marks a directory as an application bundle.
const BUNDLE_SUFFIX: &str = ".app";

/// An application bundle found on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppBundle {
    /// Bundle name without the `.app` suffix.
    pub name: String,
    /// Full path of the bundle directory.
    pub path: PathBuf,
}

/// What: List the application bundles directly inside `dir`.
///
/// Inputs:
/// - `dir`: Folder to scan (not recursed into).
///
/// Output:
/// - Bundles sorted by case-insensitive name; empty when the folder is missing or unreadable.
///
/// Details:
/// - An entry counts when its name ends in `.app` and it resolves to a directory (symlinks are followed).
/// - Names that are not valid UTF-8 are skipped with a debug log.
#[must_use]
pub fn scan_applications(dir: &Path) -> Vec<AppBundle> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cannot read applications folder");
            return Vec::new();
        }
    };

    let mut bundles: Vec<AppBundle> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let path = entry.path();
            let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
                debug!(path = %path.display(), "skipping non UTF-8 entry");
                return None;
            };
            let name = file_name.strip_suffix(BUNDLE_SUFFIX)?;
            if name.is_empty() || !path.is_dir() {
                return None;
            }
            Some(AppBundle {
                name: name.to_string(),
                path,
            })
        })
        .collect();

    bundles.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    debug!(dir = %dir.display(), count = bundles.len(), "scanned applications");
    bundles
}

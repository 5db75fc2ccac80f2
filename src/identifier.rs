//! Mapping from an application bundle name to the Homebrew cask id that installs it.

use std::collections::BTreeMap;

/// What: Derive the candidate cask id for an application.
///
/// Inputs:
/// - `app_name`: Bundle name without the `.app` suffix (e.g., `Google Chrome`).
/// - `overrides`: Exact-name exceptions (e.g., `iTerm` -> `iterm2`).
///
/// Output:
/// - The override when one matches exactly, otherwise the name lowercased with spaces turned into hyphens.
///
/// Details:
/// - Pure: the same name and table always give the same id.
/// - Override lookup is case-sensitive because bundle names are.
#[must_use]
pub fn derive_cask_id(app_name: &str, overrides: &BTreeMap<String, String>) -> String {
    if let Some(cask) = overrides.get(app_name) {
        return cask.clone();
    }
    app_name.to_lowercase().replace(' ', "-")
}

//! Line-based parser for `settings.conf`.

use tracing::debug;

use super::Settings;

/// Section of `settings.conf` the parser is currently in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Section {
    /// Plain `key = value` settings before any header.
    Top,
    /// `[overrides]`: `Application Name = cask-id`.
    Overrides,
    /// `[sudo]`: one cask id per line.
    Sudo,
    /// Unrecognized header; lines are ignored until the next header.
    Unknown,
}

/// What: Check if a line should be skipped (empty or comment).
///
/// Details:
/// - Skips empty lines and lines starting with `#`, `//`, or `;`
fn skip_comment_or_empty(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || line.starts_with("//") || line.starts_with(';')
}

/// Drop a trailing ` # comment` from a value.
fn strip_inline_comment(s: &str) -> &str {
    s.find(" #").map_or(s, |i| &s[..i]).trim()
}

/// Interpret the usual truthy spellings.
fn parse_bool(val: &str) -> bool {
    let lv = val.to_ascii_lowercase();
    lv == "true" || lv == "1" || lv == "yes" || lv == "on"
}

/// Split a comma-separated list, dropping blanks.
fn split_list(val: &str) -> impl Iterator<Item = String> + '_ {
    val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// What: Parse `settings.conf` content into `settings`.
///
/// Inputs:
/// - `content`: Raw file content.
/// - `settings`: Settings to update in place (usually pre-filled with defaults).
///
/// Output:
/// - None (modifies `settings` in-place).
///
/// Details:
/// - Top-level keys are normalized (lowercase, `-`/`.`/space become `_`) before matching.
/// - `[overrides]` entries keep the application name verbatim; user entries replace built-ins.
/// - `[sudo]` lines and the `sudo_casks` key extend, never replace, the sudo set.
/// - Unknown keys and malformed lines are logged at debug level and ignored.
pub fn parse_settings(content: &str, settings: &mut Settings) {
    let mut section = Section::Top;
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if skip_comment_or_empty(line) {
            continue;
        }
        if line.starts_with('[')
            && let Some(end) = line.find(']')
        {
            section = match line[1..end].trim().to_ascii_lowercase().as_str() {
                "overrides" | "override" => Section::Overrides,
                "sudo" | "sudo_casks" => Section::Sudo,
                other => {
                    debug!(line = idx + 1, section = other, "unknown settings section");
                    Section::Unknown
                }
            };
            continue;
        }
        match section {
            Section::Top => parse_top_level(line, idx + 1, settings),
            Section::Overrides => {
                if let Some((app, cask)) = line.split_once('=') {
                    let app = app.trim();
                    let cask = strip_inline_comment(cask);
                    if !app.is_empty() && !cask.is_empty() {
                        settings.overrides.insert(app.to_string(), cask.to_string());
                        continue;
                    }
                }
                debug!(line = idx + 1, "malformed override entry ignored");
            }
            Section::Sudo => {
                let cask = strip_inline_comment(line);
                if !cask.is_empty() {
                    settings.sudo_casks.insert(cask.to_string());
                }
            }
            Section::Unknown => {}
        }
    }
}

/// Apply a single top-level `key = value` line.
fn parse_top_level(line: &str, lineno: usize, settings: &mut Settings) {
    let Some((raw_key, raw_val)) = line.split_once('=') else {
        debug!(line = lineno, "settings line without '=' ignored");
        return;
    };
    let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
    let val = strip_inline_comment(raw_val.trim());
    match key.as_str() {
        "applications_dir" | "apps_dir" => {
            if !val.is_empty() {
                settings.applications_dir = crate::paths::expand_tilde(val);
            }
        }
        "brew_path" | "brew" => {
            settings.brew_path = if val.is_empty() {
                None
            } else {
                Some(crate::paths::expand_tilde(val))
            };
        }
        "greedy" => settings.greedy = parse_bool(val),
        "audit_log" | "upgrade_log" => settings.audit_log = parse_bool(val),
        "sudo_casks" => settings.sudo_casks.extend(split_list(val)),
        "skip_apps" | "ignore_apps" => settings.skip_apps.extend(split_list(val)),
        other => debug!(line = lineno, key = other, "unknown settings key ignored"),
    }
}

//! Classification of `brew upgrade --cask` results into outcomes and advisory hints.
//!
//! Classification is plain substring matching over the captured (ANSI-stripped) output.

use serde::Serialize;
use std::fmt;

/// Final status of one scanned application. Every scanned app gets exactly one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// brew upgraded the cask.
    Upgraded,
    /// brew reported nothing to do.
    UpToDate,
    /// The upgrade command failed or could not be started.
    Failed,
    /// The derived cask is not in `brew list --cask` (or the app is in `skip_apps`).
    SkippedNotManaged,
    /// `--skip-sudo` was given and the cask is in the sudo set.
    SkippedSudo,
}

impl Outcome {
    /// All outcomes in report order.
    pub const ALL: [Self; 5] = [
        Self::Upgraded,
        Self::UpToDate,
        Self::Failed,
        Self::SkippedNotManaged,
        Self::SkippedSudo,
    ];

    /// Short label used in progress lines and the `--list` view.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upgraded => "upgraded",
            Self::UpToDate => "up to date",
            Self::Failed => "failed",
            Self::SkippedNotManaged => "not managed by Homebrew",
            Self::SkippedSudo => "skipped (requires sudo)",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Likely cause of a failed upgrade, guessed from its output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureHint {
    /// The cask installer asked for an administrator password.
    SudoRequired,
    /// The application is open and must be quit first.
    AppRunning,
    /// A file or directory the cask expects is missing.
    PathNotFound,
    /// Homebrew does not know this cask (the derived id is probably wrong).
    UnknownCask,
}

impl FailureHint {
    /// All hints in detection order.
    pub const ALL: [Self; 4] = [
        Self::SudoRequired,
        Self::AppRunning,
        Self::PathNotFound,
        Self::UnknownCask,
    ];

    /// Lowercase fragments that indicate this hint.
    const fn patterns(self) -> &'static [&'static str] {
        match self {
            Self::SudoRequired => &["sudo", "password", "administrator", "operation not permitted"],
            Self::AppRunning => &["is running", "currently running", "quit"],
            Self::PathNotFound => &["no such file or directory", "not found", "does not exist"],
            Self::UnknownCask => &[
                "no available cask",
                "cask is unavailable",
                "no cask with this name",
                "is not installed",
            ],
        }
    }

    /// Advice printed next to the failed application.
    #[must_use]
    pub const fn advice(self) -> &'static str {
        match self {
            Self::SudoRequired => {
                "needs administrator privileges; run `brew upgrade --cask` manually or rerun with --skip-sudo"
            }
            Self::AppRunning => "the app appears to be running; quit it and try again",
            Self::PathNotFound => {
                "a path was not found; try `brew reinstall --cask` to repair the installation"
            }
            Self::UnknownCask => {
                "Homebrew does not recognise this cask; add an [overrides] entry in settings.conf"
            }
        }
    }
}

impl fmt::Display for FailureHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.advice())
    }
}

/// Confirmation brew prints once a cask has actually been upgraded.
const UPGRADE_CONFIRMED: &str = "successfully upgraded";

/// Output fragments meaning brew had nothing to upgrade.
const UP_TO_DATE_MARKERS: &[&str] = &["already installed", "up-to-date", "up to date"];

/// Progress line brew prints while upgrading. Also appears in "Not upgrading ..." warnings.
const UPGRADING_MARKER: &str = "upgrading";

/// Outcome plus any hints for one upgrade attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    /// One of `Upgraded`, `UpToDate`, `Failed`.
    pub outcome: Outcome,
    /// Empty unless `outcome` is `Failed`.
    pub hints: Vec<FailureHint>,
}

/// What: Detect every failure hint whose patterns occur in `text`.
///
/// Inputs:
/// - `text`: Captured command output.
///
/// Output:
/// - Hints in `FailureHint::ALL` order, each at most once.
///
/// Details:
/// - Matching is case-insensitive.
#[must_use]
pub fn detect_hints(text: &str) -> Vec<FailureHint> {
    let lower = text.to_lowercase();
    FailureHint::ALL
        .into_iter()
        .filter(|hint| hint.patterns().iter().any(|p| lower.contains(p)))
        .collect()
}

/// What: Classify the result of `brew upgrade --cask <id>`.
///
/// Inputs:
/// - `success`: Whether the command exited with status zero.
/// - `text`: Combined stdout and stderr with ANSI escapes removed.
///
/// Output:
/// - A `Classification` with `Upgraded`, `UpToDate` or `Failed`.
///
/// Details:
/// - On success "successfully upgraded" wins over everything, so mixed output such as an
///   auto-updated tap reporting "Already up-to-date." followed by the upgrade counts as `Upgraded`.
/// - Otherwise an up-to-date marker beats a bare "upgrading"; a silent success counts as up to date.
/// - On failure hints are collected from the text; the outcome is always `Failed`.
#[must_use]
pub fn classify_upgrade(success: bool, text: &str) -> Classification {
    if !success {
        return Classification {
            outcome: Outcome::Failed,
            hints: detect_hints(text),
        };
    }
    let lower = text.to_lowercase();
    let outcome = if lower.contains(UPGRADE_CONFIRMED) {
        Outcome::Upgraded
    } else if UP_TO_DATE_MARKERS.iter().any(|m| lower.contains(m)) {
        Outcome::UpToDate
    } else if lower.contains(UPGRADING_MARKER) {
        Outcome::Upgraded
    } else {
        Outcome::UpToDate
    };
    Classification {
        outcome,
        hints: Vec::new(),
    }
}

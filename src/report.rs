//! Accumulation and rendering of per-application results.

use std::collections::BTreeSet;
use std::fmt::Write;

use crossterm::style::{Color, Stylize};
use serde::Serialize;

use crate::classify::{FailureHint, Outcome};

/// Result for one scanned application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AppResult {
    /// Application name (bundle name without `.app`).
    pub app: String,
    /// Cask id derived for the application.
    pub cask: String,
    /// Final status.
    pub outcome: Outcome,
    /// Advisory hints; only set for failures.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<FailureHint>,
}

/// Results of a run grouped by outcome.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Apps whose cask was upgraded.
    pub upgraded: Vec<AppResult>,
    /// Apps already at the latest version.
    pub up_to_date: Vec<AppResult>,
    /// Apps whose upgrade failed.
    pub failed: Vec<AppResult>,
    /// Apps not installed through Homebrew.
    pub skipped_not_managed: Vec<AppResult>,
    /// Apps skipped by `--skip-sudo`.
    pub skipped_sudo: Vec<AppResult>,
    /// Casks whose failure this run looked privilege-related.
    pub sudo_detected: BTreeSet<String>,
}

impl RunReport {
    /// What: Add a result to the list matching its outcome.
    ///
    /// Details:
    /// - Each call adds to exactly one list, so `total()` equals the number of calls.
    pub fn record(&mut self, result: AppResult) {
        let list = match result.outcome {
            Outcome::Upgraded => &mut self.upgraded,
            Outcome::UpToDate => &mut self.up_to_date,
            Outcome::Failed => &mut self.failed,
            Outcome::SkippedNotManaged => &mut self.skipped_not_managed,
            Outcome::SkippedSudo => &mut self.skipped_sudo,
        };
        list.push(result);
    }

    /// Results recorded for `outcome`.
    #[must_use]
    pub fn results(&self, outcome: Outcome) -> &[AppResult] {
        match outcome {
            Outcome::Upgraded => &self.upgraded,
            Outcome::UpToDate => &self.up_to_date,
            Outcome::Failed => &self.failed,
            Outcome::SkippedNotManaged => &self.skipped_not_managed,
            Outcome::SkippedSudo => &self.skipped_sudo,
        }
    }

    /// Number of results recorded for `outcome`.
    #[must_use]
    pub fn count(&self, outcome: Outcome) -> usize {
        self.results(outcome).len()
    }

    /// Number of applications processed.
    #[must_use]
    pub fn total(&self) -> usize {
        Outcome::ALL.iter().map(|o| self.count(*o)).sum()
    }

    /// What: Serialize the report as pretty JSON, including `total`.
    ///
    /// # Errors
    /// - Returns `Err` if serialization fails (not expected for this data).
    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct JsonReport<'a> {
            #[serde(flatten)]
            report: &'a RunReport,
            total: usize,
        }
        serde_json::to_string_pretty(&JsonReport {
            report: self,
            total: self.total(),
        })
    }
}

/// Heading shown for each outcome in the summary.
const fn heading(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Upgraded => "Upgraded",
        Outcome::UpToDate => "Already up to date",
        Outcome::Failed => "Failed",
        Outcome::SkippedNotManaged => "Skipped, not managed by Homebrew",
        Outcome::SkippedSudo => "Skipped, requires sudo",
    }
}

/// Colour associated with an outcome.
const fn outcome_color(outcome: Outcome) -> Color {
    match outcome {
        Outcome::Upgraded => Color::Green,
        Outcome::UpToDate => Color::Cyan,
        Outcome::Failed => Color::Red,
        Outcome::SkippedNotManaged => Color::DarkGrey,
        Outcome::SkippedSudo => Color::Yellow,
    }
}

/// Apply `color` (bold) to `text` when styling is enabled.
fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        text.with(color).bold().to_string()
    } else {
        text.to_string()
    }
}

/// What: Render the one-line progress message for an application.
///
/// Inputs:
/// - `index`: 1-based position; `total`: number of apps scanned.
/// - `result`: The application's result.
/// - `color`: Whether to emit ANSI styling.
///
/// Output:
/// - e.g. `[2/7] Google Chrome (google-chrome): upgraded`.
#[must_use]
pub fn render_progress(index: usize, total: usize, result: &AppResult, color: bool) -> String {
    format!(
        "[{index}/{total}] {} ({}): {}",
        result.app,
        result.cask,
        paint(result.outcome.label(), outcome_color(result.outcome), color)
    )
}

/// What: Render the end-of-run summary.
///
/// Inputs:
/// - `report`: Accumulated results.
/// - `color`: Whether to emit ANSI styling.
///
/// Output:
/// - Multi-line text: one section per outcome, failure hints, total, and detected sudo casks.
#[must_use]
pub fn render_summary(report: &RunReport, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", paint("==== Summary ====", Color::White, color));
    for outcome in Outcome::ALL {
        let results = report.results(outcome);
        let title = format!("{} ({})", heading(outcome), results.len());
        let title = paint(&title, outcome_color(outcome), color);
        if outcome == Outcome::Failed && !results.is_empty() {
            let _ = writeln!(out, "{title}:");
            for r in results {
                let _ = writeln!(out, "  - {} ({})", r.app, r.cask);
                for hint in &r.hints {
                    let _ = writeln!(out, "      hint: {hint}");
                }
            }
            continue;
        }
        let names = if results.is_empty() {
            "-".to_string()
        } else {
            results
                .iter()
                .map(|r| r.app.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let _ = writeln!(out, "{title}: {names}");
    }
    let _ = writeln!(out, "Total: {} application(s)", report.total());
    if !report.sudo_detected.is_empty() {
        let casks = report
            .sudo_detected
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            out,
            "\n{} {casks}",
            paint("Needs administrator privileges:", Color::Yellow, color)
        );
        let _ = writeln!(
            out,
            "  Upgrade these with `brew upgrade --cask <name>` in a terminal, or rerun with --skip-sudo."
        );
    }
    out
}

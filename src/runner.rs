//! The sequential upgrade loop and the read-only mapping view.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{info, warn};

use crate::apps::AppBundle;
use crate::brew::CaskManager;
use crate::classify::{FailureHint, Outcome, classify_upgrade};
use crate::config::Settings;
use crate::identifier::derive_cask_id;
use crate::report::{AppResult, RunReport};

/// Per-run switches taken from the command line and settings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Skip casks found in the sudo set instead of attempting them.
    pub skip_sudo: bool,
    /// Pass `--greedy` to brew.
    pub greedy: bool,
}

/// What: Decide whether an application is skipped before any brew call.
///
/// Inputs:
/// - `app`/`cask`: Application name and its derived cask id.
/// - `settings`: Provides `skip_apps`.
/// - `installed`: Output of `brew list --cask`.
/// - `sudo_casks`: Current sudo set.
/// - `skip_sudo`: Whether `--skip-sudo` is active.
///
/// Output:
/// - `Some(outcome)` for a skip, `None` when the cask should be upgraded.
///
/// Details:
/// - Not-managed is checked before the sudo set, so an app brew does not manage is never
///   reported as a sudo skip.
#[must_use]
pub fn skip_reason(
    app: &str,
    cask: &str,
    settings: &Settings,
    installed: &BTreeSet<String>,
    sudo_casks: &BTreeSet<String>,
    skip_sudo: bool,
) -> Option<Outcome> {
    if settings.skip_apps.contains(app) || !installed.contains(cask) {
        return Some(Outcome::SkippedNotManaged);
    }
    if skip_sudo && sudo_casks.contains(cask) {
        return Some(Outcome::SkippedSudo);
    }
    None
}

/// What: Upgrade every managed application, one at a time.
///
/// Inputs:
/// - `manager`: Package manager used for upgrades.
/// - `apps`: Scanned bundles, in processing order.
/// - `settings`: Override table and skip list.
/// - `installed`: Installed cask ids, queried once by the caller.
/// - `sudo_casks`: Sudo set for this run; grows when a failure looks privilege-related.
/// - `options`: `--skip-sudo` / `--greedy`.
/// - `on_result`: Called after each app with `(index, total, result)`, `index` 1-based.
///
/// Output:
/// - A `RunReport` holding exactly one result per app.
///
/// Details:
/// - Failures are recorded and never retried; the loop always moves on to the next app.
/// - A spawn error for one upgrade is recorded as `Failed` with hints from the error text.
/// - Every cask inserted into `sudo_casks` is also inserted into `report.sudo_detected`, so the
///   report carries exactly the privilege failures seen this run, including casks that were
///   already in the set. `sudo_detected` is always a subset of `sudo_casks` afterwards.
pub fn run_upgrades<M, F>(
    manager: &M,
    apps: &[AppBundle],
    settings: &Settings,
    installed: &BTreeSet<String>,
    sudo_casks: &mut BTreeSet<String>,
    options: RunOptions,
    mut on_result: F,
) -> RunReport
where
    M: CaskManager + ?Sized,
    F: FnMut(usize, usize, &AppResult),
{
    let mut report = RunReport::default();
    let total = apps.len();
    for (i, app) in apps.iter().enumerate() {
        let cask = derive_cask_id(&app.name, &settings.overrides);
        let result = match skip_reason(
            &app.name,
            &cask,
            settings,
            installed,
            sudo_casks,
            options.skip_sudo,
        ) {
            Some(outcome) => AppResult {
                app: app.name.clone(),
                cask,
                outcome,
                hints: Vec::new(),
            },
            None => upgrade_one(manager, &app.name, cask, options.greedy),
        };

        if result.hints.contains(&FailureHint::SudoRequired) {
            sudo_casks.insert(result.cask.clone());
            report.sudo_detected.insert(result.cask.clone());
        }
        info!(app = %result.app, cask = %result.cask, outcome = ?result.outcome, "processed application");
        on_result(i + 1, total, &result);
        report.record(result);
    }
    report
}

/// Run and classify a single upgrade.
fn upgrade_one<M>(manager: &M, app: &str, cask: String, greedy: bool) -> AppResult
where
    M: CaskManager + ?Sized,
{
    let classification = match manager.upgrade_cask(&cask, greedy) {
        Ok(out) => classify_upgrade(out.success, &out.text),
        Err(e) => {
            warn!(cask = %cask, error = %e, "could not run upgrade");
            classify_upgrade(false, &e.to_string())
        }
    };
    AppResult {
        app: app.to_string(),
        cask,
        outcome: classification.outcome,
        hints: classification.hints,
    }
}

/// One row of the `--list` view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Mapping {
    /// Application name.
    pub app: String,
    /// Derived cask id.
    pub cask: String,
    /// Whether brew manages the cask (and it is not in `skip_apps`).
    pub managed: bool,
    /// Whether the cask is in the sudo set.
    pub needs_sudo: bool,
}

/// What: Describe how each application maps to brew without changing anything.
///
/// Inputs:
/// - `apps`, `settings`, `installed`: As for `run_upgrades`.
///
/// Output:
/// - One `Mapping` per app, in the same order.
#[must_use]
pub fn list_mappings(
    apps: &[AppBundle],
    settings: &Settings,
    installed: &BTreeSet<String>,
) -> Vec<Mapping> {
    apps.iter()
        .map(|app| {
            let cask = derive_cask_id(&app.name, &settings.overrides);
            Mapping {
                managed: !settings.skip_apps.contains(&app.name) && installed.contains(&cask),
                needs_sudo: settings.sudo_casks.contains(&cask),
                app: app.name.clone(),
                cask,
            }
        })
        .collect()
}

//! Command-line mapping view (`--list`).

use std::process::ExitCode;

use caskup::apps;
use caskup::config::Settings;
use caskup::runner;

use crate::args::utils;

/// What: Print how each application maps to a cask without upgrading anything.
///
/// Inputs:
/// - `args`: Parsed command-line arguments (`--json` switches the format).
/// - `settings`: Effective settings.
///
/// Output:
/// - `ExitCode::SUCCESS` after printing; `ExitCode::FAILURE` when brew is missing or its query fails.
///
/// Details:
/// - Text format is one line per app: `<app> -> <cask>` followed by `managed`/`not managed`
///   and a `sudo` marker when the cask is in the sudo set.
pub fn handle_list(args: &crate::args::Args, settings: &Settings) -> ExitCode {
    tracing::info!(apps_dir = %settings.applications_dir.display(), "list requested");

    let Some((_brew, installed)) = utils::connect_brew(settings) else {
        return ExitCode::FAILURE;
    };

    let bundles = apps::scan_applications(&settings.applications_dir);
    let rows = runner::list_mappings(&bundles, settings, &installed);

    if args.json {
        match serde_json::to_string_pretty(&rows) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: failed to serialize mappings: {e}");
                tracing::error!(error = %e, "failed to serialize mappings");
            }
        }
    } else {
        for row in &rows {
            let status = if row.managed { "managed" } else { "not managed" };
            let sudo = if row.needs_sudo { ", sudo" } else { "" };
            println!("{} -> {} ({status}{sudo})", row.app, row.cask);
        }
    }

    tracing::info!(count = rows.len(), "listed application mappings");
    ExitCode::SUCCESS
}

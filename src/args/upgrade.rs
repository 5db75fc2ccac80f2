//! Command-line upgrade functionality (the default action).

use std::process::ExitCode;

use caskup::apps;
use caskup::config::Settings;
use caskup::report::{render_progress, render_summary};
use caskup::runner::{self, RunOptions};

use crate::args::utils;

/// What: Upgrade every Homebrew-managed application and print a summary.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
/// - `settings`: Effective settings with command-line overrides applied.
///
/// Output:
/// - `ExitCode::SUCCESS` after the report (even when some upgrades failed);
///   `ExitCode::FAILURE` when brew is missing or `brew list --cask` fails.
///
/// Details:
/// - brew is located and queried before the applications folder is scanned.
/// - The sudo set is cloned from settings and passed down mutably; privilege-related
///   failures are added to it for the summary and forgotten afterwards.
/// - Progress lines go to stdout unless `--json` is set, in which case stdout carries only JSON.
/// - With `audit_log = true` in settings, upgraded casks are appended to `upgrade.log`;
///   a write failure is only logged. Otherwise nothing is written to disk.
pub fn handle_upgrade(args: &crate::args::Args, settings: &Settings) -> ExitCode {
    tracing::info!(
        skip_sudo = args.skip_sudo,
        greedy = settings.greedy,
        apps_dir = %settings.applications_dir.display(),
        "upgrade requested"
    );

    let Some((brew, installed)) = utils::connect_brew(settings) else {
        return ExitCode::FAILURE;
    };

    let bundles = apps::scan_applications(&settings.applications_dir);
    if bundles.is_empty() && !args.json {
        println!(
            "No applications found in {}; nothing to do.",
            settings.applications_dir.display()
        );
    }

    let color = utils::use_color(args);
    let options = RunOptions {
        skip_sudo: args.skip_sudo,
        greedy: settings.greedy,
    };
    let mut sudo_casks = settings.sudo_casks.clone();
    let report = runner::run_upgrades(
        &brew,
        &bundles,
        settings,
        &installed,
        &mut sudo_casks,
        options,
        |index, total, result| {
            if !args.json {
                println!("{}", render_progress(index, total, result, color));
            }
        },
    );

    if settings.audit_log {
        let upgraded: Vec<String> = report.upgraded.iter().map(|r| r.cask.clone()).collect();
        if let Err(e) = caskup::audit::log_upgraded(&upgraded) {
            tracing::warn!(error = %e, "failed to write upgrade audit log");
        }
    }

    if args.json {
        match report.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize report");
                eprintln!("Error: failed to serialize report: {e}");
            }
        }
    } else if !bundles.is_empty() {
        println!();
        print!("{}", render_summary(&report, color));
    }

    tracing::info!(
        total = report.total(),
        upgraded = report.upgraded.len(),
        failed = report.failed.len(),
        "upgrade run finished"
    );
    ExitCode::SUCCESS
}

//! The default upgrade run against the mock brew.

use std::fs;

use super::helpers::{DEFAULT_APPS, Sandbox, stderr, stdout};

#[test]
/// What: Each application lands in exactly one summary category.
///
/// Inputs:
/// - Five apps: upgraded, up to date, unmanaged, running, needs sudo.
///
/// Output:
/// - Exit 0; counts 1/1/2/1/0; sudo advice for zoom; the unmanaged app is never upgraded.
fn upgrade_run_classifies_every_app() {
    let sb = Sandbox::with_default_apps();
    let out = sb.run(&[]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);

    assert!(text.contains("[1/5] Firefox (firefox): up to date"));
    assert!(text.contains("Google Chrome (google-chrome): upgraded"));
    assert!(text.contains("Random Tool (random-tool): not managed by Homebrew"));
    assert!(text.contains("Upgraded (1): Google Chrome"));
    assert!(text.contains("Already up to date (1): Firefox"));
    assert!(text.contains("Failed (2):"));
    assert!(text.contains("  - Slack (slack)"));
    assert!(text.contains("  - zoom.us (zoom)"));
    assert!(text.contains("Skipped, not managed by Homebrew (1): Random Tool"));
    assert!(text.contains("Skipped, requires sudo (0): -"));
    assert!(text.contains("Total: 5 application(s)"));
    assert!(text.contains("Needs administrator privileges: zoom"));
    assert!(text.contains("hint: the app appears to be running"));

    let calls = sb.brew_calls();
    assert_eq!(calls[0], "list --cask");
    assert!(calls.contains(&"upgrade --cask zoom".to_string()));
    assert!(!calls.iter().any(|c| c.ends_with("random-tool")));
}

#[test]
/// What: `--skip-sudo` skips known sudo casks without invoking brew for them.
///
/// Output:
/// - zoom reported as a sudo skip and no `upgrade --cask zoom` call.
fn skip_sudo_skips_zoom() {
    let sb = Sandbox::with_default_apps();
    let out = sb.run(&["--skip-sudo"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Skipped, requires sudo (1): zoom.us"));
    assert!(text.contains("Failed (1):"));
    assert!(!sb.brew_calls().iter().any(|c| c.ends_with(" zoom")));
}

#[test]
/// What: `--json` emits only the JSON report on stdout, and the totals add up.
///
/// Output:
/// - Parsable JSON whose five lists sum to `total` == number of apps.
fn json_report_totals_match_scan() {
    let sb = Sandbox::with_default_apps();
    let out = sb.run(&["--json"]);
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).expect("stdout is JSON");

    let lists = ["upgraded", "up_to_date", "failed", "skipped_not_managed", "skipped_sudo"];
    let sum: usize = lists
        .iter()
        .map(|k| json[*k].as_array().map_or(0, Vec::len))
        .sum();
    assert_eq!(sum, DEFAULT_APPS.len());
    assert_eq!(json["total"], DEFAULT_APPS.len());
    assert_eq!(json["sudo_detected"][0], "zoom");
    assert_eq!(json["failed"][0]["hints"][0], "app-running");
}

#[test]
/// What: A default run writes nothing under `$HOME`.
///
/// Inputs:
/// - Default apps, no settings file; an upgrade run, a `--list` run and a `--json` run.
///
/// Output:
/// - `$HOME` still holds only `Applications`; no config or log directories appear.
fn default_run_leaves_home_untouched() {
    let sb = Sandbox::with_default_apps();
    for args in [&[][..], &["--list"][..], &["--json", "--skip-sudo"][..]] {
        let out = sb.run(args);
        assert!(out.status.success(), "args {args:?}: {}", stderr(&out));
        assert_eq!(sb.home_entries(), vec!["Applications".to_string()], "args {args:?}");
    }
    assert!(!sb.upgrade_log().exists());
}

#[test]
/// What: With `audit_log = true`, upgraded casks are appended to the audit log.
///
/// Output:
/// - `upgrade.log` holds google-chrome only; casks that were not upgraded are absent.
fn upgraded_casks_written_to_audit_log() {
    let sb = Sandbox::with_default_apps();
    sb.write_settings("audit_log = true\n");
    let out = sb.run(&[]);
    assert!(out.status.success());
    let log = fs::read_to_string(sb.upgrade_log()).expect("upgrade.log exists");
    assert!(log.lines().any(|l| l.ends_with(" google-chrome")));
    assert!(!log.contains("firefox"));
}

#[test]
/// What: Settings change mapping, skipping and brew flags.
///
/// Inputs:
/// - settings.conf with an override, a skipped app and `greedy = true`.
///
/// Output:
/// - Overridden app upgraded under its mapped cask; skipped app never sent to brew;
///   every upgrade call carries `--greedy`.
fn settings_file_applies_overrides_and_skips() {
    let sb = Sandbox::with_default_apps();
    sb.write_settings(
        "greedy = true\n\
         skip_apps = Slack\n\
         [overrides]\n\
         Random Tool = google-chrome\n",
    );
    let out = sb.run(&[]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Random Tool (google-chrome): upgraded"));
    assert!(text.contains("Slack (slack): not managed by Homebrew"));

    let upgrades: Vec<String> = sb
        .brew_calls()
        .into_iter()
        .filter(|c| c.starts_with("upgrade"))
        .collect();
    assert!(!upgrades.is_empty());
    assert!(upgrades.iter().all(|c| c.starts_with("upgrade --cask --greedy ")));
    assert!(!upgrades.iter().any(|c| c.ends_with(" slack")));
}

#[test]
/// What: An empty applications folder is a normal, successful run.
fn empty_apps_dir_is_nothing_to_do() {
    let sb = Sandbox::new();
    sb.install_mock_brew();
    let out = sb.run(&[]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("nothing to do"));
    assert_eq!(sb.brew_calls(), vec!["list --cask".to_string()]);
}

#[test]
/// What: `--apps-dir` replaces the default folder.
fn apps_dir_flag_overrides_default() {
    let sb = Sandbox::with_default_apps();
    let other = sb.root().join("OtherApps");
    fs::create_dir_all(other.join("Firefox.app")).expect("mkdir");
    let out = sb.run(&["--apps-dir", &other.to_string_lossy()]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("[1/1] Firefox (firefox): up to date"));
    assert!(text.contains("Total: 1 application(s)"));
}

//! Helper functions for caskup binary tests.
//!
//! This module provides utilities for:
//! - Building a sandbox with its own HOME and Applications folder
//! - Writing mock brew scripts that record their invocations
//! - Running the compiled binary inside the sandbox

#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Applications created by `Sandbox::with_default_apps`.
pub const DEFAULT_APPS: &[&str] = &["Firefox", "Google Chrome", "Random Tool", "Slack", "zoom.us"];

/// Mock brew covering every outcome. `{calls}` is replaced by the call log path.
///
/// - `list --cask` prints four casks.
/// - `upgrade --cask <id>`: google-chrome upgrades, firefox is current, slack is running,
///   zoom needs a password, anything else is unknown.
const MOCK_BREW_SCRIPT: &str = r#"#!/bin/sh
echo "$*" >> "{calls}"
if [ "$1" = "list" ]; then
  printf 'firefox\ngoogle-chrome\nslack\nzoom\n'
  exit 0
fi
if [ "$1" = "upgrade" ]; then
  for last in "$@"; do :; done
  case "$last" in
    google-chrome)
      echo "==> Upgrading 1 outdated package:"
      echo "google-chrome was successfully upgraded!"
      ;;
    firefox)
      echo "Warning: Not upgrading firefox, the latest version is already installed" >&2
      ;;
    slack)
      echo "Error: Slack is running, quit it first" >&2
      exit 1
      ;;
    zoom)
      echo "sudo: a terminal is required to read the password" >&2
      exit 1
      ;;
    *)
      echo "Error: Cask '$last' is unavailable: No Cask with this name exists." >&2
      exit 1
      ;;
  esac
  exit 0
fi
exit 1
"#;

/// Mock brew whose cask query fails.
const FAILING_LIST_SCRIPT: &str = r#"#!/bin/sh
echo "$*" >> "{calls}"
echo "Error: Homebrew is broken" >&2
exit 1
"#;

/// A throwaway HOME with an Applications folder and a bin directory.
pub struct Sandbox {
    /// Owns the temp tree; dropped at the end of the test.
    root: TempDir,
    /// Value used for `HOME`.
    pub home: PathBuf,
    /// Scanned applications folder (`$HOME/Applications`).
    pub apps: PathBuf,
    /// Directory placed first on `PATH`.
    pub bin: PathBuf,
    /// File the mock brew appends its arguments to.
    pub calls: PathBuf,
}

impl Sandbox {
    /// What: Create an empty sandbox.
    ///
    /// Output:
    /// - Sandbox with `home`, `home/Applications` and `bin` created.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory");
        let home = root.path().join("home");
        let apps = home.join("Applications");
        let bin = root.path().join("bin");
        fs::create_dir_all(&apps).expect("Failed to create Applications");
        fs::create_dir_all(&bin).expect("Failed to create bin");
        let calls = root.path().join("brew_calls.log");
        Self {
            root,
            home,
            apps,
            bin,
            calls,
        }
    }

    /// Sandbox pre-populated with `DEFAULT_APPS` and the default mock brew on PATH.
    pub fn with_default_apps() -> Self {
        let sb = Self::new();
        for app in DEFAULT_APPS {
            sb.add_app(app);
        }
        sb.install_mock_brew();
        sb
    }

    /// Create `<name>.app` in the applications folder.
    pub fn add_app(&self, name: &str) {
        fs::create_dir_all(self.apps.join(format!("{name}.app"))).expect("Failed to create bundle");
    }

    /// Write the default mock as `bin/brew`.
    pub fn install_mock_brew(&self) -> PathBuf {
        self.write_script("brew", MOCK_BREW_SCRIPT)
    }

    /// Write a brew whose `list --cask` fails as `bin/brew`.
    pub fn install_failing_brew(&self) -> PathBuf {
        self.write_script("brew", FAILING_LIST_SCRIPT)
    }

    /// What: Write an executable script into `bin`.
    ///
    /// Details:
    /// - Syncs the file to disk to prevent "Text file busy" errors when executing immediately.
    fn write_script(&self, name: &str, template: &str) -> PathBuf {
        let path = self.bin.join(name);
        let body = template.replace("{calls}", &self.calls.to_string_lossy());
        let mut file = File::create(&path).expect("Failed to create mock script");
        file.write_all(body.as_bytes())
            .expect("Failed to write mock script");
        file.sync_all().expect("Failed to sync mock script");
        drop(file);
        let mut perms = fs::metadata(&path)
            .expect("Failed to read script metadata")
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("Failed to set script permissions");
        path
    }

    /// Write `$HOME/.config/caskup/settings.conf`.
    pub fn write_settings(&self, content: &str) {
        let dir = self.home.join(".config").join("caskup");
        fs::create_dir_all(&dir).expect("Failed to create config dir");
        fs::write(dir.join("settings.conf"), content).expect("Failed to write settings");
    }

    /// Path of the upgrade audit log.
    pub fn upgrade_log(&self) -> PathBuf {
        self.home.join(".config/caskup/logs/upgrade.log")
    }

    /// Sorted names of the direct children of the sandbox `$HOME`.
    pub fn home_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.home)
            .expect("Failed to read sandbox HOME")
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Lines recorded by the mock brew (one per invocation).
    pub fn brew_calls(&self) -> Vec<String> {
        fs::read_to_string(&self.calls)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// What: Run the caskup binary inside the sandbox.
    ///
    /// Inputs:
    /// - `args`: Command-line arguments.
    ///
    /// Output:
    /// - Captured process output.
    ///
    /// Details:
    /// - `HOME` points at the sandbox; `PATH` is the sandbox bin plus system dirs for `pgrep`.
    /// - `RUST_LOG` and `XDG_CONFIG_HOME` are cleared for reproducibility.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_caskup"))
            .args(args)
            .env("HOME", &self.home)
            .env("PATH", format!("{}:/usr/bin:/bin", self.bin.display()))
            .env_remove("RUST_LOG")
            .env_remove("XDG_CONFIG_HOME")
            .stdin(Stdio::null())
            .output()
            .expect("Failed to run caskup binary")
    }

    /// Root of the sandbox.
    pub fn root(&self) -> &Path {
        self.root.path()
    }
}

/// Stdout as a `String`.
pub fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

/// Stderr as a `String`.
pub fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

//! Command-line argument definition and processing.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

/// caskup - upgrade the Homebrew casks behind your installed applications
#[derive(Parser, Debug)]
#[command(name = "caskup")]
#[command(version)]
#[command(
    about = "Upgrade the Homebrew casks behind the application bundles in your Applications folder",
    long_about = None
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Skip applications whose cask is known to need administrator privileges
    #[arg(long)]
    pub skip_sudo: bool,

    /// Show how each application maps to a cask and whether Homebrew manages it, then exit
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Also upgrade casks that update themselves (passes --greedy to brew)
    #[arg(long)]
    pub greedy: bool,

    /// Print the final report (or the --list view) as JSON
    #[arg(long)]
    pub json: bool,

    /// Folder to scan for .app bundles (default: ~/Applications)
    #[arg(long, value_name = "DIR")]
    pub apps_dir: Option<PathBuf>,

    /// Settings file to use instead of ~/.config/caskup/settings.conf
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// What: Dispatch parsed arguments to the matching handler.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Process exit code: 0 on normal completion, 1 when brew is missing or its cask query fails.
///
/// Details:
/// - `--list` is read-only and takes precedence over upgrading.
/// - `--help`/`--version` never reach this point; clap handles them during parsing.
pub fn process_args(args: &Args) -> ExitCode {
    use crate::args::{list, upgrade};

    let mut settings = caskup::config::load(args.config.as_deref());
    if let Some(dir) = &args.apps_dir {
        settings.applications_dir.clone_from(dir);
    }
    settings.greedy |= args.greedy;

    if args.list {
        return list::handle_list(args, &settings);
    }
    upgrade::handle_upgrade(args, &settings)
}

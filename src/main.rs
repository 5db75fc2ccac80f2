//! caskup binary entrypoint kept minimal. The upgrade pipeline lives in the library.

mod args;

use std::fmt;
use std::process::ExitCode;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

/// Log timestamp formatter using local time.
struct CaskupTimer;

impl tracing_subscriber::fmt::time::FormatTime for CaskupTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

/// What: Initialize tracing on stderr.
///
/// Inputs:
/// - `level`: Default filter directive when `RUST_LOG` is not set.
///
/// Output:
/// - The appender guard; it must live until exit so buffered lines are flushed.
///
/// Details:
/// - Nothing is written to disk; stdout stays reserved for progress, the summary and JSON.
/// - The default level is `warn` so diagnostics do not interleave with the report.
fn init_logging(level: &str) -> WorkerGuard {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_timer(CaskupTimer)
        .init();
    guard
}

fn main() -> ExitCode {
    // Parse first: --help/--version exit here without touching the filesystem.
    let args = args::Args::parse();
    let _log_guard = init_logging(&args::determine_log_level(&args));

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "caskup starting");
    let code = args::process_args(&args);
    tracing::info!("caskup exited");
    code
}

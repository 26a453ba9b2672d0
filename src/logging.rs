//! File-based logging setup.
//!
//! Stdout belongs to the terminal UI, so log output goes to a rolling
//! file under the data directory. `log` macro calls from the rest of
//! the crate are bridged into `tracing` via `tracing-log`.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging to `<data_dir>/logs/stockdesk.log`.
///
/// Returns the worker guard that must be kept alive for the duration
/// of the process, or `None` if initialization failed (the app still
/// runs, just without logs).
pub fn init(data_dir: &Path) -> Option<WorkerGuard> {
    let log_dir = data_dir.join("logs");
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("stockdesk: cannot create log dir {}: {e}", log_dir.display());
        return None;
    }

    let appender = tracing_appender::rolling::daily(&log_dir, "stockdesk.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // May already be installed (tests); keep going either way.
    let _ = tracing_log::LogTracer::init();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        return None;
    }

    Some(guard)
}

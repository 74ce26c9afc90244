//! Internal diagnostics for the demo process
//!
//! The logging core reports its own events (attachments, rotations, setup
//! failures) through `tracing`. This installs a subscriber for them:
//! - Console: compact, on stderr so it stays apart from the stdout sink
//! - File: daily rotation under `logs/diagnostics/`

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DIAGNOSTICS_PREFIX: &str = "threadlog-diagnostics";

/// Initialize tracing; keep the returned guard alive until exit
pub fn init_tracing(diagnostics_dir: &Path) -> anyhow::Result<WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(diagnostics_dir) {
        eprintln!("Warning: Failed to create diagnostics directory: {}", e);
    }

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(DIAGNOSTICS_PREFIX)
        .filename_suffix("log")
        .build(diagnostics_dir)?;
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    // RUST_LOG takes precedence
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,threadlog_core=info,threadlog_demo=info"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .compact()
        .with_target(true);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
